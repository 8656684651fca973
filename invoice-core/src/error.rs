use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;

/// Invalid values rejected while building the data model.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("warranty must be a whole number of years, got {0:?}")]
    InvalidWarranty(String),

    #[error("warranty must be at least 1 year, got {0}")]
    WarrantyTooShort(i64),
}

/// Amounts the words converter cannot spell.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WordsError {
    #[error("cannot spell a negative amount ({0})")]
    Negative(Decimal),

    /// The integer part needs a scale group beyond Trillion.
    #[error("amount {0} is too large to spell (limit is below one quadrillion)")]
    OutOfRange(Decimal),
}

/// Failure to produce an invoice document. Any error aborts the whole
/// generation; no partial document is returned.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The built-in fonts have no glyph for a character.
    #[error("{context} contains {ch:?}, which the built-in PDF fonts cannot display")]
    UnsupportedCharacter { ch: char, context: String },

    #[error("cannot spell the total: {0}")]
    Words(#[from] WordsError),

    /// Laid-out content runs below the bottom margin of the page.
    #[error("invoice does not fit on one page: content ends at y={bottom:.1}pt, below the {limit}pt margin")]
    PageOverflow { bottom: f64, limit: f64 },

    #[error("failed to write PDF: {0}")]
    Io(#[from] std::io::Error),
}

/// A single broken form rule.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("at least one item is required")]
    NoItems,

    #[error("item {}: {field} is required", .index + 1)]
    ItemRequired { index: usize, field: &'static str },

    #[error("item {}: amount must be greater than 0", .index + 1)]
    AmountTooSmall { index: usize },

    #[error("item {}: amount may have at most 2 decimal places", .index + 1)]
    AmountTooPrecise { index: usize },
}

/// Every rule an invoice broke, in form order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invoice is invalid: ")?;
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
