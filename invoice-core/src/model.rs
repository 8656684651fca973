use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Everything printed on one invoice. Field names follow the
/// camelCase keys of the order form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceData {
    pub invoice_id: String,
    pub customer_name: String,
    /// May span several lines separated by `\n`.
    pub customer_address: String,
    pub customer_contact: String,
    pub city: String,
    pub date: NaiveDate,
    /// Display order; never sorted.
    pub items: Vec<LineItem>,
}

impl InvoiceData {
    /// Sum of all item amounts. Computed on every call so it always
    /// matches the current item list.
    pub fn total(&self) -> Decimal {
        self.items.iter().map(|item| item.amount).sum()
    }

    /// The address split on line breaks. A trailing `\r` from CRLF
    /// input is dropped; blank segments are kept.
    pub fn address_lines(&self) -> impl Iterator<Item = &str> {
        self.customer_address
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
    }

    /// Long-form date, e.g. "January 5, 2024".
    pub fn formatted_date(&self) -> String {
        self.date.format("%B %-d, %Y").to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub color: Finish,
    pub warranty: Warranty,
    pub amount: Decimal,
}

/// Furniture finish offered on the order form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Finish {
    #[serde(rename = "Teak Brown")]
    TeakBrown,
    #[serde(rename = "American Ash")]
    AmericanAsh,
    White,
    Black,
    Other,
}

impl Finish {
    pub const ALL: [Finish; 5] = [
        Finish::TeakBrown,
        Finish::AmericanAsh,
        Finish::White,
        Finish::Black,
        Finish::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Finish::TeakBrown => "Teak Brown",
            Finish::AmericanAsh => "American Ash",
            Finish::White => "White",
            Finish::Black => "Black",
            Finish::Other => "Other",
        }
    }
}

impl fmt::Display for Finish {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Warranty period in whole years, never less than one.
///
/// The form keeps this as text, so it deserializes from either `"3"`
/// or `3` and serializes back to a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "WarrantyInput", into = "String")]
pub struct Warranty(u32);

impl Warranty {
    pub const MIN: Warranty = Warranty(1);

    pub fn new(years: u32) -> Result<Self, ModelError> {
        if years == 0 {
            return Err(ModelError::WarrantyTooShort(0));
        }
        Ok(Warranty(years))
    }

    pub fn years(&self) -> u32 {
        self.0
    }

    /// One more year, as the form's "+" button does.
    pub fn increment(self) -> Self {
        Warranty(self.0.saturating_add(1))
    }

    /// One year less, stopping at the one-year minimum.
    pub fn decrement(self) -> Self {
        Warranty(self.0.saturating_sub(1).max(Self::MIN.0))
    }
}

impl Default for Warranty {
    fn default() -> Self {
        Self::MIN
    }
}

impl fmt::Display for Warranty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Warranty {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let years: i64 = s
            .trim()
            .parse()
            .map_err(|_| ModelError::InvalidWarranty(s.to_string()))?;
        Warranty::try_from(years)
    }
}

impl TryFrom<i64> for Warranty {
    type Error = ModelError;

    fn try_from(years: i64) -> Result<Self, Self::Error> {
        if years < 1 {
            return Err(ModelError::WarrantyTooShort(years));
        }
        u32::try_from(years)
            .map(Warranty)
            .map_err(|_| ModelError::InvalidWarranty(years.to_string()))
    }
}

impl From<Warranty> for String {
    fn from(w: Warranty) -> Self {
        w.0.to_string()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WarrantyInput {
    Years(i64),
    Text(String),
}

impl TryFrom<WarrantyInput> for Warranty {
    type Error = ModelError;

    fn try_from(input: WarrantyInput) -> Result<Self, Self::Error> {
        match input {
            WarrantyInput::Years(years) => Warranty::try_from(years),
            WarrantyInput::Text(text) => text.parse(),
        }
    }
}
