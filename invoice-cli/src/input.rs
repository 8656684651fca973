//! Reading invoices and business profiles from disk.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use invoice_core::{BusinessProfile, Finish, InvoiceData, LineItem, Warranty};
use rust_decimal::Decimal;

/// Load an invoice from a `.json` or `.toml` file.
pub fn load_invoice(path: &Path) -> Result<InvoiceData> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("json") => serde_json::from_str(&text)
            .with_context(|| format!("invalid invoice JSON in {}", path.display())),
        Some("toml") => toml::from_str(&text)
            .with_context(|| format!("invalid invoice TOML in {}", path.display())),
        _ => bail!(
            "unsupported input {}: expected a .json or .toml file",
            path.display()
        ),
    }
}

/// Load a business profile, or the built-in one when no file is given.
pub fn load_profile(path: Option<&Path>) -> Result<BusinessProfile> {
    let Some(path) = path else {
        return Ok(BusinessProfile::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read profile {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("invalid profile {}", path.display()))
}

/// A filled-in invoice to start from, dated `today`.
pub fn sample_invoice(today: NaiveDate) -> InvoiceData {
    InvoiceData {
        invoice_id: "INV-001".to_string(),
        customer_name: "Kamala Silva".to_string(),
        customer_address: "No 5, Lake Drive\nRajagiriya".to_string(),
        customer_contact: "0712345678".to_string(),
        city: "Colombo".to_string(),
        date: today,
        items: vec![
            LineItem {
                description: "Six-seater dining table".to_string(),
                color: Finish::TeakBrown,
                warranty: Warranty::default(),
                amount: Decimal::new(8500000, 2),
            },
            LineItem {
                description: "Bookshelf".to_string(),
                color: Finish::AmericanAsh,
                warranty: Warranty::default().increment(),
                amount: Decimal::new(2450050, 2),
            },
        ],
    }
}
