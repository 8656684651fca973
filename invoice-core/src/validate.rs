use rust_decimal::Decimal;

use crate::error::{ValidationError, ValidationErrors};
use crate::model::InvoiceData;

/// Smallest amount accepted for a single item.
pub const MIN_ITEM_AMOUNT: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Check every order-form rule and report all failures at once. The
/// renderer does not call this.
pub fn validate(invoice: &InvoiceData) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();

    let required = [
        ("Invoice ID", &invoice.invoice_id),
        ("Customer name", &invoice.customer_name),
        ("Customer address", &invoice.customer_address),
        ("Customer contact", &invoice.customer_contact),
        ("City", &invoice.city),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            errors.push(ValidationError::Required { field });
        }
    }

    if invoice.items.is_empty() {
        errors.push(ValidationError::NoItems);
    }

    for (index, item) in invoice.items.iter().enumerate() {
        if item.description.trim().is_empty() {
            errors.push(ValidationError::ItemRequired {
                index,
                field: "description",
            });
        }
        if item.amount < MIN_ITEM_AMOUNT {
            errors.push(ValidationError::AmountTooSmall { index });
        } else if item.amount.normalize().scale() > 2 {
            errors.push(ValidationError::AmountTooPrecise { index });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(errors))
    }
}
