use serde::{Deserialize, Serialize};

pub const DEFAULT_BUSINESS_NAME: &str = "Furnistore";
pub const DEFAULT_BUSINESS_ADDRESS: &str = "No 192, Artigala road, Meegoda";
pub const DEFAULT_BUSINESS_CONTACT: &str = "+94763371762 | furnistore.lk@gmail.com";
pub const DEFAULT_CURRENCY_NAME: &str = "Sri Lankan Rupees";
pub const DEFAULT_SUBUNIT_NAME: &str = "Cents";
pub const DEFAULT_CURRENCY_CODE: &str = "LKR";
pub const DEFAULT_AMOUNT_LABEL: &str = "Amount (Rs.)";
pub const DEFAULT_THANK_YOU: &str = "Thank you for your business!";
pub const DEFAULT_PAYMENT_TERMS: &str =
    "Payment terms: Due upon receipt | Payment methods: Bank Transfer, Cash";

/// Names used when an amount is written out or abbreviated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyNames {
    /// Main unit, e.g. "Sri Lankan Rupees".
    pub name: String,
    /// Hundredth of the main unit, e.g. "Cents".
    pub subunit: String,
    /// Suffix after the printed grand total, e.g. "LKR".
    pub code: String,
}

impl Default for CurrencyNames {
    fn default() -> Self {
        CurrencyNames {
            name: DEFAULT_CURRENCY_NAME.to_string(),
            subunit: DEFAULT_SUBUNIT_NAME.to_string(),
            code: DEFAULT_CURRENCY_CODE.to_string(),
        }
    }
}

/// Business identity and footer text printed on every invoice. Missing
/// keys in a TOML override keep the compiled-in defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessProfile {
    pub name: String,
    pub address: String,
    pub contact: String,
    pub currency: CurrencyNames,
    /// Heading of the amount column.
    pub amount_label: String,
    pub thank_you: String,
    pub payment_terms: String,
}

impl Default for BusinessProfile {
    fn default() -> Self {
        BusinessProfile {
            name: DEFAULT_BUSINESS_NAME.to_string(),
            address: DEFAULT_BUSINESS_ADDRESS.to_string(),
            contact: DEFAULT_BUSINESS_CONTACT.to_string(),
            currency: CurrencyNames::default(),
            amount_label: DEFAULT_AMOUNT_LABEL.to_string(),
            thank_you: DEFAULT_THANK_YOU.to_string(),
            payment_terms: DEFAULT_PAYMENT_TERMS.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let profile: BusinessProfile = toml::from_str(
            r#"
            name = "Lakeside Interiors"

            [currency]
            code = "Rs"
            "#,
        )
        .unwrap();
        assert_eq!(profile.name, "Lakeside Interiors");
        assert_eq!(profile.address, DEFAULT_BUSINESS_ADDRESS);
        assert_eq!(profile.currency.code, "Rs");
        assert_eq!(profile.currency.name, DEFAULT_CURRENCY_NAME);
    }

    #[test]
    fn empty_toml_is_default() {
        let profile: BusinessProfile = toml::from_str("").unwrap();
        assert_eq!(profile, BusinessProfile::default());
    }
}
