use chrono::NaiveDateTime;

pub const EXTENSION: &str = "pdf";

/// `<invoice id>_<city>_<YYYYMMDDHHMMSS>.pdf`, stamped with the moment
/// the document was generated (not the invoice date). Both strings
/// are used verbatim.
pub fn output_filename(invoice_id: &str, city: &str, generated_at: NaiveDateTime) -> String {
    format!(
        "{}_{}_{}.{}",
        invoice_id,
        city,
        generated_at.format("%Y%m%d%H%M%S"),
        EXTENSION
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn components_are_zero_padded() {
        assert_eq!(
            output_filename("INV-007", "Colombo", at(2024, 3, 5, 14, 30, 5)),
            "INV-007_Colombo_20240305143005.pdf"
        );
        assert_eq!(
            output_filename("A1", "Kandy", at(987, 1, 2, 3, 4, 5)),
            "A1_Kandy_09870102030405.pdf"
        );
    }

    #[test]
    fn one_second_apart_differs() {
        let first = output_filename("INV-1", "Galle", at(2024, 12, 31, 23, 59, 59));
        let second = output_filename("INV-1", "Galle", at(2025, 1, 1, 0, 0, 0));
        assert_ne!(first, second);
        assert_eq!(second, "INV-1_Galle_20250101000000.pdf");
    }
}
