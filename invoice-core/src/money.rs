use rust_decimal::{Decimal, RoundingStrategy};

/// Format an amount with thousands separators and exactly two
/// decimals: 9600 → "9,600.00". No currency symbol.
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let plain = format!("{:.2}", rounded.abs());
    let (whole, cents) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));
    format!("{}{}.{}", sign, group_thousands(whole), cents)
}

/// Grand total as printed in the total block: "400.00 LKR".
pub fn format_total(amount: Decimal, currency_code: &str) -> String {
    format!("{} {}", format_amount(amount), currency_code)
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
