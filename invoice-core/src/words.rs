use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::WordsError;
use crate::profile::CurrencyNames;

const ONES: [&str; 20] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten", "Eleven",
    "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen", "Eighteen", "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

/// Scale word per group of three digits, least significant first.
const SCALES: [&str; 5] = ["", "Thousand", "Million", "Billion", "Trillion"];

/// First integer amount that would need a sixth scale group.
pub const WORDS_LIMIT: u64 = 1_000_000_000_000_000;

/// Spell `amount` followed by the currency name, with an
/// "and <n> <subunit>" clause when the amount has cents.
///
/// The amount is rounded to cents (half away from zero) first, so
/// `1234.5` reads "One Thousand Two Hundred Thirty Four Sri Lankan
/// Rupees and Fifty Cents".
pub fn amount_to_words(amount: Decimal, currency: &CurrencyNames) -> Result<String, WordsError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(WordsError::Negative(amount));
    }
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        return Ok(format!("Zero {}", currency.name));
    }

    let whole = rounded
        .trunc()
        .to_u64()
        .filter(|&n| n < WORDS_LIMIT)
        .ok_or(WordsError::OutOfRange(amount))?;
    let cents = ((rounded - rounded.trunc()) * Decimal::ONE_HUNDRED)
        .to_u16()
        .unwrap_or(0);

    let mut words: Vec<&str> = integer_words(whole);
    if words.is_empty() {
        words.push("Zero");
    }
    words.push(&currency.name);

    if cents > 0 {
        words.push("and");
        words.extend(group_words(cents));
        words.push(&currency.subunit);
    }

    Ok(words.join(" "))
}

/// Words for a whole number below [`WORDS_LIMIT`]. Zero yields no words.
fn integer_words(n: u64) -> Vec<&'static str> {
    let mut groups = Vec::with_capacity(SCALES.len());
    let mut rest = n;
    while rest > 0 {
        groups.push((rest % 1000) as u16);
        rest /= 1000;
    }

    let mut words = Vec::new();
    for (scale, &group) in groups.iter().enumerate().rev() {
        if group == 0 {
            continue;
        }
        words.extend(group_words(group));
        if !SCALES[scale].is_empty() {
            words.push(SCALES[scale]);
        }
    }
    words
}

/// Words for 0..=999.
fn group_words(n: u16) -> Vec<&'static str> {
    let mut words = Vec::with_capacity(4);
    let hundreds = (n / 100) as usize;
    let rest = (n % 100) as usize;

    if hundreds > 0 {
        words.push(ONES[hundreds]);
        words.push("Hundred");
    }
    if rest >= 20 {
        words.push(TENS[rest / 10]);
        if rest % 10 > 0 {
            words.push(ONES[rest % 10]);
        }
    } else if rest > 0 {
        words.push(ONES[rest]);
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_words_cover_teens_and_tens() {
        assert_eq!(group_words(0), Vec::<&str>::new());
        assert_eq!(group_words(13), ["Thirteen"]);
        assert_eq!(group_words(40), ["Forty"]);
        assert_eq!(group_words(99), ["Ninety", "Nine"]);
        assert_eq!(group_words(700), ["Seven", "Hundred"]);
        assert_eq!(group_words(815), ["Eight", "Hundred", "Fifteen"]);
    }

    #[test]
    fn zero_groups_are_skipped() {
        assert_eq!(integer_words(1_000_001), ["One", "Million", "One"]);
        assert_eq!(integer_words(2_000_000_000), ["Two", "Billion"]);
    }

    #[test]
    fn largest_group_is_trillion() {
        let words = integer_words(WORDS_LIMIT - 1).join(" ");
        assert!(words.starts_with("Nine Hundred Ninety Nine Trillion"));
        assert!(words.ends_with("Nine Hundred Ninety Nine"));
    }
}
