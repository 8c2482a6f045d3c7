//! Currency cleaning.

use crate::outcome::{Cleaned, is_blank};

/// Rounds to cents. Carrier charges are dollars-and-cents values; anything
/// beyond two places is accumulation noise.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Cleans a raw currency cell into a signed dollar amount.
///
/// Strips `$`, thousands separators, and whitespace; a parenthesized amount
/// like `($38.33)` is negative. Blank spellings are `Missing`; content with
/// no extractable number is `Invalid` and never an error.
pub fn clean_currency(raw: &str) -> Cleaned<f64> {
    if is_blank(raw) {
        return Cleaned::Missing;
    }
    let trimmed = raw.trim();
    let mut negative = false;
    let mut normalized = String::with_capacity(trimmed.len());
    for ch in trimmed.chars() {
        match ch {
            '(' => negative = true,
            ')' | '$' | ',' | ' ' => {}
            _ => normalized.push(ch),
        }
    }
    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() => {
            let signed = if negative { -value } else { value };
            Cleaned::Value(round_cents(signed))
        }
        _ => Cleaned::Invalid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_symbols_and_separators() {
        assert_eq!(clean_currency("$1,234.56"), Cleaned::Value(1234.56));
        assert_eq!(clean_currency("  18.40 "), Cleaned::Value(18.40));
    }

    #[test]
    fn parentheses_mean_negative() {
        assert_eq!(clean_currency("($38.33)"), Cleaned::Value(-38.33));
        assert_eq!(clean_currency("-$5.00"), Cleaned::Value(-5.0));
    }

    #[test]
    fn blank_spellings_are_missing() {
        assert_eq!(clean_currency(""), Cleaned::Missing);
        assert_eq!(clean_currency("  "), Cleaned::Missing);
        assert_eq!(clean_currency("nan"), Cleaned::Missing);
    }

    #[test]
    fn garbage_is_invalid_not_a_panic() {
        assert_eq!(clean_currency("N/A"), Cleaned::Invalid);
        assert_eq!(clean_currency("FREE"), Cleaned::Invalid);
        assert_eq!(clean_currency("$-"), Cleaned::Invalid);
    }

    #[test]
    fn rounds_to_cents() {
        assert_eq!(clean_currency("10.005"), Cleaned::Value(10.01));
    }
}
