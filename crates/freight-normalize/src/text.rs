//! Text-key normalization and the smaller field cleaners.

use crate::outcome::{Cleaned, is_blank};

/// Normalizes text into a comparison key: lowercased, trimmed, with every
/// run of whitespace and punctuation collapsed to one underscore.
///
/// The same key function serves header-name resolution and recipient/customer
/// name comparison, so the two sides of every lookup agree on spelling.
pub fn normalize_key(raw: &str) -> String {
    let mut key = String::with_capacity(raw.len());
    let mut pending_separator = false;
    for ch in raw.trim().chars() {
        if ch.is_alphanumeric() {
            if pending_separator && !key.is_empty() {
                key.push('_');
            }
            pending_separator = false;
            for lower in ch.to_lowercase() {
                key.push(lower);
            }
        } else {
            pending_separator = true;
        }
    }
    key
}

/// US state and territory codes accepted for `recipient_state`.
const US_STATES: [&str; 53] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ",
    "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT",
    "VA", "WA", "WV", "WI", "WY", "DC", "PR", "VI",
];

/// Uppercases and validates a two-letter state code.
pub fn clean_state(raw: &str) -> Cleaned<String> {
    if is_blank(raw) {
        return Cleaned::Missing;
    }
    let upper = raw.trim().to_uppercase();
    if US_STATES.contains(&upper.as_str()) {
        Cleaned::Value(upper)
    } else {
        Cleaned::Invalid
    }
}

/// Normalizes a ZIP to 5-digit or ZIP+4 form. Non-digits besides hyphens
/// are stripped first (some exports prefix apostrophes or pad with spaces).
pub fn clean_zip(raw: &str) -> Cleaned<String> {
    if is_blank(raw) {
        return Cleaned::Missing;
    }
    let digits: String = raw.chars().filter(|ch| ch.is_ascii_digit()).collect();
    if digits.len() >= 9 {
        Cleaned::Value(format!("{}-{}", &digits[..5], &digits[5..9]))
    } else if digits.len() >= 5 {
        Cleaned::Value(digits[..5].to_string())
    } else {
        Cleaned::Invalid
    }
}

/// Strips everything but alphanumerics from a tracking number.
pub fn clean_tracking(raw: &str) -> Cleaned<String> {
    if is_blank(raw) {
        return Cleaned::Missing;
    }
    let cleaned: String = raw.chars().filter(|ch| ch.is_ascii_alphanumeric()).collect();
    if cleaned.is_empty() {
        Cleaned::Missing
    } else {
        Cleaned::Value(cleaned)
    }
}

/// Normalizes a carrier zone: trimmed, leading zeros removed ("02" → "2").
pub fn clean_zone(raw: &str) -> Cleaned<String> {
    if is_blank(raw) {
        return Cleaned::Missing;
    }
    let trimmed = raw.trim();
    let stripped = trimmed.trim_start_matches('0');
    if stripped.is_empty() {
        // All zeros still names zone 0.
        Cleaned::Value("0".to_string())
    } else {
        Cleaned::Value(stripped.to_string())
    }
}

/// Plain decimal parse for weights and package dimensions.
pub fn clean_decimal(raw: &str) -> Cleaned<f64> {
    if is_blank(raw) {
        return Cleaned::Missing;
    }
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Cleaned::Value(value),
        _ => Cleaned::Invalid,
    }
}

/// Trims free text; blank spellings become `Missing`.
pub fn clean_text(raw: &str) -> Cleaned<String> {
    if is_blank(raw) {
        return Cleaned::Missing;
    }
    Cleaned::Value(raw.trim().to_string())
}
