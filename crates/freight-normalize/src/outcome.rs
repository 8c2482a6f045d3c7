//! Explicit cleaning outcomes.

/// Result of cleaning one raw cell value.
///
/// `Missing` and `Invalid` are expected outcomes, not errors: an empty cell
/// is absent data, while a cell with uninterpretable content is flagged by
/// the caller and either degrades an optional field or rejects the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cleaned<T> {
    Value(T),
    Missing,
    Invalid,
}

impl<T> Cleaned<T> {
    pub fn value(self) -> Option<T> {
        match self {
            Cleaned::Value(v) => Some(v),
            Cleaned::Missing | Cleaned::Invalid => None,
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Cleaned::Invalid)
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cleaned::Missing)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Cleaned<U> {
        match self {
            Cleaned::Value(v) => Cleaned::Value(f(v)),
            Cleaned::Missing => Cleaned::Missing,
            Cleaned::Invalid => Cleaned::Invalid,
        }
    }
}

/// True for empty cells and the null spellings serializers leak into
/// exports. Anything else with content (including "N/A") is real input and
/// cleans to `Invalid` when uninterpretable.
pub(crate) fn is_blank(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("nan")
        || trimmed.eq_ignore_ascii_case("null")
        || trimmed.eq_ignore_ascii_case("none")
}
