//! Carrier identification.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shipping carrier an invoice file belongs to.
///
/// `Unknown` is a terminal classification: files that cannot be attributed
/// to a carrier are excluded from a run, never processed with a guessed
/// schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vendor {
    Fedex,
    Ups,
    Usps,
    Unknown,
}

impl Vendor {
    /// All carriers with a field map, in detection priority order.
    pub const KNOWN: [Vendor; 3] = [Vendor::Fedex, Vendor::Ups, Vendor::Usps];

    /// Returns the lowercase canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Vendor::Fedex => "fedex",
            Vendor::Ups => "ups",
            Vendor::Usps => "usps",
            Vendor::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Vendor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fedex" => Ok(Vendor::Fedex),
            "ups" => Ok(Vendor::Ups),
            "usps" => Ok(Vendor::Usps),
            "unknown" => Ok(Vendor::Unknown),
            other => Err(format!("unknown vendor: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_str() {
        for vendor in Vendor::KNOWN {
            assert_eq!(vendor.as_str().parse::<Vendor>().unwrap(), vendor);
        }
    }
}
