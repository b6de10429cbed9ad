//! Fixed severity scale shared by alerts and cases
//!
//! The numeric codes are the wire representation; the labels are what the
//! filter facets and list columns show. Both directions of the mapping are
//! needed: label -> code when a severity filter is submitted, code -> label
//! when filtering by click on a list row.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ];

    /// Numeric wire code, 1..=4
    pub fn code(self) -> u8 {
        match self {
            Severity::Low => 1,
            Severity::Medium => 2,
            Severity::High => 3,
            Severity::Critical => 4,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Severity::Low),
            2 => Some(Severity::Medium),
            3 => Some(Severity::High),
            4 => Some(Severity::Critical),
            _ => None,
        }
    }

    /// Display label, e.g. shown in the severity facet
    pub fn label(self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        }
    }

    /// Exact-match reverse lookup; unknown labels yield `None`
    pub fn from_label(label: &str) -> Option<Self> {
        Severity::ALL.into_iter().find(|s| s.label() == label)
    }
}

impl From<Severity> for u8 {
    fn from(severity: Severity) -> Self {
        severity.code()
    }
}

impl TryFrom<u8> for Severity {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Severity::from_code(code).ok_or_else(|| format!("invalid severity code: {}", code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_label_roundtrip() {
        for severity in Severity::ALL {
            assert_eq!(Severity::from_code(severity.code()), Some(severity));
            assert_eq!(Severity::from_label(severity.label()), Some(severity));
        }
    }

    #[test]
    fn test_unknown_values() {
        assert_eq!(Severity::from_code(0), None);
        assert_eq!(Severity::from_code(5), None);
        assert_eq!(Severity::from_label("Unknown"), None);
        assert_eq!(Severity::from_label("low"), None);
    }

    #[test]
    fn test_serde_as_number() {
        let json = serde_json::to_string(&Severity::High).unwrap();
        assert_eq!(json, "3");
        let parsed: Severity = serde_json::from_str("2").unwrap();
        assert_eq!(parsed, Severity::Medium);
        assert!(serde_json::from_str::<Severity>("9").is_err());
    }
}
