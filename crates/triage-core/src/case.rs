//! Case domain model

use serde::{Deserialize, Serialize};

use crate::severity::Severity;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Case {
    pub id: String,
    /// Human-facing sequential number, distinct from the store id
    pub number: u32,
    pub title: String,
    #[serde(default)]
    pub severity: Option<Severity>,
}

impl Case {
    /// Display format used by the case picker, e.g. `#42 - Phishing wave`
    pub fn display(&self) -> String {
        format!("#{} - {}", self.number, self.title)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseTemplate {
    pub id: String,
    pub name: String,
}

/// Payload for creating a case, optionally seeded from a template
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub severity: Option<Severity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
}

/// Search submitted by the case picker.
///
/// Title search needs at least 3 characters, number search at least 1;
/// `validate` enforces the minimum before anything goes to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseQuery {
    ByTitle(String),
    ByNumber(String),
}

impl CaseQuery {
    pub fn min_input_len(&self) -> usize {
        match self {
            CaseQuery::ByTitle(_) => 3,
            CaseQuery::ByNumber(_) => 1,
        }
    }

    pub fn input(&self) -> &str {
        match self {
            CaseQuery::ByTitle(input) | CaseQuery::ByNumber(input) => input,
        }
    }

    pub fn validate(&self) -> bool {
        self.input().chars().count() >= self.min_input_len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_format() {
        let case = Case {
            id: "c1".to_string(),
            number: 42,
            title: "Phishing wave".to_string(),
            severity: None,
        };
        assert_eq!(case.display(), "#42 - Phishing wave");
    }

    #[test]
    fn test_query_minimum_lengths() {
        assert!(!CaseQuery::ByTitle("ab".to_string()).validate());
        assert!(CaseQuery::ByTitle("abc".to_string()).validate());
        assert!(!CaseQuery::ByNumber(String::new()).validate());
        assert!(CaseQuery::ByNumber("7".to_string()).validate());
    }
}
