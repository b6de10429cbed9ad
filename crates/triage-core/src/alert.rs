//! Alert domain model

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::severity::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertStatus {
    New,
    Updated,
    Ignored,
    Imported,
}

impl AlertStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AlertStatus::New => "New",
            AlertStatus::Updated => "Updated",
            AlertStatus::Ignored => "Ignored",
            AlertStatus::Imported => "Imported",
        }
    }
}

/// One row of the triage list.
///
/// Owned by the list model and replaced wholesale on every refresh;
/// `selected` is view-local state and never leaves the process.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertSummary {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub alert_type: String,
    pub source: String,
    pub source_ref: String,
    pub status: AlertStatus,
    pub severity: Severity,
    /// Traffic-light protocol marker, passed through unchanged
    pub tlp: u8,
    pub follow: bool,
    #[serde(rename = "case", default)]
    pub case_id: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(with = "time::serde::timestamp")]
    pub date: OffsetDateTime,
    #[serde(skip)]
    pub selected: bool,
}

/// One fetched page plus the total the server reports for the query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlertPage {
    pub values: Vec<AlertSummary>,
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn sample() -> AlertSummary {
        AlertSummary {
            id: "a1".to_string(),
            title: "Suspicious login".to_string(),
            alert_type: "external".to_string(),
            source: "misp".to_string(),
            source_ref: "ref-1".to_string(),
            status: AlertStatus::New,
            severity: Severity::High,
            tlp: 2,
            follow: false,
            case_id: None,
            tags: vec!["phishing".to_string()],
            date: datetime!(2024-03-01 12:00 UTC),
            selected: false,
        }
    }

    #[test]
    fn test_wire_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["type"], "external");
        assert_eq!(json["sourceRef"], "ref-1");
        assert_eq!(json["severity"], 3);
        assert_eq!(json["case"], serde_json::Value::Null);
        // selected is view-local, never serialized
        assert!(json.get("selected").is_none());
    }

    #[test]
    fn test_deserialize_defaults() {
        let json = serde_json::json!({
            "id": "a2",
            "title": "t",
            "type": "internal",
            "source": "siem",
            "sourceRef": "r",
            "status": "Imported",
            "severity": 1,
            "tlp": 0,
            "follow": true,
            "date": 1709294400
        });
        let alert: AlertSummary = serde_json::from_value(json).unwrap();
        assert_eq!(alert.status, AlertStatus::Imported);
        assert_eq!(alert.case_id, None);
        assert!(alert.tags.is_empty());
        assert!(!alert.selected);
    }
}
