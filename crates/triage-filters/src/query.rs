//! Query serialization
//!
//! Turns the active-filter map into one boolean expression for the remote
//! store. Serialization must be deterministic: two identical maps yield
//! byte-identical strings, which the list model relies on to detect
//! no-op filter edits. The map is a `BTreeMap`, so conjunction order is
//! field order.

use std::collections::BTreeMap;

use time::OffsetDateTime;

use crate::definition::{FilterRegistry, TextRender};
use crate::value::{ActiveFilter, FilterValue};

/// Serialize all active filters; empty string when nothing renders
pub fn build_query(registry: &FilterRegistry, active: &BTreeMap<String, ActiveFilter>) -> String {
    let parts: Vec<String> = active
        .iter()
        .filter_map(|(field, filter)| render(registry, field, &filter.value))
        .collect();
    parts.join(" AND ")
}

fn render(registry: &FilterRegistry, field: &str, value: &FilterValue) -> Option<String> {
    let text_render = registry
        .get(field)
        .map(|d| d.text_render)
        .unwrap_or_default();

    match value {
        FilterValue::Text { value } => {
            if value.is_empty() {
                return None;
            }
            Some(match text_render {
                TextRender::Raw => value.clone(),
                TextRender::Quoted => format!("{}:\"{}\"", field, value),
            })
        }
        FilterValue::Terms { values } => {
            if values.is_empty() {
                return None;
            }
            let joined = values
                .iter()
                .map(|t| format!("{}:\"{}\"", field, t.text))
                .collect::<Vec<_>>()
                .join(" OR ");
            Some(format!("({})", joined))
        }
        FilterValue::Range { range } => {
            if range.is_empty() {
                return None;
            }
            Some(format!(
                "{}:[{} TO {}]",
                field,
                bound(&range.from),
                bound(&range.to)
            ))
        }
    }
}

fn bound(ts: &Option<OffsetDateTime>) -> String {
    match ts {
        Some(t) => (t.unix_timestamp_nanos() / 1_000_000).to_string(),
        None => "*".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{DateRange, Term};
    use time::UtcOffset;
    use time::macros::date;

    fn registry() -> FilterRegistry {
        FilterRegistry::alerts()
    }

    #[test]
    fn test_empty_map_renders_empty() {
        assert_eq!(build_query(&registry(), &BTreeMap::new()), "");
    }

    #[test]
    fn test_terms_or_within_field() {
        let mut active = BTreeMap::new();
        active.insert(
            "status".to_string(),
            ActiveFilter::terms("status", ["New", "Updated"]),
        );
        assert_eq!(
            build_query(&registry(), &active),
            "(status:\"New\" OR status:\"Updated\")"
        );
    }

    #[test]
    fn test_conjunction_in_field_order() {
        let mut active = BTreeMap::new();
        active.insert("title".to_string(), ActiveFilter::text("title", "phish"));
        active.insert(
            "status".to_string(),
            ActiveFilter::terms("status", ["New"]),
        );
        // BTreeMap iterates status before title regardless of insert order
        assert_eq!(
            build_query(&registry(), &active),
            "(status:\"New\") AND title:\"phish\""
        );
    }

    #[test]
    fn test_keyword_renders_raw() {
        let mut active = BTreeMap::new();
        active.insert(
            "keyword".to_string(),
            ActiveFilter::text("keyword", "powershell"),
        );
        assert_eq!(build_query(&registry(), &active), "powershell");
    }

    #[test]
    fn test_date_range_bounds() {
        let range = DateRange::full_day(date!(2024 - 03 - 01), UtcOffset::UTC);
        let mut active = BTreeMap::new();
        active.insert("date".to_string(), ActiveFilter::range("date", range));
        assert_eq!(
            build_query(&registry(), &active),
            "date:[1709251200000 TO 1709337599999]"
        );
    }

    #[test]
    fn test_open_ended_range() {
        let range = DateRange {
            from: Some(
                date!(2024 - 03 - 01)
                    .midnight()
                    .assume_offset(UtcOffset::UTC),
            ),
            to: None,
        };
        let mut active = BTreeMap::new();
        active.insert("date".to_string(), ActiveFilter::range("date", range));
        assert_eq!(
            build_query(&registry(), &active),
            "date:[1709251200000 TO *]"
        );
    }

    #[test]
    fn test_empty_values_do_not_render() {
        let mut active = BTreeMap::new();
        active.insert("title".to_string(), ActiveFilter::text("title", ""));
        active.insert(
            "tags".to_string(),
            ActiveFilter {
                field: "tags".to_string(),
                value: FilterValue::Terms { values: Vec::new() },
            },
        );
        active.insert(
            "date".to_string(),
            ActiveFilter::range("date", DateRange::default()),
        );
        assert_eq!(build_query(&registry(), &active), "");
    }

    #[test]
    fn test_determinism_across_construction_order() {
        let mut a = BTreeMap::new();
        a.insert("status".to_string(), ActiveFilter::terms("status", ["New"]));
        a.insert(
            "tags".to_string(),
            ActiveFilter::terms("tags", ["phishing", "urgent"]),
        );

        let mut b = BTreeMap::new();
        b.insert(
            "tags".to_string(),
            ActiveFilter::terms("tags", ["phishing", "urgent"]),
        );
        b.insert("status".to_string(), ActiveFilter::terms("status", ["New"]));

        assert_eq!(build_query(&registry(), &a), build_query(&registry(), &b));
    }

    #[test]
    fn test_single_term_still_parenthesized() {
        let mut active = BTreeMap::new();
        active.insert(
            "severity".to_string(),
            ActiveFilter {
                field: "severity".to_string(),
                value: FilterValue::Terms {
                    values: vec![Term::new("3")],
                },
            },
        );
        assert_eq!(build_query(&registry(), &active), "(severity:\"3\")");
    }
}
