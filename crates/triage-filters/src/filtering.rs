//! Filter model
//!
//! Owns the active-filter map and the persisted view context for one list
//! view. Every mutating operation is async and resolves only once the
//! context has been written back to the store; callers re-derive the query
//! and refetch after that completion, never concurrently with it.

use std::collections::BTreeMap;

use time::macros::format_description;
use time::{Date, UtcOffset};
use tracing::warn;
use triage_storage::ContextStore;

use crate::definition::{FilterKind, FilterRegistry};
use crate::error::{FilterError, Result};
use crate::query;
use crate::value::{ActiveFilter, DateRange, FilterValue, Term};

/// Per-view state persisted under the section key
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewContext {
    pub show_filters: bool,
    pub show_stats: bool,
    pub page_size: u32,
    pub sort: Vec<String>,
    #[serde(default)]
    pub active_filters: BTreeMap<String, ActiveFilter>,
}

impl Default for ViewContext {
    fn default() -> Self {
        Self {
            show_filters: false,
            show_stats: false,
            page_size: 15,
            sort: vec!["-date".to_string()],
            active_filters: BTreeMap::new(),
        }
    }
}

pub struct Filtering {
    section: String,
    registry: FilterRegistry,
    store: ContextStore,
    /// Timezone used to expand a clicked calendar date into a full-day range
    utc_offset: UtcOffset,
    context: ViewContext,
}

impl Filtering {
    /// Restore the view context from the store, seeding the default filter
    /// set on first activation.
    pub async fn new(
        section: impl Into<String>,
        registry: FilterRegistry,
        store: ContextStore,
        utc_offset: UtcOffset,
    ) -> Result<Self> {
        let section = section.into();
        let context = match store.load(&section).await? {
            Some(raw) => match serde_json::from_value::<ViewContext>(raw) {
                Ok(context) => context,
                Err(e) => {
                    warn!(section = %section, error = %e, "discarding unreadable view context");
                    Self::seeded_context(&registry)
                }
            },
            None => Self::seeded_context(&registry),
        };

        Ok(Self {
            section,
            registry,
            store,
            utc_offset,
            context,
        })
    }

    fn seeded_context(registry: &FilterRegistry) -> ViewContext {
        ViewContext {
            active_filters: registry.default_filters(),
            ..ViewContext::default()
        }
    }

    pub fn registry(&self) -> &FilterRegistry {
        &self.registry
    }

    pub fn active(&self) -> &BTreeMap<String, ActiveFilter> {
        &self.context.active_filters
    }

    pub fn page_size(&self) -> u32 {
        self.context.page_size
    }

    pub fn sort(&self) -> &[String] {
        &self.context.sort
    }

    pub fn show_filters(&self) -> bool {
        self.context.show_filters
    }

    pub fn show_stats(&self) -> bool {
        self.context.show_stats
    }

    /// Serialize all active filters into one query expression
    pub fn build_query(&self) -> String {
        query::build_query(&self.registry, &self.context.active_filters)
    }

    /// Add one raw value to a facet.
    ///
    /// List facets append (idempotently, exact text match), date facets
    /// replace with the full-day range containing the value, text facets
    /// replace. A conversion miss or an unparseable date is dropped
    /// without error.
    pub async fn add_filter_value(&mut self, field: &str, raw: &str) -> Result<()> {
        let def = self
            .registry
            .get(field)
            .ok_or_else(|| FilterError::UnknownField(field.to_string()))?;

        let stored = match def.convert {
            Some(convert) => match convert(raw) {
                Some(v) => v,
                None => return Ok(()),
            },
            None => raw.to_string(),
        };

        let changed = match def.kind {
            FilterKind::Terms => self.append_term(field, stored),
            FilterKind::Date => match parse_date(&stored) {
                Some(date) => {
                    let range = DateRange::full_day(date, self.utc_offset);
                    self.context
                        .active_filters
                        .insert(field.to_string(), ActiveFilter::range(field, range));
                    true
                }
                None => false,
            },
            FilterKind::Text => {
                self.context
                    .active_filters
                    .insert(field.to_string(), ActiveFilter::text(field, stored));
                true
            }
        };

        if changed {
            self.persist().await?;
        }
        Ok(())
    }

    fn append_term(&mut self, field: &str, text: String) -> bool {
        match self.context.active_filters.get_mut(field) {
            Some(ActiveFilter {
                value: FilterValue::Terms { values },
                ..
            }) => {
                if values.iter().any(|t| t.text == text) {
                    return false;
                }
                values.push(Term::new(text));
                true
            }
            _ => {
                self.context.active_filters.insert(
                    field.to_string(),
                    ActiveFilter {
                        field: field.to_string(),
                        value: FilterValue::Terms {
                            values: vec![Term::new(text)],
                        },
                    },
                );
                true
            }
        }
    }

    /// Drop one facet; no-op when absent
    pub async fn remove_filter(&mut self, field: &str) -> Result<()> {
        if self.context.active_filters.remove(field).is_some() {
            self.persist().await?;
        }
        Ok(())
    }

    /// Reset to the registry's default filter set, not to empty
    pub async fn clear_filters(&mut self) -> Result<()> {
        self.context.active_filters = self.registry.default_filters();
        self.persist().await
    }

    pub async fn set_sort(&mut self, sort: Vec<String>) -> Result<()> {
        self.context.sort = sort;
        self.persist().await
    }

    pub async fn set_page_size(&mut self, page_size: u32) -> Result<()> {
        self.context.page_size = page_size;
        self.persist().await
    }

    pub async fn toggle_filters(&mut self) -> Result<()> {
        self.context.show_filters = !self.context.show_filters;
        self.persist().await
    }

    pub async fn toggle_stats(&mut self) -> Result<()> {
        self.context.show_stats = !self.context.show_stats;
        self.persist().await
    }

    /// Clear, then constrain to a single status
    pub async fn filter_by_status(&mut self, status: &str) -> Result<()> {
        self.clear_filters().await?;
        self.context.active_filters.remove("status");
        self.add_filter_value("status", status).await
    }

    /// Clear, then constrain to fresh alerts
    pub async fn filter_by_new_and_updated(&mut self) -> Result<()> {
        self.clear_filters().await
    }

    /// Constrain to one severity given its numeric code; unknown codes are
    /// dropped silently, matching the conversion contract.
    pub async fn filter_by_severity(&mut self, code: u8) -> Result<()> {
        match triage_core::Severity::from_code(code) {
            Some(severity) => self.add_filter_value("severity", severity.label()).await,
            None => Ok(()),
        }
    }

    async fn persist(&self) -> Result<()> {
        let data = serde_json::to_value(&self.context)?;
        self.store.save(&self.section, &data).await?;
        Ok(())
    }
}

fn parse_date(raw: &str) -> Option<Date> {
    let format = format_description!("[year]-[month]-[day]");
    Date::parse(raw, &format).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn filtering() -> Filtering {
        let store = ContextStore::in_memory().await.unwrap();
        Filtering::new("alert-section", FilterRegistry::alerts(), store, UtcOffset::UTC)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_first_activation_seeds_defaults() {
        let f = filtering().await;
        assert_eq!(
            f.build_query(),
            "(status:\"New\" OR status:\"Updated\")"
        );
        assert_eq!(f.page_size(), 15);
        assert_eq!(f.sort(), ["-date"]);
    }

    #[tokio::test]
    async fn test_add_term_is_idempotent() {
        let mut f = filtering().await;
        f.add_filter_value("tags", "phishing").await.unwrap();
        f.add_filter_value("tags", "phishing").await.unwrap();
        f.add_filter_value("tags", "urgent").await.unwrap();

        match &f.active()["tags"].value {
            FilterValue::Terms { values } => {
                let texts: Vec<_> = values.iter().map(|t| t.text.as_str()).collect();
                assert_eq!(texts, ["phishing", "urgent"]);
            }
            other => panic!("unexpected value: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_query_deterministic_across_call_order() {
        let mut a = filtering().await;
        a.add_filter_value("tags", "phishing").await.unwrap();
        a.add_filter_value("title", "campaign").await.unwrap();

        let mut b = filtering().await;
        b.add_filter_value("title", "campaign").await.unwrap();
        b.add_filter_value("tags", "phishing").await.unwrap();

        assert_eq!(a.build_query(), b.build_query());
    }

    #[tokio::test]
    async fn test_severity_label_converted_to_code() {
        let mut f = filtering().await;
        f.add_filter_value("severity", "High").await.unwrap();
        assert!(f.build_query().contains("severity:\"3\""));
    }

    #[tokio::test]
    async fn test_unmapped_severity_is_dropped() {
        let mut f = filtering().await;
        f.add_filter_value("severity", "Catastrophic").await.unwrap();
        assert!(!f.active().contains_key("severity"));
    }

    #[tokio::test]
    async fn test_date_click_becomes_full_day_range() {
        let mut f = filtering().await;
        f.add_filter_value("date", "2024-03-01").await.unwrap();
        match &f.active()["date"].value {
            FilterValue::Range { range } => {
                assert_eq!(
                    range.from.unwrap(),
                    time::macros::datetime!(2024-03-01 00:00:00 UTC)
                );
                assert_eq!(
                    range.to.unwrap(),
                    time::macros::datetime!(2024-03-01 23:59:59.999 UTC)
                );
            }
            other => panic!("unexpected value: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unparseable_date_is_dropped() {
        let mut f = filtering().await;
        f.add_filter_value("date", "yesterday").await.unwrap();
        assert!(!f.active().contains_key("date"));
    }

    #[tokio::test]
    async fn test_clear_restores_defaults_not_empty() {
        let mut f = filtering().await;
        f.remove_filter("status").await.unwrap();
        f.add_filter_value("tags", "phishing").await.unwrap();
        f.clear_filters().await.unwrap();

        assert_eq!(f.active().len(), 1);
        assert!(f.active().contains_key("status"));
    }

    #[tokio::test]
    async fn test_remove_filter_is_noop_when_absent() {
        let mut f = filtering().await;
        f.remove_filter("tags").await.unwrap();
        f.remove_filter("status").await.unwrap();
        assert_eq!(f.build_query(), "");
    }

    #[tokio::test]
    async fn test_unknown_field_is_an_error() {
        let mut f = filtering().await;
        let err = f.add_filter_value("nope", "x").await.unwrap_err();
        assert!(matches!(err, FilterError::UnknownField(_)));
    }

    #[tokio::test]
    async fn test_context_round_trips_through_store() {
        let store = ContextStore::in_memory().await.unwrap();
        {
            let mut f = Filtering::new(
                "alert-section",
                FilterRegistry::alerts(),
                store.clone(),
                UtcOffset::UTC,
            )
            .await
            .unwrap();
            f.add_filter_value("tags", "phishing").await.unwrap();
            f.set_page_size(30).await.unwrap();
            f.set_sort(vec!["+severity".to_string()]).await.unwrap();
        }

        let restored = Filtering::new(
            "alert-section",
            FilterRegistry::alerts(),
            store,
            UtcOffset::UTC,
        )
        .await
        .unwrap();
        assert_eq!(restored.page_size(), 30);
        assert_eq!(restored.sort(), ["+severity"]);
        assert!(restored.active().contains_key("tags"));
        assert!(restored.active().contains_key("status"));
    }

    #[tokio::test]
    async fn test_filter_by_status_replaces_default() {
        let mut f = filtering().await;
        f.filter_by_status("Ignored").await.unwrap();
        assert_eq!(f.build_query(), "(status:\"Ignored\")");
    }
}
