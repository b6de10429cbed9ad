//! Facet catalogue
//!
//! Each filterable attribute of an alert is declared once here: its value
//! kind, display label, how text values are rendered into the query, and an
//! optional pure conversion applied before storage. The serializer stays a
//! plain dispatch on kind; anything facet-specific is declared on the
//! definition instead of coded into the serializer.

use std::collections::BTreeMap;

use triage_core::Severity;

use crate::value::{ActiveFilter, Term};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Text,
    Terms,
    Date,
}

/// How a text facet appears in the query expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextRender {
    /// `field:"value"`
    #[default]
    Quoted,
    /// The raw text itself, for the free-text keyword facet
    Raw,
}

#[derive(Debug, Clone)]
pub struct FilterDefinition {
    pub field: &'static str,
    pub kind: FilterKind,
    pub label: &'static str,
    pub text_render: TextRender,
    /// Pure conversion from display value to stored value; a `None` result
    /// means the raw value has no mapping and is silently dropped
    pub convert: Option<fn(&str) -> Option<String>>,
}

impl FilterDefinition {
    fn new(field: &'static str, kind: FilterKind, label: &'static str) -> Self {
        Self {
            field,
            kind,
            label,
            text_render: TextRender::Quoted,
            convert: None,
        }
    }

    fn raw_text(mut self) -> Self {
        self.text_render = TextRender::Raw;
        self
    }

    fn with_convert(mut self, convert: fn(&str) -> Option<String>) -> Self {
        self.convert = Some(convert);
        self
    }
}

fn severity_to_code(label: &str) -> Option<String> {
    Severity::from_label(label).map(|s| s.code().to_string())
}

/// Static catalogue of facets for one list view
#[derive(Debug, Clone)]
pub struct FilterRegistry {
    defs: Vec<FilterDefinition>,
}

impl FilterRegistry {
    /// The alert queue facets
    pub fn alerts() -> Self {
        Self {
            defs: vec![
                FilterDefinition::new("keyword", FilterKind::Text, "Keyword").raw_text(),
                FilterDefinition::new("status", FilterKind::Terms, "Status"),
                FilterDefinition::new("tags", FilterKind::Terms, "Tags"),
                FilterDefinition::new("source", FilterKind::Terms, "Source"),
                FilterDefinition::new("type", FilterKind::Terms, "Type"),
                FilterDefinition::new("severity", FilterKind::Terms, "Severity")
                    .with_convert(severity_to_code),
                FilterDefinition::new("title", FilterKind::Text, "Title"),
                FilterDefinition::new("sourceRef", FilterKind::Text, "Reference"),
                FilterDefinition::new("date", FilterKind::Date, "Date"),
            ],
        }
    }

    pub fn get(&self, field: &str) -> Option<&FilterDefinition> {
        self.defs.iter().find(|d| d.field == field)
    }

    pub fn definitions(&self) -> &[FilterDefinition] {
        &self.defs
    }

    /// The filter set restored by `clear_filters`: fresh and updated alerts
    pub fn default_filters(&self) -> BTreeMap<String, ActiveFilter> {
        let mut active = BTreeMap::new();
        active.insert(
            "status".to_string(),
            ActiveFilter {
                field: "status".to_string(),
                value: crate::value::FilterValue::Terms {
                    values: vec![Term::new("New"), Term::new("Updated")],
                },
            },
        );
        active
    }
}
