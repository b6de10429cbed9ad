//! Active filter values

use serde::{Deserialize, Serialize};
use time::macros::time;
use time::{Date, OffsetDateTime, UtcOffset};

/// One entry of a list facet; distinct by `text`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub text: String,
}

impl Term {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Half-open or closed time range; either bound may be absent.
///
/// Persisted as RFC 3339 so the millisecond bounds survive a context
/// round-trip and the rebuilt query stays byte-identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(with = "time::serde::rfc3339::option", default)]
    pub from: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option", default)]
    pub to: Option<OffsetDateTime>,
}

impl DateRange {
    /// The full calendar day containing `date`, in the caller's timezone:
    /// 00:00:00.000 through 23:59:59.999
    pub fn full_day(date: Date, offset: UtcOffset) -> Self {
        let from = date.with_time(time!(00:00:00)).assume_offset(offset);
        let to = date.with_time(time!(23:59:59.999)).assume_offset(offset);
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

/// Value of one active filter, discriminated by the facet kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FilterValue {
    Text { value: String },
    Terms { values: Vec<Term> },
    Range { range: DateRange },
}

/// One facet currently constraining the query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveFilter {
    pub field: String,
    pub value: FilterValue,
}

impl ActiveFilter {
    pub fn text(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: FilterValue::Text {
                value: value.into(),
            },
        }
    }

    pub fn terms<I, S>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            field: field.into(),
            value: FilterValue::Terms {
                values: values.into_iter().map(Term::new).collect(),
            },
        }
    }

    pub fn range(field: impl Into<String>, range: DateRange) -> Self {
        Self {
            field: field.into(),
            value: FilterValue::Range { range },
        }
    }
}
