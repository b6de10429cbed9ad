//! In-memory implementation of the store traits
//!
//! Backs integration tests and offline demos. Supports injecting a failure
//! for a specific call and artificial search latency, and records every
//! call so tests can assert which remote operations actually ran.
//!
//! The query language is approximated: every quoted term of the filter
//! expression must match one of the alert's facet fields. That is enough
//! for list tests with distinct fixtures; it is not a query parser.

use std::cmp::Ordering;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use triage_core::{
    AlertPage, AlertStatus, AlertSummary, Case, CaseDraft, CaseQuery, CaseTemplate, RemoteError,
};

use crate::store::{AlertStore, CaseStore, SearchRequest};

#[derive(Default)]
struct Inner {
    alerts: Vec<AlertSummary>,
    cases: Vec<Case>,
    templates: Vec<CaseTemplate>,
    next_case_number: u32,
    calls: Vec<String>,
    failures: HashMap<String, RemoteError>,
    search_delays: VecDeque<Duration>,
}

pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                next_case_number: 1,
                ..Inner::default()
            }),
        }
    }

    pub fn with_alerts(alerts: Vec<AlertSummary>) -> Self {
        let store = Self::new();
        store.inner.lock().unwrap().alerts = alerts;
        store
    }

    pub fn add_alert(&self, alert: AlertSummary) {
        self.inner.lock().unwrap().alerts.push(alert);
    }

    pub fn add_case(&self, case: Case) {
        let mut inner = self.inner.lock().unwrap();
        inner.next_case_number = inner.next_case_number.max(case.number + 1);
        inner.cases.push(case);
    }

    pub fn add_template(&self, template: CaseTemplate) {
        self.inner.lock().unwrap().templates.push(template);
    }

    /// Make one upcoming call fail. Per-alert operations are keyed
    /// `"<op>:<id>"` (e.g. `"follow:a2"`), bulk operations by bare name
    /// (e.g. `"bulkRemove"`). The failure is consumed by the first match.
    pub fn fail(&self, key: impl Into<String>, err: RemoteError) {
        self.inner.lock().unwrap().failures.insert(key.into(), err);
    }

    /// Queue an artificial delay applied to the next search, FIFO
    pub fn delay_next_search(&self, delay: Duration) {
        self.inner.lock().unwrap().search_delays.push_back(delay);
    }

    pub fn calls(&self) -> Vec<String> {
        self.inner.lock().unwrap().calls.clone()
    }

    /// Calls that mutate remote state (everything except reads)
    pub fn mutation_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| {
                let name = c.split(':').next().unwrap_or(c);
                !matches!(name, "search" | "caseTemplates" | "findCases")
            })
            .collect()
    }

    pub fn alert(&self, id: &str) -> Option<AlertSummary> {
        self.inner
            .lock()
            .unwrap()
            .alerts
            .iter()
            .find(|a| a.id == id)
            .cloned()
    }

    fn check_failure(&self, key: &str) -> Result<(), RemoteError> {
        if let Some(err) = self.inner.lock().unwrap().failures.remove(key) {
            return Err(err);
        }
        Ok(())
    }

    fn record(&self, call: String) {
        self.inner.lock().unwrap().calls.push(call);
    }

    fn update_alert(
        &self,
        id: &str,
        op: &str,
        apply: impl FnOnce(&mut AlertSummary),
    ) -> Result<(), RemoteError> {
        self.record(format!("{}:{}", op, id));
        self.check_failure(&format!("{}:{}", op, id))?;

        let mut inner = self.inner.lock().unwrap();
        match inner.alerts.iter_mut().find(|a| a.id == id) {
            Some(alert) => {
                apply(alert);
                Ok(())
            }
            None => Err(RemoteError::with_status(404, format!("alert {} not found", id))),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn quoted_terms(clause: &str) -> Vec<&str> {
    clause.split('"').skip(1).step_by(2).collect()
}

/// Conjunction of clauses; within a clause any quoted term may match
/// (mirrors the serializer's OR-within-field, AND-across-fields shape).
/// Clauses without quoted terms (keyword text, date ranges) pass.
fn matches(alert: &AlertSummary, filter: &str) -> bool {
    filter.split(" AND ").all(|clause| {
        let terms = quoted_terms(clause);
        terms.is_empty() || terms.iter().any(|term| field_matches(alert, term))
    })
}

fn field_matches(alert: &AlertSummary, term: &str) -> bool {
    alert.title.contains(term)
        || alert.status.as_str() == term
        || alert.source == term
        || alert.source_ref == term
        || alert.alert_type == term
        || alert.severity.code().to_string() == term
        || alert.tags.iter().any(|t| t == term)
}

fn order_by(values: &mut [AlertSummary], sort: &[String]) {
    values.sort_by(|a, b| {
        for key in sort {
            let (descending, field) = match key.strip_prefix('-') {
                Some(f) => (true, f),
                None => (false, key.strip_prefix('+').unwrap_or(key.as_str())),
            };
            let ord = match field {
                "date" => a.date.cmp(&b.date),
                "title" => a.title.cmp(&b.title),
                "severity" => a.severity.cmp(&b.severity),
                "status" => a.status.as_str().cmp(b.status.as_str()),
                "source" => a.source.cmp(&b.source),
                _ => Ordering::Equal,
            };
            let ord = if descending { ord.reverse() } else { ord };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    });
}

#[async_trait]
impl AlertStore for MemoryStore {
    async fn search(&self, request: &SearchRequest) -> Result<AlertPage, RemoteError> {
        self.record("search".to_string());

        let delay = self.inner.lock().unwrap().search_delays.pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.check_failure("search")?;

        let inner = self.inner.lock().unwrap();
        let mut values: Vec<AlertSummary> = inner
            .alerts
            .iter()
            .filter(|a| request.filter.is_empty() || matches(a, &request.filter))
            .cloned()
            .collect();
        drop(inner);

        order_by(&mut values, &request.sort);
        let total = values.len() as u64;
        if !request.load_all {
            values.truncate(request.page_size as usize);
        }

        Ok(AlertPage { values, total })
    }

    async fn follow(&self, id: &str) -> Result<(), RemoteError> {
        self.update_alert(id, "follow", |a| a.follow = true)
    }

    async fn unfollow(&self, id: &str) -> Result<(), RemoteError> {
        self.update_alert(id, "unfollow", |a| a.follow = false)
    }

    async fn mark_as_read(&self, id: &str) -> Result<(), RemoteError> {
        self.update_alert(id, "markAsRead", |a| a.status = AlertStatus::Ignored)
    }

    async fn mark_as_unread(&self, id: &str) -> Result<(), RemoteError> {
        self.update_alert(id, "markAsUnread", |a| a.status = AlertStatus::New)
    }

    async fn bulk_remove(&self, ids: &[String]) -> Result<(), RemoteError> {
        self.record(format!("bulkRemove:{}", ids.join(",")));
        self.check_failure("bulkRemove")?;

        let mut inner = self.inner.lock().unwrap();
        inner.alerts.retain(|a| !ids.contains(&a.id));
        Ok(())
    }

    async fn bulk_merge_into(&self, ids: &[String], case_id: &str) -> Result<String, RemoteError> {
        self.record(format!("bulkMergeInto:{}", case_id));
        self.check_failure("bulkMergeInto")?;

        let mut inner = self.inner.lock().unwrap();
        if !inner.cases.iter().any(|c| c.id == case_id) {
            return Err(RemoteError::with_status(404, format!("case {} not found", case_id)));
        }
        for alert in inner.alerts.iter_mut().filter(|a| ids.contains(&a.id)) {
            alert.status = AlertStatus::Imported;
            alert.case_id = Some(case_id.to_string());
        }
        Ok(case_id.to_string())
    }
}

#[async_trait]
impl CaseStore for MemoryStore {
    async fn case_templates(&self) -> Result<Vec<CaseTemplate>, RemoteError> {
        self.record("caseTemplates".to_string());
        self.check_failure("caseTemplates")?;
        Ok(self.inner.lock().unwrap().templates.clone())
    }

    async fn create_case(&self, draft: &CaseDraft) -> Result<Case, RemoteError> {
        self.record(format!("createCase:{}", draft.title));
        self.check_failure("createCase")?;

        let mut inner = self.inner.lock().unwrap();
        let case = Case {
            id: uuid::Uuid::new_v4().to_string(),
            number: inner.next_case_number,
            title: draft.title.clone(),
            severity: draft.severity,
        };
        inner.next_case_number += 1;
        inner.cases.push(case.clone());
        Ok(case)
    }

    async fn find_cases(&self, query: &CaseQuery) -> Result<Vec<Case>, RemoteError> {
        self.record("findCases".to_string());
        self.check_failure("findCases")?;

        let inner = self.inner.lock().unwrap();
        let found = match query {
            CaseQuery::ByTitle(input) => inner
                .cases
                .iter()
                .filter(|c| c.title.contains(input.as_str()))
                .cloned()
                .collect(),
            CaseQuery::ByNumber(input) => match input.parse::<u32>() {
                Ok(number) => inner
                    .cases
                    .iter()
                    .filter(|c| c.number == number)
                    .cloned()
                    .collect(),
                Err(_) => Vec::new(),
            },
        };
        Ok(found)
    }
}
