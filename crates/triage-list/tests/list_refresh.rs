use std::sync::Arc;
use std::time::Duration;

use time::macros::datetime;
use triage_core::{AlertStatus, AlertSummary, RemoteError, Severity};
use triage_list::{AlertList, Phase, RefreshOutcome};
use triage_store::MemoryStore;

fn alert(id: &str, title: &str, status: AlertStatus, severity: Severity) -> AlertSummary {
    AlertSummary {
        id: id.to_string(),
        title: title.to_string(),
        alert_type: "external".to_string(),
        source: "misp".to_string(),
        source_ref: format!("ref-{}", id),
        status,
        severity,
        tlp: 2,
        follow: false,
        case_id: None,
        tags: Vec::new(),
        date: datetime!(2024-03-01 12:00 UTC),
        selected: false,
    }
}

fn seeded_store() -> Arc<MemoryStore> {
    Arc::new(MemoryStore::with_alerts(vec![
        alert("a1", "phishing campaign", AlertStatus::New, Severity::High),
        alert("a2", "malware drop", AlertStatus::Updated, Severity::Low),
        alert("a3", "c2 beacon", AlertStatus::Ignored, Severity::Critical),
    ]))
}

#[tokio::test]
async fn refresh_replaces_page_and_reports_ready() {
    let store = seeded_store();
    let list = AlertList::new(store, vec!["+title".to_string()], 15);

    assert_eq!(list.phase().await, Phase::Idle);
    let outcome = list.submit_query("").await.unwrap();
    assert_eq!(outcome, RefreshOutcome::Applied);
    assert_eq!(list.phase().await, Phase::Ready);
    assert_eq!(list.total().await, 3);
    let titles: Vec<_> = list.values().await.into_iter().map(|a| a.title).collect();
    assert_eq!(titles, ["c2 beacon", "malware drop", "phishing campaign"]);
}

#[tokio::test]
async fn identical_query_does_not_refetch() {
    let store = seeded_store();
    let list = AlertList::new(store.clone(), vec!["+title".to_string()], 15);

    list.submit_query("(status:\"New\")").await.unwrap();
    let outcome = list.submit_query("(status:\"New\")").await.unwrap();
    assert_eq!(outcome, RefreshOutcome::Unchanged);

    let searches = store.calls().iter().filter(|c| *c == "search").count();
    assert_eq!(searches, 1);
}

#[tokio::test]
async fn sort_toggles_direction_on_same_field() {
    let store = seeded_store();
    let list = AlertList::new(store, vec!["+title".to_string()], 15);
    list.submit_query("").await.unwrap();

    list.sort_by_field("title").await.unwrap();
    assert_eq!(list.sort().await, ["-title"]);

    list.sort_by_field("title").await.unwrap();
    assert_eq!(list.sort().await, ["+title"]);

    // a different column always starts ascending
    list.sort_by_field("severity").await.unwrap();
    assert_eq!(list.sort().await, ["+severity"]);
    let severities: Vec<_> = list
        .values()
        .await
        .into_iter()
        .map(|a| a.severity)
        .collect();
    assert_eq!(severities, [Severity::Low, Severity::High, Severity::Critical]);
}

#[tokio::test]
async fn failed_refresh_retains_last_page() {
    let store = seeded_store();
    let list = AlertList::new(store.clone(), vec!["+title".to_string()], 15);
    list.submit_query("").await.unwrap();
    assert_eq!(list.values().await.len(), 3);

    store.fail("search", RemoteError::with_status(500, "search backend down"));
    let err = list.refresh().await.unwrap_err();
    assert_eq!(err.status, Some(500));

    assert_eq!(list.phase().await, Phase::Idle);
    assert_eq!(list.values().await.len(), 3);
}

#[tokio::test]
async fn superseded_response_never_overwrites_newer_one() {
    let store = seeded_store();
    let list = Arc::new(AlertList::new(
        store.clone(),
        vec!["+title".to_string()],
        15,
    ));

    // the first fetch is slow; a second filter lands while it is in flight
    store.delay_next_search(Duration::from_millis(200));

    let slow = {
        let list = list.clone();
        tokio::spawn(async move { list.submit_query("(status:\"New\")").await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;
    let fast = list.submit_query("(status:\"Updated\")").await.unwrap();
    assert_eq!(fast, RefreshOutcome::Applied);

    let slow = slow.await.unwrap().unwrap();
    assert_eq!(slow, RefreshOutcome::Superseded);

    let ids: Vec<_> = list.values().await.into_iter().map(|a| a.id).collect();
    assert_eq!(ids, ["a2"]);
}

#[tokio::test]
async fn page_size_change_refetches() {
    let store = seeded_store();
    let list = AlertList::new(store.clone(), vec!["+title".to_string()], 2);
    list.submit_query("").await.unwrap();
    assert_eq!(list.values().await.len(), 2);
    assert_eq!(list.total().await, 3);

    list.set_page_size(15).await.unwrap();
    assert_eq!(list.values().await.len(), 3);
}

#[tokio::test]
async fn selection_and_menu_follow_toggles() {
    let store = seeded_store();
    let list = AlertList::new(store, vec!["+title".to_string()], 15);
    list.submit_query("").await.unwrap();

    let menu = list.select("a1", true).await;
    assert!(menu.follow);
    assert!(menu.mark_as_read);

    // adding the Ignored alert makes mark-as-read illegal
    let menu = list.select("a3", true).await;
    assert!(!menu.mark_as_read);
    assert_eq!(list.selected_ids().await, ["a1", "a3"]);

    let menu = list.select("a3", false).await;
    assert!(menu.mark_as_read);
    assert_eq!(list.selected_ids().await, ["a1"]);
}

#[tokio::test]
async fn select_all_is_page_scoped_and_survives_refresh() {
    let store = seeded_store();
    let list = AlertList::new(store, vec!["+title".to_string()], 2);
    list.submit_query("").await.unwrap();

    let menu = list.set_select_all(true).await;
    assert!(menu.select_all);
    assert_eq!(list.selection().await.len(), 2);

    // the flag re-selects the freshly fetched page
    list.refresh().await.unwrap();
    assert_eq!(list.selection().await.len(), 2);

    let menu = list.set_select_all(false).await;
    assert!(!menu.select_all);
    assert!(list.selection().await.is_empty());
}

#[tokio::test]
async fn refresh_without_select_all_clears_selection() {
    let store = seeded_store();
    let list = AlertList::new(store, vec!["+title".to_string()], 15);
    list.submit_query("").await.unwrap();

    list.select("a1", true).await;
    assert_eq!(list.selection().await.len(), 1);

    list.refresh().await.unwrap();
    assert!(list.selection().await.is_empty());
    assert_eq!(list.menu().await, triage_select::MenuState::default());
}
