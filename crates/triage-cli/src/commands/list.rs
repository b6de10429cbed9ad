use std::sync::Arc;

use anyhow::Result;
use time::UtcOffset;
use triage_config::Config;
use triage_filters::{FilterRegistry, Filtering};
use triage_list::AlertList;
use triage_storage::ContextStore;
use triage_store::HttpStore;

use crate::cli::ListArgs;

const SECTION: &str = "alert-section";

pub async fn handle(args: ListArgs, config: &Config) -> Result<()> {
    let context_store = ContextStore::new(None).await?;
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    let mut filtering =
        Filtering::new(SECTION, FilterRegistry::alerts(), context_store, offset).await?;

    if args.reset {
        filtering.clear_filters().await?;
    }
    apply_filters(&mut filtering, &args).await?;

    if let Some(page_size) = args.page_size {
        filtering.set_page_size(page_size).await?;
    }
    if let Some(field) = &args.sort {
        filtering.set_sort(vec![format!("+{}", field)]).await?;
    }

    let store = Arc::new(HttpStore::new(
        &config.server.base_url,
        config.server.api_key.clone(),
    )?);
    let list = AlertList::new(store, filtering.sort().to_vec(), filtering.page_size());

    let query = filtering.build_query();
    list.submit_query(&query).await?;

    let values = list.values().await;
    println!(
        "{} of {} alerts{}",
        values.len(),
        list.total().await,
        if query.is_empty() {
            String::new()
        } else {
            format!("  [{}]", query)
        }
    );
    for alert in values {
        println!(
            "{}  {:<8}  {:<8}  {}{}",
            alert.id,
            alert.severity.label(),
            alert.status.as_str(),
            alert.title,
            alert
                .case_id
                .as_deref()
                .map(|c| format!("  (case {})", c))
                .unwrap_or_default()
        );
    }

    Ok(())
}

async fn apply_filters(filtering: &mut Filtering, args: &ListArgs) -> Result<()> {
    if let Some(keyword) = &args.keyword {
        filtering.add_filter_value("keyword", keyword).await?;
    }
    for status in &args.status {
        filtering.add_filter_value("status", status).await?;
    }
    for tag in &args.tag {
        filtering.add_filter_value("tags", tag).await?;
    }
    for source in &args.source {
        filtering.add_filter_value("source", source).await?;
    }
    for alert_type in &args.alert_type {
        filtering.add_filter_value("type", alert_type).await?;
    }
    for severity in &args.severity {
        filtering.add_filter_value("severity", severity).await?;
    }
    if let Some(title) = &args.title {
        filtering.add_filter_value("title", title).await?;
    }
    if let Some(reference) = &args.reference {
        filtering.add_filter_value("sourceRef", reference).await?;
    }
    if let Some(date) = &args.date {
        filtering.add_filter_value("date", date).await?;
    }
    Ok(())
}
