use std::sync::Arc;

use anyhow::Result;
use triage_actions::{BulkAction, Coordinator};
use triage_config::Config;
use triage_core::Notifier;
use triage_list::AlertList;
use triage_store::HttpStore;

use crate::notify::TracingNotifier;

pub async fn handle(action: BulkAction, ids: Vec<String>, config: &Config) -> Result<()> {
    let store = Arc::new(HttpStore::new(
        &config.server.base_url,
        config.server.api_key.clone(),
    )?);
    let list = Arc::new(AlertList::new(
        store.clone(),
        config.list.sort.clone(),
        config.list.page_size,
    ));
    let notifier: Arc<dyn Notifier> = Arc::new(TracingNotifier);
    let coordinator = Coordinator::new(store, list, notifier);

    coordinator.bulk_apply(action, &ids).await?;
    Ok(())
}
