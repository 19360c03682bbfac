//! Glue between edit sessions and a content store

use crate::error::StoreResult;
use crate::store::ContentStore;
use pagewright_editor::EditSession;
use pagewright_schema::SchemaRegistry;
use tracing::{info, warn};

/// Save the session's current page and mark it saved.
///
/// Returns whether the session is clean afterwards. On failure the session
/// is left untouched and stays dirty.
pub async fn publish(session: &mut EditSession, store: &dyn ContentStore) -> StoreResult<bool> {
    let (page, version) = session.snapshot();
    store.save_page(&page).await?;
    let clean = session.mark_saved(version);
    info!(page = %page.name, version, "Published page");
    Ok(clean)
}

/// Open a session on a stored page
pub async fn open_session(
    store: &dyn ContentStore,
    name: &str,
    history_limit: usize,
) -> StoreResult<EditSession> {
    let page = store.load_page(name).await?;
    Ok(EditSession::with_history_limit(page, history_limit))
}

/// Built-in schemas plus every custom schema in the store.
///
/// Custom schemas override built-ins of the same name. Schemas that fail to
/// load are skipped with a warning so one bad file cannot block editing.
pub async fn load_registry(store: &dyn ContentStore) -> StoreResult<SchemaRegistry> {
    let mut registry = SchemaRegistry::with_builtins();
    for name in store.list_schemas().await? {
        match store.load_schema(&name).await {
            Ok(schema) => registry.register_component(name, schema),
            Err(err) => warn!(component = %name, error = %err, "Skipping invalid component schema"),
        }
    }
    Ok(registry)
}
