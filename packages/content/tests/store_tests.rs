//! Content store integration tests

use pagewright_common::{ComponentTree, IdGenerator, PageDocument, PropValue, Props};
use pagewright_content::{
    load_registry, open_session, publish, ChangeKind, ContentStore, FsContentStore,
    MemoryContentStore, RemotePoller, StoreError,
};
use pagewright_editor::{EditorAction, DEFAULT_HISTORY_LIMIT};
use pagewright_schema::{AllowedChildren, ComponentSchema, PropSchema};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

fn hero_schema() -> ComponentSchema {
    ComponentSchema::new("Hero", "Landing banner")
        .prop("headline", PropSchema::string().required())
        .children(AllowedChildren::only(["Button"]))
}

async fn exercise_store(store: &dyn ContentStore) -> anyhow::Result<()> {
    let mut ids = IdGenerator::new();
    let page = PageDocument::new_page("home", "Home", &mut ids)?;
    store.save_page(&page).await?;

    let loaded = store.load_page("home").await?;
    assert_eq!(loaded, page);
    assert_eq!(loaded.components.len(), 1);
    assert_eq!(loaded.components.roots()[0].component_type, "Container");

    let again = PageDocument::new_page("home", "Other", &mut ids)?;
    assert!(matches!(
        store.create_page(&again).await,
        Err(StoreError::PageExists(name)) if name == "home"
    ));
    assert_eq!(store.load_page("home").await?.title, "Home");

    store
        .create_page(&PageDocument::new("about", "About", ComponentTree::empty()))
        .await?;
    assert_eq!(store.list_pages().await?, vec!["about", "home"]);

    store.delete_page("about").await?;
    assert_eq!(store.list_pages().await?, vec!["home"]);
    assert!(matches!(
        store.load_page("about").await,
        Err(StoreError::PageNotFound(_))
    ));

    store.save_schema(&hero_schema()).await?;
    assert_eq!(store.list_schemas().await?, vec!["Hero"]);
    assert_eq!(store.load_schema("Hero").await?, hero_schema());

    assert!(store.revision("pages/home.json").await?.is_some());
    assert!(store.revision("pages/about.json").await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_fs_store_round_trip() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let store = FsContentStore::new(dir.path().join("content"));
    store.init().await?;
    exercise_store(&store).await
}

#[tokio::test]
async fn test_memory_store_round_trip() -> anyhow::Result<()> {
    exercise_store(&MemoryContentStore::new()).await
}

#[tokio::test]
async fn test_page_names_are_slugs() {
    let store = MemoryContentStore::new();
    let page = PageDocument::new("../etc/passwd", "x", ComponentTree::empty());

    assert!(store.save_page(&page).await.is_err());
    assert!(store.load_page("Home Page").await.is_err());
    assert!(store.list_pages().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_publish_marks_session_clean() -> anyhow::Result<()> {
    let store = MemoryContentStore::new();
    let mut ids = IdGenerator::new();
    let page = PageDocument::new_page("home", "Home", &mut ids)?;
    let root_id = page.components.roots()[0].id.clone();
    store.save_page(&page).await?;

    let registry = load_registry(&store).await?;
    let mut session = open_session(&store, "home", DEFAULT_HISTORY_LIMIT).await?;
    let heading = session.add_component("Heading", Some(root_id.as_str()), &registry)?;
    let props = Props::from([("text".to_string(), PropValue::from("Welcome"))]);
    session.dispatch(EditorAction::SetProps(props), &registry)?;
    assert!(session.is_dirty());

    assert!(publish(&mut session, &store).await?);
    assert!(!session.is_dirty());

    let saved = store.load_page("home").await?;
    assert_eq!(&saved.components, session.tree());
    assert_eq!(session.selected_id(), Some(heading.as_str()));
    Ok(())
}

#[tokio::test]
async fn test_failed_publish_keeps_session_dirty() -> anyhow::Result<()> {
    let store = MemoryContentStore::new();
    let page = PageDocument::new("Bad Name", "x", ComponentTree::empty());
    let mut session = pagewright_editor::EditSession::new(page);
    session.set_title("Renamed");

    assert!(publish(&mut session, &store).await.is_err());
    assert!(session.is_dirty());
    Ok(())
}

#[tokio::test]
async fn test_registry_includes_custom_schemas() -> anyhow::Result<()> {
    let store = MemoryContentStore::new();
    store.save_schema(&hero_schema()).await?;
    store.write_raw("components/Broken.json", "{ not json")?;

    let registry = load_registry(&store).await?;
    assert!(registry.contains("Hero"));
    assert!(registry.contains("Container"));
    assert!(!registry.contains("Broken"));
    assert!(registry.can_contain_child("Hero", "Button"));
    assert!(!registry.can_contain_child("Hero", "Heading"));
    Ok(())
}

#[tokio::test]
async fn test_poller_streams_changes_until_shutdown() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let store = FsContentStore::new(dir.path());
    store.init().await?;
    store
        .save_page(&PageDocument::new("home", "Home", ComponentTree::empty()))
        .await?;

    let mut handle = RemotePoller::new(Arc::new(store.clone()), Duration::from_millis(20)).spawn();

    // Let the baseline poll run before editing
    tokio::time::sleep(Duration::from_millis(60)).await;
    store
        .save_page(&PageDocument::new("home", "Welcome", ComponentTree::empty()))
        .await?;

    let event = tokio::time::timeout(Duration::from_secs(5), handle.events.recv())
        .await?
        .expect("poller closed its channel");
    assert_eq!(event.path, "pages/home.json");
    assert_eq!(event.kind, ChangeKind::Modified);

    handle.shutdown().await;
    Ok(())
}
