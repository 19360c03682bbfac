//! # Content Store
//!
//! Persistence boundary for pages and custom component schemas.
//!
//! Layout under the content root:
//!
//! ```text
//! content/
//!   pages/<name>.json         PageDocument
//!   components/<Name>.json    ComponentSchema
//! ```
//!
//! Every path handed to or returned from a store is relative to the content
//! root and uses `/` separators, so paths double as change keys.

use crate::error::{StoreError, StoreResult};
use async_trait::async_trait;
use pagewright_common::{page_path, schema_path, PageDocument, COMPONENTS_DIR, PAGES_DIR};
use pagewright_schema::ComponentSchema;

/// Content fingerprint used to detect changes between polls
pub type Revision = u32;

#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn load_page(&self, name: &str) -> StoreResult<PageDocument>;

    /// Write a page, replacing any previous version
    async fn save_page(&self, page: &PageDocument) -> StoreResult<()>;

    /// Page names, sorted
    async fn list_pages(&self) -> StoreResult<Vec<String>>;

    async fn delete_page(&self, name: &str) -> StoreResult<()>;

    async fn load_schema(&self, name: &str) -> StoreResult<ComponentSchema>;

    async fn save_schema(&self, schema: &ComponentSchema) -> StoreResult<()>;

    /// Custom component names, sorted
    async fn list_schemas(&self) -> StoreResult<Vec<String>>;

    /// Current revision of the file at `path`, `None` if it does not exist
    async fn revision(&self, path: &str) -> StoreResult<Option<Revision>>;

    async fn page_exists(&self, name: &str) -> StoreResult<bool> {
        Ok(self.revision(&page_path(name)).await?.is_some())
    }

    /// Save a page that must not exist yet
    async fn create_page(&self, page: &PageDocument) -> StoreResult<()> {
        if self.page_exists(&page.name).await? {
            return Err(StoreError::PageExists(page.name.clone()));
        }
        self.save_page(page).await
    }

    /// Every tracked path: pages first, then component schemas
    async fn list_paths(&self) -> StoreResult<Vec<String>> {
        let mut paths: Vec<String> = self
            .list_pages()
            .await?
            .iter()
            .map(|name| page_path(name))
            .collect();
        paths.extend(self.list_schemas().await?.iter().map(|name| schema_path(name)));
        Ok(paths)
    }
}

pub fn revision_of(bytes: &[u8]) -> Revision {
    crc32fast::hash(bytes)
}

/// Component names become file names but keep their casing
pub fn validate_schema_name(name: &str) -> StoreResult<()> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidSchemaName(name.to_string()))
    }
}

/// Page name for a `pages/<name>.json` path
pub fn page_name_from_path(path: &str) -> Option<&str> {
    path.strip_prefix(PAGES_DIR)?
        .strip_prefix('/')?
        .strip_suffix(".json")
}

/// Component name for a `components/<Name>.json` path
pub fn schema_name_from_path(path: &str) -> Option<&str> {
    path.strip_prefix(COMPONENTS_DIR)?
        .strip_prefix('/')?
        .strip_suffix(".json")
}
