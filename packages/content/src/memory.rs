//! In-memory content store for tests and previews

use crate::error::{StoreError, StoreResult};
use crate::store::{
    page_name_from_path, revision_of, schema_name_from_path, validate_schema_name, ContentStore,
    Revision,
};
use async_trait::async_trait;
use pagewright_common::{page_path, schema_path, validate_page_name, PageDocument};
use pagewright_schema::ComponentSchema;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Path → serialized JSON, shared between clones
#[derive(Debug, Clone, Default)]
pub struct MemoryContentStore {
    files: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write raw contents at a path, bypassing validation (simulates an
    /// out-of-band edit)
    pub fn write_raw(&self, path: &str, contents: &str) -> StoreResult<()> {
        self.files()?.insert(path.to_string(), contents.to_string());
        Ok(())
    }

    pub fn remove_raw(&self, path: &str) -> StoreResult<bool> {
        Ok(self.files()?.remove(path).is_some())
    }

    pub fn read_raw(&self, path: &str) -> StoreResult<Option<String>> {
        Ok(self.files()?.get(path).cloned())
    }

    fn files(&self) -> StoreResult<MutexGuard<'_, BTreeMap<String, String>>> {
        self.files.lock().map_err(|_| StoreError::Poisoned)
    }

    fn names<F>(&self, extract: F) -> StoreResult<Vec<String>>
    where
        F: Fn(&str) -> Option<&str>,
    {
        // BTreeMap keeps keys, and therefore names, sorted
        Ok(self
            .files()?
            .keys()
            .filter_map(|path| extract(path.as_str()).map(str::to_string))
            .collect())
    }
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn load_page(&self, name: &str) -> StoreResult<PageDocument> {
        validate_page_name(name)?;
        let json = self
            .read_raw(&page_path(name))?
            .ok_or_else(|| StoreError::PageNotFound(name.to_string()))?;
        let mut page = PageDocument::from_json(&json)?;
        page.name = name.to_string();
        Ok(page)
    }

    async fn save_page(&self, page: &PageDocument) -> StoreResult<()> {
        validate_page_name(&page.name)?;
        let json = page.to_json()?;
        self.write_raw(&page.path(), &json)
    }

    async fn list_pages(&self) -> StoreResult<Vec<String>> {
        self.names(page_name_from_path)
    }

    async fn delete_page(&self, name: &str) -> StoreResult<()> {
        validate_page_name(name)?;
        if self.remove_raw(&page_path(name))? {
            Ok(())
        } else {
            Err(StoreError::PageNotFound(name.to_string()))
        }
    }

    async fn load_schema(&self, name: &str) -> StoreResult<ComponentSchema> {
        validate_schema_name(name)?;
        let json = self
            .read_raw(&schema_path(name))?
            .ok_or_else(|| StoreError::SchemaNotFound(name.to_string()))?;
        Ok(ComponentSchema::from_json(&json)?)
    }

    async fn save_schema(&self, schema: &ComponentSchema) -> StoreResult<()> {
        validate_schema_name(&schema.name)?;
        schema.validate()?;
        let json = schema.to_json()?;
        self.write_raw(&schema_path(&schema.name), &json)
    }

    async fn list_schemas(&self) -> StoreResult<Vec<String>> {
        self.names(schema_name_from_path)
    }

    async fn revision(&self, path: &str) -> StoreResult<Option<Revision>> {
        Ok(self
            .files()?
            .get(path)
            .map(|contents| revision_of(contents.as_bytes())))
    }
}
