//! Filesystem-backed content store

use crate::error::{StoreError, StoreResult};
use crate::store::{revision_of, validate_schema_name, ContentStore, Revision};
use async_trait::async_trait;
use pagewright_common::{
    page_path, schema_path, validate_page_name, PageDocument, COMPONENTS_DIR, PAGES_DIR,
};
use pagewright_schema::ComponentSchema;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, instrument};

/// Stores pages and schemas as pretty-printed JSON under a content root
#[derive(Debug, Clone)]
pub struct FsContentStore {
    root: PathBuf,
}

impl FsContentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the content directories if missing
    pub async fn init(&self) -> StoreResult<()> {
        fs::create_dir_all(self.root.join(PAGES_DIR)).await?;
        fs::create_dir_all(self.root.join(COMPONENTS_DIR)).await?;
        info!(root = %self.root.display(), "Initialized content directory");
        Ok(())
    }

    fn resolve(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// Write through a sibling temp file so readers never see a torn file
    async fn write_atomic(&self, relative: &str, contents: &str) -> StoreResult<()> {
        let path = self.resolve(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, contents).await?;
        fs::rename(&tmp, &path).await?;
        Ok(())
    }

    /// Sorted `.json` file stems in a content subdirectory
    async fn list_json_stems(&self, dir: &str) -> StoreResult<Vec<String>> {
        let mut entries = match fs::read_dir(self.resolve(dir)).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }

        names.sort();
        Ok(names)
    }
}

#[async_trait]
impl ContentStore for FsContentStore {
    #[instrument(skip(self))]
    async fn load_page(&self, name: &str) -> StoreResult<PageDocument> {
        validate_page_name(name)?;
        let json = match fs::read_to_string(self.resolve(&page_path(name))).await {
            Ok(json) => json,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(StoreError::PageNotFound(name.to_string()))
            }
            Err(err) => return Err(err.into()),
        };

        let mut page = PageDocument::from_json(&json)?;
        // The file name is authoritative
        page.name = name.to_string();
        Ok(page)
    }

    #[instrument(skip(self, page), fields(page = %page.name))]
    async fn save_page(&self, page: &PageDocument) -> StoreResult<()> {
        validate_page_name(&page.name)?;
        let json = page.to_json()?;
        self.write_atomic(&page.path(), &json).await?;
        debug!(bytes = json.len(), "Saved page");
        Ok(())
    }

    async fn list_pages(&self) -> StoreResult<Vec<String>> {
        self.list_json_stems(PAGES_DIR).await
    }

    #[instrument(skip(self))]
    async fn delete_page(&self, name: &str) -> StoreResult<()> {
        validate_page_name(name)?;
        match fs::remove_file(self.resolve(&page_path(name))).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Err(StoreError::PageNotFound(name.to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }

    #[instrument(skip(self))]
    async fn load_schema(&self, name: &str) -> StoreResult<ComponentSchema> {
        validate_schema_name(name)?;
        let json = match fs::read_to_string(self.resolve(&schema_path(name))).await {
            Ok(json) => json,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(StoreError::SchemaNotFound(name.to_string()))
            }
            Err(err) => return Err(err.into()),
        };
        Ok(ComponentSchema::from_json(&json)?)
    }

    #[instrument(skip(self, schema), fields(component = %schema.name))]
    async fn save_schema(&self, schema: &ComponentSchema) -> StoreResult<()> {
        validate_schema_name(&schema.name)?;
        schema.validate()?;
        let json = schema.to_json()?;
        self.write_atomic(&schema_path(&schema.name), &json).await
    }

    async fn list_schemas(&self) -> StoreResult<Vec<String>> {
        self.list_json_stems(COMPONENTS_DIR).await
    }

    async fn revision(&self, path: &str) -> StoreResult<Option<Revision>> {
        match fs::read(self.resolve(path)).await {
            Ok(bytes) => Ok(Some(revision_of(&bytes))),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}
