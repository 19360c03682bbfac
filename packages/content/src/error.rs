//! Error types for the content store

use pagewright_common::CommonError;
use pagewright_schema::SchemaError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Common(#[from] CommonError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("Page not found: {0}")]
    PageNotFound(String),

    #[error("Page already exists: {0}")]
    PageExists(String),

    #[error("Component schema not found: {0}")]
    SchemaNotFound(String),

    #[error("Invalid component name '{0}': use letters, digits, '-' or '_'")]
    InvalidSchemaName(String),

    #[error("Content store lock poisoned")]
    Poisoned,
}

pub type StoreResult<T> = Result<T, StoreError>;
