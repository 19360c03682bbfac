//! Error types for schema loading and registration

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Invalid schema JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Schema name is empty")]
    EmptyName,

    #[error("Schema name mismatch: registered as '{registered}' but schema is named '{declared}'")]
    NameMismatch { registered: String, declared: String },

    #[error("Prop '{prop}' default does not match declared type {expected}")]
    DefaultTypeMismatch { prop: String, expected: String },
}

pub type SchemaResult<T> = Result<T, SchemaError>;
