use thiserror::Error;

/// Errors raised while reading or building page documents
#[derive(Error, Debug)]
pub enum CommonError {
    #[error("Invalid page JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid page name '{0}': use lowercase letters, digits, '-' or '_'")]
    InvalidPageName(String),
}
