//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    #[error("No component is selected")]
    NoSelection,

    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Unknown component type: {0}")]
    UnknownComponent(String),

    #[error("{parent} cannot contain {child}")]
    ContainmentViolation { parent: String, child: String },

    #[error("Invalid key binding: {0}")]
    InvalidKeyBinding(String),
}

pub type EditorResult<T> = Result<T, EditorError>;
