//! # Pagewright Schema
//!
//! Component schema registry: which component types exist, which props they
//! take, which children they accept and how they look by default.
//!
//! The registry is an explicit value. Build one with
//! [`SchemaRegistry::with_builtins`], register custom schemas on it, then hand
//! it by reference to the editing session and the renderer.

mod builtins;
pub mod coerce;
mod error;
mod registry;
mod schema;
pub mod validator;

pub use builtins::builtin_schemas;
pub use error::{SchemaError, SchemaResult};
pub use registry::SchemaRegistry;
pub use schema::{AllowedChildren, ComponentSchema, PropSchema, PropType, ANY_CHILD};
pub use validator::{validate_tree, ValidationLevel, ValidationWarning};
