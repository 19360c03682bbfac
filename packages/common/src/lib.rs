//! Shared data model for Pagewright pages.
//!
//! Every other crate speaks in terms of the types defined here: the
//! reference-counted [`ComponentNode`] tree, the [`PageDocument`] that owns
//! it, the dynamically typed [`PropValue`], and the [`IdGenerator`] that
//! hands out node ids.

pub mod error;
pub mod id_generator;
pub mod node;
pub mod result;
pub mod value;
pub mod visitor;

pub use error::*;
pub use id_generator::*;
pub use node::*;
pub use result::*;
pub use value::*;
pub use visitor::*;
