//! # Pagewright Renderer
//!
//! Turns a page's component tree into a virtual node tree with schema
//! defaults resolved: every node carries its merged props and style, and
//! nodes of unknown type become inline error placeholders so the rest of the
//! page still renders.

pub mod renderer;
pub mod vdom;

pub use renderer::Renderer;
pub use vdom::{RenderedPage, VNode};
