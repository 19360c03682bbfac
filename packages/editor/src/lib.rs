//! # Pagewright Editor
//!
//! Editing engine for a page's component tree.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ schema: component catalog + containment     │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: session + mutations + history       │
//! │  - Pure tree mutations (path copying)       │
//! │  - Bounded undo/redo of tree snapshots      │
//! │  - Selection and key bindings               │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ renderer: tree → preview vnodes             │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Trees are values**: every edit produces a new tree, old versions stay valid
//! 2. **One action, one history entry**: buttons and shortcuts share one dispatch path
//! 3. **Persistence is someone else's job**: the session only reports what is dirty
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagewright_editor::{EditSession, EditorAction};
//! use pagewright_schema::SchemaRegistry;
//!
//! let registry = SchemaRegistry::with_builtins();
//! let mut session = EditSession::new(page);
//!
//! let id = session.add_component("Heading", Some("root"), &registry)?;
//! session.dispatch(EditorAction::Duplicate(Some(id)), &registry)?;
//! session.dispatch(EditorAction::Undo, &registry)?;
//!
//! let preview = session.preview(&registry);
//! ```

mod errors;
mod history;
mod keymap;
pub mod mutations;
mod session;

pub use errors::{EditorError, EditorResult};
pub use history::{History, DEFAULT_HISTORY_LIMIT};
pub use keymap::{KeyChord, KeyCommand, KeyEvent, Keymap};
pub use mutations::{is_same_version, Mutation};
pub use session::{EditSession, EditorAction};
