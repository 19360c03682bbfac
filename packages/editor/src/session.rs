//! # Edit Session
//!
//! One editor's view of one page: the live document, its undo/redo history,
//! and the current selection.
//!
//! Every user action (toolbar button or key binding) goes through
//! [`EditSession::dispatch`]. An action that changes the tree commits exactly
//! one history entry; an action that turns out to be a no-op commits none.
//!
//! Persistence is decoupled: the session only tracks a version counter and
//! whether the latest version has been saved. A failed save therefore never
//! touches the tree or the history.

use crate::errors::{EditorError, EditorResult};
use crate::history::{History, DEFAULT_HISTORY_LIMIT};
use crate::keymap::{KeyCommand, KeyEvent, Keymap};
use crate::mutations::{self, Mutation};
use pagewright_common::{ComponentNode, ComponentTree, IdGenerator, PageDocument, Props, Style};
use pagewright_renderer::{RenderedPage, Renderer};
use pagewright_schema::SchemaRegistry;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// User-level editor action
#[derive(Debug, Clone, PartialEq)]
pub enum EditorAction {
    /// Select a node, or clear the selection with `None`
    Select(Option<String>),

    /// Merge props into the selected node
    SetProps(Props),

    /// Merge style into the selected node
    SetStyle(Style),

    /// Delete a node; `None` targets the selection
    Delete(Option<String>),

    /// Duplicate a node; `None` targets the selection
    Duplicate(Option<String>),

    /// Add a new component under a parent (or at the root)
    AddComponent {
        component_type: String,
        parent_id: Option<String>,
    },

    Undo,
    Redo,
}

/// Single-user edit session for one page
pub struct EditSession {
    /// Live document (always equal to the history's current entry)
    document: PageDocument,

    history: History,

    selected_id: Option<String>,

    ids: IdGenerator,

    /// Increments on every committed change
    version: u64,

    /// Last version acknowledged as saved
    saved_version: u64,
}

impl EditSession {
    pub fn new(document: PageDocument) -> Self {
        Self::with_history_limit(document, DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_history_limit(document: PageDocument, limit: usize) -> Self {
        let history = History::with_limit(document.components.clone(), limit);
        Self {
            document,
            history,
            selected_id: None,
            ids: IdGenerator::new(),
            version: 0,
            saved_version: 0,
        }
    }

    pub fn document(&self) -> &PageDocument {
        &self.document
    }

    pub fn tree(&self) -> &ComponentTree {
        &self.document.components
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    pub fn selected_node(&self) -> Option<&Arc<ComponentNode>> {
        self.selected_id
            .as_deref()
            .and_then(|id| mutations::find_by_id(self.tree(), id))
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Content-root-relative path of the page, used as the pending-change key
    pub fn page_path(&self) -> String {
        self.document.path()
    }

    pub fn is_dirty(&self) -> bool {
        self.version != self.saved_version
    }

    /// Record that `version` reached the content store.
    ///
    /// Only clears the dirty flag when no edits landed after the save
    /// started; an older save finishing late never marks newer edits clean.
    pub fn mark_saved(&mut self, version: u64) -> bool {
        if version > self.saved_version && version <= self.version {
            self.saved_version = version;
        }
        let clean = !self.is_dirty();
        debug!(page = %self.document.name, version, clean, "Save acknowledged");
        clean
    }

    /// Cheap copy of the current document for persisting, with its version
    pub fn snapshot(&self) -> (PageDocument, u64) {
        (self.document.clone(), self.version)
    }

    /// Replace the page wholesale (e.g. after pulling remote changes).
    /// Starts a fresh history and clears the selection.
    pub fn reload(&mut self, document: PageDocument) {
        info!(page = %document.name, "Reloading page");
        self.history.reset(document.components.clone());
        self.document = document;
        self.selected_id = None;
        self.version += 1;
        self.saved_version = self.version;
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.document.title = title.into();
        self.mark_changed();
    }

    /// Select a node, or clear with `None`. Unknown ids leave the selection
    /// untouched and return `false`.
    pub fn select(&mut self, id: Option<&str>) -> bool {
        match id {
            None => {
                self.selected_id = None;
                true
            }
            Some(id) if mutations::contains_id(self.tree(), id) => {
                self.selected_id = Some(id.to_string());
                true
            }
            Some(id) => {
                warn!(node_id = %id, "Ignoring selection of unknown node");
                false
            }
        }
    }

    /// Merge props into the selected node
    pub fn on_props_change(&mut self, props: Props) -> EditorResult<bool> {
        let node_id = self.require_selection()?;
        Ok(self.commit(Mutation::PatchProps { node_id, props }))
    }

    /// Merge style into the selected node
    pub fn on_style_change(&mut self, style: Style) -> EditorResult<bool> {
        let node_id = self.require_selection()?;
        Ok(self.commit(Mutation::PatchStyle { node_id, style }))
    }

    /// Delete a node; clears the selection if it was the deleted node or
    /// inside the deleted subtree
    pub fn delete(&mut self, id: &str) -> bool {
        let changed = self.commit(Mutation::RemoveNode {
            node_id: id.to_string(),
        });
        self.drop_stale_selection();
        changed
    }

    /// Duplicate a node; returns the id of the copy
    pub fn duplicate(&mut self, id: &str) -> Option<String> {
        // Borrow the tree field directly so `self.ids` can be borrowed mutably
        let (next, copy_id) =
            mutations::duplicate_node(&self.document.components, id, &mut self.ids)?;
        self.commit_tree(next, "duplicate");
        Some(copy_id)
    }

    /// Add a new component of `component_type` as last child of `parent_id`
    /// (or as a new root) and select it
    pub fn add_component(
        &mut self,
        component_type: &str,
        parent_id: Option<&str>,
        registry: &SchemaRegistry,
    ) -> EditorResult<String> {
        if !registry.contains(component_type) {
            return Err(EditorError::UnknownComponent(component_type.to_string()));
        }

        if let Some(parent_id) = parent_id {
            let parent = mutations::find_by_id(self.tree(), parent_id)
                .ok_or_else(|| EditorError::NodeNotFound(parent_id.to_string()))?;
            if !registry.can_contain_child(&parent.component_type, component_type) {
                return Err(EditorError::ContainmentViolation {
                    parent: parent.component_type.clone(),
                    child: component_type.to_string(),
                });
            }
        }

        let node = registry
            .create_node(component_type, &mut self.ids)
            .ok_or_else(|| EditorError::UnknownComponent(component_type.to_string()))?;
        let node_id = node.id.clone();

        self.commit(Mutation::InsertChild {
            parent_id: parent_id.map(str::to_string),
            node,
        });
        self.selected_id = Some(node_id.clone());

        Ok(node_id)
    }

    pub fn undo(&mut self) -> bool {
        if !self.history.can_undo() {
            return false;
        }
        self.document.components = self.history.undo().clone();
        self.after_time_travel("undo");
        true
    }

    pub fn redo(&mut self) -> bool {
        if !self.history.can_redo() {
            return false;
        }
        self.document.components = self.history.redo().clone();
        self.after_time_travel("redo");
        true
    }

    /// Single entry point for buttons and key bindings. Returns whether the
    /// tree changed.
    pub fn dispatch(&mut self, action: EditorAction, registry: &SchemaRegistry) -> EditorResult<bool> {
        match action {
            EditorAction::Select(id) => {
                self.select(id.as_deref());
                Ok(false)
            }
            EditorAction::SetProps(props) => self.on_props_change(props),
            EditorAction::SetStyle(style) => self.on_style_change(style),
            EditorAction::Delete(id) => {
                let id = self.target_or_selection(id)?;
                Ok(self.delete(&id))
            }
            EditorAction::Duplicate(id) => {
                let id = self.target_or_selection(id)?;
                Ok(self.duplicate(&id).is_some())
            }
            EditorAction::AddComponent {
                component_type,
                parent_id,
            } => self
                .add_component(&component_type, parent_id.as_deref(), registry)
                .map(|_| true),
            EditorAction::Undo => Ok(self.undo()),
            EditorAction::Redo => Ok(self.redo()),
        }
    }

    /// Resolve a key event and dispatch it. Returns `Ok(None)` when the event
    /// is not bound, comes from a text input, or needs a selection that
    /// does not exist.
    pub fn handle_key(
        &mut self,
        event: &KeyEvent,
        keymap: &Keymap,
        registry: &SchemaRegistry,
    ) -> EditorResult<Option<bool>> {
        let Some(command) = keymap.resolve(event) else {
            return Ok(None);
        };

        let action = match command {
            KeyCommand::Undo => EditorAction::Undo,
            KeyCommand::Redo => EditorAction::Redo,
            KeyCommand::Deselect => EditorAction::Select(None),
            KeyCommand::Delete | KeyCommand::Duplicate if self.selected_id.is_none() => {
                return Ok(None);
            }
            KeyCommand::Delete => EditorAction::Delete(None),
            KeyCommand::Duplicate => EditorAction::Duplicate(None),
        };

        self.dispatch(action, registry).map(Some)
    }

    /// Render the live tree for preview
    pub fn preview(&self, registry: &SchemaRegistry) -> RenderedPage {
        Renderer::new(registry).render(self.tree())
    }

    /// Apply a mutation and record it. Returns whether the tree changed.
    pub fn apply(&mut self, mutation: Mutation) -> bool {
        let changed = self.commit(mutation);
        self.drop_stale_selection();
        changed
    }

    fn commit(&mut self, mutation: Mutation) -> bool {
        let next = mutation.apply(&self.document.components, &mut self.ids);
        self.commit_tree(next, mutation.name())
    }

    fn commit_tree(&mut self, next: ComponentTree, label: &str) -> bool {
        if mutations::is_same_version(self.tree(), &next) {
            debug!(action = label, "Mutation was a no-op");
            return false;
        }

        self.history.push(next.clone());
        self.document.components = next;
        self.mark_changed();
        debug!(action = label, version = self.version, "Committed mutation");
        true
    }

    fn mark_changed(&mut self) {
        self.version += 1;
        debug!(path = %self.page_path(), "Page has unsaved changes");
    }

    fn after_time_travel(&mut self, label: &str) {
        self.mark_changed();
        self.drop_stale_selection();
        debug!(action = label, cursor = self.history.cursor(), "Moved through history");
    }

    fn drop_stale_selection(&mut self) {
        let stale = self
            .selected_id
            .as_deref()
            .is_some_and(|id| !mutations::contains_id(&self.document.components, id));
        if stale {
            self.selected_id = None;
        }
    }

    fn require_selection(&self) -> EditorResult<String> {
        self.selected_id.clone().ok_or(EditorError::NoSelection)
    }

    fn target_or_selection(&self, id: Option<String>) -> EditorResult<String> {
        match id {
            Some(id) => Ok(id),
            None => self.require_selection(),
        }
    }
}
