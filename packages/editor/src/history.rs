//! # Undo/Redo History
//!
//! Linear log of tree snapshots with a cursor.
//!
//! ## Design
//!
//! - Each entry is a complete, immutable [`ComponentTree`]; because trees
//!   share unchanged subtrees through `Arc`, a snapshot costs one path copy
//!   rather than a deep clone
//! - Undo and redo only move the cursor
//! - A push after an undo discards the redo branch
//! - The log is bounded; when it overflows the oldest entries are dropped
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut history = History::new(initial_tree);
//! history.push(next_tree);
//!
//! let previous = history.undo().clone();
//! let next = history.redo().clone();
//! ```

use pagewright_common::ComponentTree;
use std::collections::VecDeque;
use tracing::debug;

/// Default number of retained snapshots
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Bounded linear undo/redo history
#[derive(Debug, Clone)]
pub struct History {
    /// Snapshots, oldest first
    entries: VecDeque<ComponentTree>,

    /// Index of the current snapshot
    cursor: usize,

    /// Maximum number of retained snapshots
    limit: usize,
}

impl History {
    /// Seed the history with the initial tree
    pub fn new(initial: ComponentTree) -> Self {
        Self::with_limit(initial, DEFAULT_HISTORY_LIMIT)
    }

    /// Seed with a custom bound (at least 1)
    pub fn with_limit(initial: ComponentTree, limit: usize) -> Self {
        let mut entries = VecDeque::with_capacity(limit.clamp(1, DEFAULT_HISTORY_LIMIT));
        entries.push_back(initial);
        Self {
            entries,
            cursor: 0,
            limit: limit.max(1),
        }
    }

    /// Record a new current state
    pub fn push(&mut self, snapshot: ComponentTree) {
        // New action invalidates the future
        self.entries.truncate(self.cursor + 1);
        self.entries.push_back(snapshot);
        self.cursor = self.entries.len() - 1;

        while self.entries.len() > self.limit {
            self.entries.pop_front();
            self.cursor -= 1;
        }

        debug!(len = self.entries.len(), cursor = self.cursor, "Pushed history entry");
    }

    /// Step back; at the oldest entry this is a no-op returning the current state
    pub fn undo(&mut self) -> &ComponentTree {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
        self.current()
    }

    /// Step forward; at the newest entry this is a no-op returning the current state
    pub fn redo(&mut self) -> &ComponentTree {
        if self.cursor + 1 < self.entries.len() {
            self.cursor += 1;
        }
        self.current()
    }

    pub fn current(&self) -> &ComponentTree {
        &self.entries[self.cursor]
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Number of undo steps available
    pub fn undo_levels(&self) -> usize {
        self.cursor
    }

    /// Number of redo steps available
    pub fn redo_levels(&self) -> usize {
        self.entries.len() - 1 - self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Oldest retained snapshot
    pub fn oldest(&self) -> &ComponentTree {
        &self.entries[0]
    }

    /// Drop everything and start over from `initial`
    pub fn reset(&mut self, initial: ComponentTree) {
        self.entries.clear();
        self.entries.push_back(initial);
        self.cursor = 0;
    }
}
