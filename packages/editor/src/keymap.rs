//! # Key Bindings
//!
//! Maps key chords to editor commands. The session routes the resolved
//! command through the same dispatch path as toolbar buttons, so a shortcut
//! and a click produce exactly one history entry each.
//!
//! Key events that originate in a text input are never resolved: the input
//! owns its own undo and delete behaviour.

use crate::errors::{EditorError, EditorResult};
use std::collections::HashMap;
use std::fmt;

/// Editor command reachable from the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCommand {
    Undo,
    Redo,
    Delete,
    Duplicate,
    Deselect,
}

/// Normalized key combination. `modifier` is Ctrl or Cmd.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyChord {
    pub key: String,
    pub modifier: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyChord {
    /// Parse strings like `mod+shift+z`, `ctrl+y` or `delete`
    pub fn parse(binding: &str) -> EditorResult<Self> {
        let mut chord = KeyChord {
            key: String::new(),
            modifier: false,
            shift: false,
            alt: false,
        };

        let parts: Vec<String> = binding
            .split('+')
            .map(|part| part.trim().to_ascii_lowercase())
            .collect();
        let (key, modifiers) = parts
            .split_last()
            .ok_or_else(|| EditorError::InvalidKeyBinding(binding.to_string()))?;

        for modifier in modifiers {
            match modifier.as_str() {
                "mod" | "ctrl" | "cmd" | "meta" => chord.modifier = true,
                "shift" => chord.shift = true,
                "alt" | "option" => chord.alt = true,
                _ => return Err(EditorError::InvalidKeyBinding(binding.to_string())),
            }
        }

        if key.is_empty() {
            return Err(EditorError::InvalidKeyBinding(binding.to_string()));
        }
        chord.key = key.clone();

        Ok(chord)
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifier {
            f.write_str("mod+")?;
        }
        if self.shift {
            f.write_str("shift+")?;
        }
        if self.alt {
            f.write_str("alt+")?;
        }
        f.write_str(&self.key)
    }
}

/// Raw key event as delivered by the host UI
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,

    /// Event target is an editable field
    pub in_text_input: bool,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn in_text_input(mut self) -> Self {
        self.in_text_input = true;
        self
    }

    pub fn chord(&self) -> KeyChord {
        KeyChord {
            key: self.key.to_ascii_lowercase(),
            modifier: self.ctrl || self.meta,
            shift: self.shift,
            alt: self.alt,
        }
    }
}

/// Chord → command table
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: HashMap<KeyChord, KeyCommand>,
}

impl Keymap {
    /// Keymap with no bindings
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    pub fn bind(&mut self, chord: &str, command: KeyCommand) -> EditorResult<()> {
        self.bindings.insert(KeyChord::parse(chord)?, command);
        Ok(())
    }

    pub fn unbind(&mut self, chord: &str) -> EditorResult<Option<KeyCommand>> {
        Ok(self.bindings.remove(&KeyChord::parse(chord)?))
    }

    pub fn resolve(&self, event: &KeyEvent) -> Option<KeyCommand> {
        if event.in_text_input {
            return None;
        }
        self.bindings.get(&event.chord()).copied()
    }

    /// Bindings for a command, rendered as chord strings
    pub fn chords_for(&self, command: KeyCommand) -> Vec<String> {
        let mut chords: Vec<String> = self
            .bindings
            .iter()
            .filter(|(_, bound)| **bound == command)
            .map(|(chord, _)| chord.to_string())
            .collect();
        chords.sort();
        chords
    }
}

impl Default for Keymap {
    fn default() -> Self {
        let defaults = [
            (KeyChord::parse("mod+z"), KeyCommand::Undo),
            (KeyChord::parse("mod+shift+z"), KeyCommand::Redo),
            (KeyChord::parse("mod+y"), KeyCommand::Redo),
            (KeyChord::parse("delete"), KeyCommand::Delete),
            (KeyChord::parse("backspace"), KeyCommand::Delete),
            (KeyChord::parse("mod+d"), KeyCommand::Duplicate),
            (KeyChord::parse("escape"), KeyCommand::Deselect),
        ];

        Self {
            bindings: defaults
                .into_iter()
                .filter_map(|(chord, command)| chord.ok().map(|c| (c, command)))
                .collect(),
        }
    }
}
