//! Input model: held keys are polled, presses arrive as events

use std::collections::HashSet;

/// Logical game keys (the host maps physical keys onto these)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Fire,
    Shield,
    Pause,
    Language,
    Start,
    Confirm,
    Backspace,
    Restart,
}

/// One-shot input events
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    KeyPressed(Key),
    /// Committed text from the host's text-input facility
    TextInput(String),
    Quit,
}

/// Keys held down during the current frame
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    down: HashSet<Key>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_keys(keys: &[Key]) -> Self {
        Self {
            down: keys.iter().copied().collect(),
        }
    }

    pub fn press(&mut self, key: Key) {
        self.down.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.down.remove(&key);
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.down.contains(&key)
    }
}
