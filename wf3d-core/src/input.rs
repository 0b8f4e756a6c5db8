/// Per-tick input snapshot and the trait a platform layer implements to provide it
use std::collections::HashSet;

/// Movement keys the camera understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Forward,
    Back,
    Left,
    Right,
    Up,
    Down,
}

/// Everything the engine reads from the platform in one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    pub held: HashSet<Key>,
    pub mouse_dx: f64,
    pub mouse_dy: f64,
    pub quit_requested: bool,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot with the given keys held and no mouse motion.
    pub fn with_keys(keys: &[Key]) -> Self {
        Self {
            held: keys.iter().copied().collect(),
            ..Self::default()
        }
    }

    /// Snapshot with only mouse motion.
    pub fn with_mouse(dx: f64, dy: f64) -> Self {
        Self {
            mouse_dx: dx,
            mouse_dy: dy,
            ..Self::default()
        }
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn press(&mut self, key: Key) {
        self.held.insert(key);
    }
}

/// Source of input snapshots, polled once per tick.
pub trait InputSource {
    type Error;

    fn poll(&mut self) -> Result<InputSnapshot, Self::Error>;
}
