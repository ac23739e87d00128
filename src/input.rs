//! Held-key tracking that turns key events into engine commands.
//!
//! Each key has a start/stop activity span: a press opens it, a release
//! closes it, and while it is open the key yields one command per tick no
//! matter how many auto-repeat events the terminal sends.

use std::collections::BTreeMap;

use crate::entities::Command;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
}

impl Key {
    pub fn command(self) -> Command {
        match self {
            Key::Left => Command::Move { h: -1.0, v: 0.0 },
            Key::Right => Command::Move { h: 1.0, v: 0.0 },
            Key::Up => Command::Shoot { special: false },
            Key::Down => Command::LoadLevel,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct HeldKeys {
    /// Open spans → tick the key was last seen pressed or repeating.
    last_seen: BTreeMap<Key, u64>,
    /// Ticks of silence after which a span closes on its own. Needed for
    /// terminals that never report key releases; `None` waits for releases.
    hold_window: Option<u64>,
}

impl HeldKeys {
    pub fn new(hold_window: Option<u64>) -> Self {
        Self {
            last_seen: BTreeMap::new(),
            hold_window,
        }
    }

    /// Press or auto-repeat. Returns `true` only when a new span opens.
    pub fn press(&mut self, key: Key, tick: u64) -> bool {
        let opened = !self.is_held(key, tick);
        self.last_seen.insert(key, tick);
        opened
    }

    pub fn release(&mut self, key: Key) {
        self.last_seen.remove(&key);
    }

    pub fn is_held(&self, key: Key, tick: u64) -> bool {
        match (self.last_seen.get(&key), self.hold_window) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(&last), Some(window)) => tick.saturating_sub(last) <= window,
        }
    }

    /// Close expired spans and emit one command per open span, in key order.
    pub fn commands(&mut self, tick: u64) -> Vec<Command> {
        if let Some(window) = self.hold_window {
            self.last_seen
                .retain(|_, last| tick.saturating_sub(*last) <= window);
        }
        self.last_seen.keys().map(|key| key.command()).collect()
    }
}
