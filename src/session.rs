//! Single-owner command linearization.
//!
//! Front ends push ticks and input commands through one `Session` so every
//! command sees the fully resolved result of the one before it.

use crate::compute::{create_level, reduce};
use crate::entities::{Command, GameState};

#[derive(Clone, Debug)]
pub struct Session {
    state: GameState,
    next_tick: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Start at the level-1 opening snapshot.
    pub fn new() -> Self {
        Self::from_state(create_level(1))
    }

    pub fn from_state(state: GameState) -> Self {
        Self { state, next_tick: 0 }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Ticks delivered so far.
    pub fn ticks(&self) -> u64 {
        self.next_tick
    }

    pub fn dispatch(&mut self, command: Command) -> &GameState {
        if let Command::Tick { elapsed } = command {
            self.next_tick = self.next_tick.max(elapsed.saturating_add(1));
        }
        self.state = reduce(&self.state, &command);
        &self.state
    }

    /// Deliver the next tick of the fixed cadence, counting from 0.
    pub fn tick(&mut self) -> &GameState {
        let elapsed = self.next_tick;
        self.dispatch(Command::Tick { elapsed })
    }
}

/// Fold `commands` from the level-1 snapshot, returning every emitted state.
pub fn replay<I>(commands: I) -> Vec<GameState>
where
    I: IntoIterator<Item = Command>,
{
    let mut session = Session::new();
    commands
        .into_iter()
        .map(|command| session.dispatch(command).clone())
        .collect()
}
