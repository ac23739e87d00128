//! All game entity types - pure data, no game logic.

use serde::{Deserialize, Serialize};

use crate::rng::Lcg;
use crate::vector::Vector;

// ── Entities ──────────────────────────────────────────────────────────────────

/// Uniform record for the ship, bullets, aliens and shield fragments.
///
/// `enemy` is the faction flag: aliens and alien bullets are enemies; the
/// ship, player bullets and shields are not.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: String,
    pub pos: Vector,
    pub dir: Vector,
    pub speed: f64,
    pub width: f64,
    pub height: f64,
    pub enemy: bool,
}

impl Entity {
    pub fn ship() -> Self {
        Self {
            id: "ship".to_string(),
            pos: Vector::new(279.0, 500.0),
            dir: Vector::ZERO,
            speed: 4.0,
            width: 39.0,
            height: 24.0,
            enemy: false,
        }
    }

    pub fn alien(id: impl Into<String>, pos: Vector) -> Self {
        Self {
            id: id.into(),
            pos,
            dir: Vector::ZERO,
            speed: 3.0,
            width: 30.0,
            height: 30.0,
            enemy: true,
        }
    }

    pub fn shield(id: impl Into<String>, pos: Vector) -> Self {
        Self {
            id: id.into(),
            pos,
            dir: Vector::ZERO,
            speed: 0.0,
            width: 10.0,
            height: 10.0,
            enemy: false,
        }
    }

    /// Bullets are 1x1; `enemy` marks who fired it.
    pub fn bullet(id: impl Into<String>, pos: Vector, dir: Vector, speed: f64, enemy: bool) -> Self {
        Self {
            id: id.into(),
            pos,
            dir,
            speed,
            width: 1.0,
            height: 1.0,
            enemy,
        }
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

/// Everything that can drive a state transition.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Advance one frame; `elapsed` becomes the new `time`.
    Tick { elapsed: u64 },
    /// Move the ship one step along `(h, v)`.
    Move { h: f64, v: f64 },
    Shoot { special: bool },
    /// Restart after a loss or advance after a win.
    LoadLevel,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state. Every transition returns a new value; nothing
/// in the engine mutates a state it was handed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub ship: Entity,
    pub bullets: Vec<Entity>,
    pub aliens: Vec<Entity>,
    pub shields: Vec<Entity>,
    /// Entities removed during the last tick. Recomputed every tick.
    pub exit: Vec<Entity>,
    pub points: u32,
    pub lose: bool,
    pub win: bool,
    /// Player bullets fired this level; also the next bullet id suffix.
    pub count: u32,
    pub time: u64,
    pub last_shot: u64,
    pub rng: Lcg,
    pub level: u32,
    pub lives: u32,
    /// Aliens destroyed so far this level.
    pub num_aliens: u32,
}

impl GameState {
    /// True once the level is lost or won; only `LoadLevel` acts then.
    pub fn is_over(&self) -> bool {
        self.lose || self.win
    }
}
