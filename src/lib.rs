//! Space Invaders - deterministic simulation core.
//!
//! - `compute`: level construction, movement and the command reducer
//! - `tick` / `collision`: the per-frame pipeline behind `Command::Tick`
//! - `session`: single-owner command linearization
//! - `input` / `view`: pure adapter logic for front ends

pub mod collision;
pub mod compute;
pub mod entities;
pub mod input;
pub mod rng;
pub mod session;
pub mod tick;
pub mod vector;
pub mod view;

pub use compute::{create_level, reduce};
pub use entities::{Command, Entity, GameState};
pub use rng::Lcg;
pub use session::Session;
pub use vector::Vector;
