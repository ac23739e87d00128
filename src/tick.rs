//! Per-frame simulation: formation AI, alien fire and bullet lifecycle,
//! followed by collision resolution.

use crate::collision::resolve_collisions;
use crate::compute::{move_entity, FIELD_HEIGHT};
use crate::entities::{Entity, GameState};
use crate::rng::Lcg;
use crate::vector::Vector;

/// Alien bullets only fire while the ship is within this window of the alien.
const FIRE_WINDOW_LEFT: f64 = 10.0;
const FIRE_WINDOW_RIGHT: f64 = 20.0;
/// One in this many rolls lets the front aliens fire.
const FIRE_ODDS: u64 = 39;

/// `time mod period == 0`, with a zero period never matching. The sign of
/// the period does not change which times match.
fn on_beat(time: u64, period: i64) -> bool {
    time.checked_rem(period.unsigned_abs()) == Some(0)
}

/// Rounds to the nearest integer, halves towards positive infinity.
///
/// Compares the fractional part directly; `(x + 0.5).floor()` rounds the
/// largest double below 0.5 up to 1.
pub fn round_half_up(x: f64) -> f64 {
    let floor = x.floor();
    if x - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// The formation's shared velocity for this tick: `(speed, direction)`.
///
/// Speed only pulses on the movement beat, which tightens as aliens die and
/// levels rise; the vertical step has its own slower beat.
pub fn formation_velocity(state: &GameState) -> (f64, Vector) {
    let killed = state.num_aliens as i64;
    let level = state.level as i64;
    let time = state.time;

    let speed = if on_beat(time, 60 - killed - level) {
        10.0 + 4.0 * state.level as f64 + state.num_aliens as f64 / 8.0
    } else {
        0.0
    };
    let sway = (time as f64 / 180.0 * (state.num_aliens as f64 / 4.0)).sin();
    let dx = round_half_up(sway);
    let dy = if on_beat(time, 200 - killed * 4) { 1.0 } else { 0.0 };

    (speed, Vector::new(dx, dy))
}

/// True when no other alien sits below `alien` in the same column.
fn is_column_front(alien: &Entity, aliens: &[Entity]) -> bool {
    !aliens
        .iter()
        .any(|other| other.pos.x == alien.pos.x && other.pos.y > alien.pos.y)
}

/// Bullets fired by the front row of each column this tick.
///
/// A single roll from the state's generator decides for the whole tick.
pub fn alien_volley(state: &GameState) -> Vec<Entity> {
    let fire = state.rng.next().int() % FIRE_ODDS == 0;
    if !fire {
        return Vec::new();
    }
    let ship_x = state.ship.pos.x;
    state
        .aliens
        .iter()
        .filter(|alien| is_column_front(alien, &state.aliens))
        .filter(|alien| alien.pos.x < ship_x + FIRE_WINDOW_RIGHT && alien.pos.x > ship_x - FIRE_WINDOW_LEFT)
        .map(|alien| {
            Entity::bullet(
                format!("{}bullet{}", alien.id, state.time),
                alien.pos,
                Vector::new(0.0, 1.0),
                2.0 + state.level as f64,
                true,
            )
        })
        .collect()
}

/// Bullets that left the screen vertically.
pub fn out_of_bounds(entity: &Entity) -> bool {
    entity.pos.y < -entity.height || entity.pos.y > FIELD_HEIGHT
}

/// Advance the simulation by one frame; `elapsed` becomes the new `time`.
///
/// Everything is computed from the pre-tick state, then handed to collision
/// resolution. `exit` starts this tick with only the culled bullets.
pub fn tick(state: &GameState, elapsed: u64) -> GameState {
    let (speed, dir) = formation_velocity(state);
    let aliens: Vec<Entity> = state
        .aliens
        .iter()
        .map(|alien| {
            let alien = Entity {
                speed,
                dir,
                ..alien.clone()
            };
            move_entity(&alien, alien.dir)
        })
        .collect();

    let (exit, in_bounds): (Vec<Entity>, Vec<Entity>) =
        state.bullets.iter().cloned().partition(out_of_bounds);
    let bullets: Vec<Entity> = in_bounds
        .into_iter()
        .chain(alien_volley(state))
        .map(|bullet| move_entity(&bullet, bullet.dir))
        .collect();

    resolve_collisions(GameState {
        aliens,
        bullets,
        exit,
        time: elapsed,
        rng: Lcg::new(state.time),
        ..state.clone()
    })
}
