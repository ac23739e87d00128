//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` and returns a brand-new `GameState`. The only entry point the
//! outside world needs is [`reduce`]; the rest is exposed for tests and for
//! the tick pipeline.

use crate::entities::{Command, Entity, GameState};
use crate::rng::Lcg;
use crate::tick::tick;
use crate::vector::Vector;

// ── Playfield ─────────────────────────────────────────────────────────────────

pub const FIELD_WIDTH: f64 = 600.0;
pub const FIELD_HEIGHT: f64 = 600.0;
/// Horizontal gap kept between any entity and the side walls.
pub const FIELD_MARGIN: f64 = 3.0;
/// The level is lost once the lowest alien goes below this line.
pub const INVASION_Y: f64 = 350.0;

pub const ALIEN_COUNT: u32 = 32;
pub const SHIELD_COUNT: usize = 48;
pub const START_LIVES: u32 = 3;

/// Ticks that must pass (strictly) between two shots.
pub const SHOT_COOLDOWN: u64 = 10;
/// Waiting strictly longer than this turns the next shot into a charged one.
pub const CHARGED_SHOT_DELAY: u64 = 30;
pub const SHOT_SPEED: f64 = 5.0;
pub const CHARGED_SHOT_SPEED: f64 = 25.0;

const ALIEN_ROWS: [f64; 4] = [100.0, 150.0, 200.0, 250.0];
const ALIENS_PER_ROW: usize = 8;
const ALIEN_SPACING: f64 = 50.0;

const SHIELD_CLUSTERS: [f64; 3] = [100.0, 250.0, 400.0];
const SHIELD_ROWS: [f64; 2] = [400.0, 410.0];
const SHIELDS_PER_ROW: usize = 8;
const SHIELD_SPACING: f64 = 10.0;

// ── Constructors ─────────────────────────────────────────────────────────────

fn formation() -> Vec<Entity> {
    ALIEN_ROWS
        .iter()
        .enumerate()
        .flat_map(|(row, &y)| {
            // odd rows are staggered to the right
            let start_x = if row % 2 == 0 { 75.0 } else { 95.0 };
            (0..ALIENS_PER_ROW).map(move |col| {
                let id = format!("alien{}", row * ALIENS_PER_ROW + col);
                Entity::alien(id, Vector::new(start_x + col as f64 * ALIEN_SPACING, y))
            })
        })
        .collect()
}

fn shields() -> Vec<Entity> {
    let mut shields = Vec::with_capacity(SHIELD_COUNT);
    for &left in &SHIELD_CLUSTERS {
        for &y in &SHIELD_ROWS {
            for col in 0..SHIELDS_PER_ROW {
                let id = format!("shield{}", shields.len());
                let x = left + col as f64 * SHIELD_SPACING;
                shields.push(Entity::shield(id, Vector::new(x, y)));
            }
        }
    }
    shields
}

/// Build the opening snapshot for `level`.
pub fn create_level(level: u32) -> GameState {
    GameState {
        ship: Entity::ship(),
        bullets: Vec::new(),
        aliens: formation(),
        shields: shields(),
        exit: Vec::new(),
        points: 0,
        lose: false,
        win: false,
        count: 0,
        time: 0,
        last_shot: 0,
        rng: Lcg::new(1),
        level,
        lives: START_LIVES,
        num_aliens: 0,
    }
}

// ── Movement ─────────────────────────────────────────────────────────────────

/// Step `entity` by `direction * speed`. Only x is clamped to the playfield;
/// y is free so bullets can leave the screen and aliens can invade.
pub fn move_entity(entity: &Entity, direction: Vector) -> Entity {
    let raw = entity.pos + direction * entity.speed;
    let max_x = FIELD_WIDTH - entity.width - FIELD_MARGIN;
    let x = if raw.x > max_x {
        max_x
    } else if raw.x < FIELD_MARGIN {
        FIELD_MARGIN
    } else {
        raw.x
    };
    Entity {
        pos: Vector::new(x, raw.y),
        ..entity.clone()
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

pub fn move_ship(state: &GameState, h: f64, v: f64) -> GameState {
    GameState {
        ship: move_entity(&state.ship, Vector::new(h, v)),
        ..state.clone()
    }
}

/// Fire from the ship's nose, rate-limited by `SHOT_COOLDOWN`.
pub fn player_shoot(state: &GameState) -> GameState {
    let since_last = state.time.saturating_sub(state.last_shot);
    if since_last <= SHOT_COOLDOWN {
        log::trace!("shot dropped at t={}: cooling down", state.time);
        return state.clone();
    }
    let speed = if since_last > CHARGED_SHOT_DELAY {
        CHARGED_SHOT_SPEED
    } else {
        SHOT_SPEED
    };
    let nose = state.ship.pos + Vector::new(18.0, -18.0);
    let bullet = Entity::bullet(
        format!("bullet{}", state.count),
        nose,
        Vector::new(0.0, -1.0),
        speed,
        false,
    );
    let mut bullets = state.bullets.clone();
    bullets.push(bullet);
    GameState {
        bullets,
        count: state.count + 1,
        last_shot: state.time,
        ..state.clone()
    }
}

/// After a loss restart from level 1; after a win build the next level.
pub fn load_level(state: &GameState) -> GameState {
    if state.lose {
        log::info!("restarting from level 1 (scored {} on level {})", state.points, state.level);
        create_level(1)
    } else if state.win {
        let next = state.level.saturating_add(1);
        log::info!("advancing to level {next}");
        create_level(next)
    } else {
        state.clone()
    }
}

// ── Reducer ──────────────────────────────────────────────────────────────────

/// Apply one command. Total: commands that do not apply are no-ops.
pub fn reduce(state: &GameState, command: &Command) -> GameState {
    match *command {
        Command::LoadLevel => load_level(state),
        _ if state.is_over() => state.clone(),
        Command::Move { h, v } => move_ship(state, h, v),
        Command::Shoot { .. } => player_shoot(state),
        Command::Tick { elapsed } => tick(state, elapsed),
    }
}
