//! Collision detection and resolution.
//!
//! Pairs are tested exhaustively each tick.

use crate::compute::{ALIEN_COUNT, INVASION_Y};
use crate::entities::{Entity, GameState};

/// One-sided overlap test.
///
/// The x and y bounds subtract the other box's size from its origin rather
/// than adding it, so only a box larger than the other can register.
fn overlaps(a: &Entity, b: &Entity) -> bool {
    a.pos.y < b.pos.y - b.height
        && a.pos.y + a.height > b.pos.y
        && a.pos.x < b.pos.x - b.width
        && a.pos.x + a.width > b.pos.x
}

/// Symmetric collision check. With `check_teams`, entities of the same
/// faction never collide.
pub fn collided(a: &Entity, b: &Entity, check_teams: bool) -> bool {
    if check_teams && a.enemy == b.enemy {
        return false;
    }
    overlaps(a, b) || overlaps(b, a)
}

fn hits_any(entity: &Entity, others: &[Entity], check_teams: bool) -> bool {
    others.iter().any(|other| collided(other, entity, check_teams))
}

/// Split `entities` into `(survivors, removed)` by `is_hit`, keeping order.
fn split_hits<F>(entities: &[Entity], is_hit: F) -> (Vec<Entity>, Vec<Entity>)
where
    F: Fn(&Entity) -> bool,
{
    let (removed, survivors) = entities.iter().cloned().partition(|e| is_hit(e));
    (survivors, removed)
}

fn matching<F>(entities: &[Entity], pred: F) -> Vec<Entity>
where
    F: Fn(&Entity) -> bool,
{
    entities.iter().filter(|e| pred(e)).cloned().collect()
}

/// Remove everything that collided and recompute the derived counters.
///
/// Removed entities are appended to the incoming `exit` in a fixed order:
/// hit aliens, bullets that hit aliens, hit shields, bullets stopped by
/// shields, bullets that hit the ship. A bullet stopped by more than one
/// target is listed once per target.
pub fn resolve_collisions(state: GameState) -> GameState {
    let ship_hit = hits_any(&state.ship, &state.bullets, true);

    let (aliens, hit_aliens) = split_hits(&state.aliens, |a| hits_any(a, &state.bullets, true));
    let (shields, hit_shields) = split_hits(&state.shields, |s| hits_any(s, &state.bullets, true));

    let alien_hit = |b: &Entity| hits_any(b, &state.aliens, true);
    let shield_hit = |b: &Entity| hits_any(b, &state.shields, false);
    let ship_hit_by = |b: &Entity| collided(b, &state.ship, true);

    let bullets: Vec<Entity> = state
        .bullets
        .iter()
        .filter(|b| !alien_hit(*b) && !shield_hit(*b) && !ship_hit_by(*b))
        .cloned()
        .collect();

    let mut exit = state.exit.clone();
    exit.extend(hit_aliens);
    exit.extend(matching(&state.bullets, &alien_hit));
    exit.extend(hit_shields);
    exit.extend(matching(&state.bullets, &shield_hit));
    exit.extend(matching(&state.bullets, &ship_hit_by));

    let lives = if ship_hit {
        let lives = state.lives.saturating_sub(1);
        log::debug!("ship hit at t={}, {} lives left", state.time, lives);
        lives
    } else {
        state.lives
    };

    // only survivors count: an alien shot on the tick it crosses the line
    // does not end the level
    let invaded = aliens.iter().any(|a| a.pos.y > INVASION_Y);

    let num_aliens = ALIEN_COUNT.saturating_sub(aliens.len() as u32);
    let points = state.level.saturating_mul(num_aliens);
    let lose = lives == 0 || invaded;
    let win = aliens.is_empty();

    if lose && !state.lose {
        log::info!("level {} lost with {} points", state.level, points);
    } else if win && !state.win {
        log::info!("level {} cleared", state.level);
    }

    GameState {
        aliens,
        bullets,
        shields,
        exit,
        lives,
        num_aliens,
        points,
        lose,
        win,
        ..state
    }
}
