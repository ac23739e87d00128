//! Scene bookkeeping for renderers.
//!
//! A `Scene` mirrors emitted states as id-keyed sprites: entities are
//! upserted, anything listed in `exit` is dropped, and a finished level
//! wipes the field behind a banner. Renderers only read it.

use std::collections::BTreeMap;

use crate::entities::{Entity, GameState};

/// Player bullets faster than this are drawn as charged shots.
const CHARGED_SPEED: f64 = 20.0;
const BULLET_WIDTH: f64 = 3.0;
const BULLET_HEIGHT: f64 = 18.0;
const CHARGED_BULLET_HEIGHT: f64 = 20.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpriteKind {
    Ship,
    Alien,
    Shield,
    PlayerBullet,
    ChargedBullet,
    AlienBullet,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Sprite {
    fn sized(kind: SpriteKind, entity: &Entity, width: f64, height: f64) -> Self {
        Self {
            kind,
            x: entity.pos.x,
            y: entity.pos.y,
            width,
            height,
        }
    }

    fn of(kind: SpriteKind, entity: &Entity) -> Self {
        Self::sized(kind, entity, entity.width, entity.height)
    }

    fn bullet(entity: &Entity) -> Self {
        match (entity.enemy, entity.speed > CHARGED_SPEED) {
            (true, _) => Self::sized(SpriteKind::AlienBullet, entity, BULLET_WIDTH, BULLET_HEIGHT),
            (false, true) => Self::sized(
                SpriteKind::ChargedBullet,
                entity,
                BULLET_WIDTH,
                CHARGED_BULLET_HEIGHT,
            ),
            (false, false) => {
                Self::sized(SpriteKind::PlayerBullet, entity, BULLET_WIDTH, BULLET_HEIGHT)
            }
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Hud {
    pub points: u32,
    pub level: u32,
    pub lives: u32,
}

impl Hud {
    pub fn score_text(&self) -> String {
        format!("Score: {}", self.points)
    }

    pub fn level_text(&self) -> String {
        format!("Level: {}", self.level)
    }

    pub fn lives_text(&self) -> String {
        format!("Lives: {}", self.lives)
    }
}

#[derive(Clone, Debug, Default)]
pub struct Scene {
    sprites: BTreeMap<String, Sprite>,
    hud: Hud,
    banner: Option<String>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sprites(&self) -> impl Iterator<Item = (&str, &Sprite)> {
        self.sprites.iter().map(|(id, sprite)| (id.as_str(), sprite))
    }

    pub fn sprite(&self, id: &str) -> Option<&Sprite> {
        self.sprites.get(id)
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    pub fn hud(&self) -> &Hud {
        &self.hud
    }

    /// End-of-level message, present while the field is wiped.
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    fn upsert(&mut self, entity: &Entity, sprite: Sprite) {
        match self.sprites.get_mut(&entity.id) {
            Some(existing) => {
                existing.x = sprite.x;
                existing.y = sprite.y;
            }
            None => {
                self.sprites.insert(entity.id.clone(), sprite);
            }
        }
    }

    /// Bring the scene in line with a freshly emitted state.
    pub fn apply(&mut self, state: &GameState) {
        self.upsert(&state.ship, Sprite::of(SpriteKind::Ship, &state.ship));
        for bullet in &state.bullets {
            self.upsert(bullet, Sprite::bullet(bullet));
        }
        for alien in &state.aliens {
            self.upsert(alien, Sprite::of(SpriteKind::Alien, alien));
        }
        for shield in &state.shields {
            self.upsert(shield, Sprite::of(SpriteKind::Shield, shield));
        }
        for gone in &state.exit {
            self.sprites.remove(&gone.id);
        }

        self.hud = Hud {
            points: state.points,
            level: state.level,
            lives: state.lives,
        };

        self.banner = if state.win {
            Some(format!(
                "You beat level {} ! Press 'Down' to go to the next level",
                state.level
            ))
        } else if state.lose {
            Some(format!(
                "Game Over, Score: {}. Press 'Down' to restart",
                state.points
            ))
        } else {
            None
        };
        if self.banner.is_some() {
            self.sprites.clear();
        }
    }
}
