use space_invaders::collision::*;
use space_invaders::compute::*;
use space_invaders::entities::*;
use space_invaders::vector::Vector;

fn arena(aliens: Vec<Entity>, shields: Vec<Entity>, bullets: Vec<Entity>) -> GameState {
    let num_aliens = ALIEN_COUNT - aliens.len() as u32;
    GameState {
        aliens,
        shields,
        bullets,
        time: 1,
        num_aliens,
        ..create_level(1)
    }
}

fn player_bullet(id: &str, x: f64, y: f64) -> Entity {
    Entity::bullet(id, Vector::new(x, y), Vector::new(0.0, -1.0), 5.0, false)
}

fn alien_bullet(id: &str, x: f64, y: f64) -> Entity {
    Entity::bullet(id, Vector::new(x, y), Vector::new(0.0, 1.0), 3.0, true)
}

fn ids(entities: &[Entity]) -> Vec<&str> {
    entities.iter().map(|e| e.id.as_str()).collect()
}

// ── collided ──────────────────────────────────────────────────────────────────

#[test]
fn bullet_inside_alien_collides_either_order() {
    let alien = Entity::alien("a", Vector::new(100.0, 100.0));
    let bullet = player_bullet("b", 110.0, 115.0);
    assert!(collided(&alien, &bullet, true));
    assert!(collided(&bullet, &alien, true));
}

#[test]
fn one_sided_bounds_are_reproduced() {
    let alien = Entity::alien("a", Vector::new(100.0, 100.0));
    // inside the box, but not past origin + the bullet's own size
    assert!(!collided(&alien, &player_bullet("b", 100.5, 100.5), true));
    assert!(collided(&alien, &player_bullet("b", 101.5, 101.5), true));
    // equal boxes on top of each other never register
    let twin = Entity::shield("s", Vector::new(100.0, 100.0));
    let other = Entity::shield("t", Vector::new(100.0, 100.0));
    assert!(!collided(&twin, &other, false));
}

#[test]
fn same_faction_never_collides_with_team_check() {
    let alien = Entity::alien("a", Vector::new(100.0, 100.0));
    let own_fire = alien_bullet("b", 110.0, 115.0);
    assert!(!collided(&alien, &own_fire, true));
    assert!(collided(&alien, &own_fire, false));

    let shield = Entity::shield("s", Vector::new(100.0, 400.0));
    let player = player_bullet("p", 105.0, 405.0);
    assert!(!collided(&shield, &player, true));
    assert!(collided(&shield, &player, false));
}

#[test]
fn disjoint_boxes_do_not_collide() {
    let alien = Entity::alien("a", Vector::new(100.0, 100.0));
    assert!(!collided(&alien, &player_bullet("b", 200.0, 115.0), false));
    assert!(!collided(&alien, &player_bullet("b", 110.0, 300.0), false));
}

// ── Scenarios through a full tick ─────────────────────────────────────────────

#[test]
fn player_bullet_kills_one_of_two_aliens() {
    let s = arena(
        vec![
            Entity::alien("alienA", Vector::new(100.0, 100.0)),
            Entity::alien("alienB", Vector::new(400.0, 100.0)),
        ],
        Vec::new(),
        vec![player_bullet("bullet0", 110.0, 120.0)],
    );
    let s2 = reduce(&s, &Command::Tick { elapsed: 2 });

    assert_eq!(ids(&s2.exit), vec!["alienA", "bullet0"]);
    assert_eq!(ids(&s2.aliens), vec!["alienB"]);
    assert_eq!(s2.aliens[0].pos, Vector::new(400.0, 100.0));
    assert!(s2.bullets.is_empty());
    assert_eq!(s2.num_aliens, s.num_aliens + 1);
    assert_eq!(s2.points, s2.level * s2.num_aliens);
    assert!(!s2.win && !s2.lose);
}

#[test]
fn last_life_lost_ends_the_game() {
    let s = GameState {
        lives: 1,
        ..arena(
            vec![Entity::alien("alien0", Vector::new(75.0, 100.0))],
            Vec::new(),
            vec![alien_bullet("alien0bullet0", 290.0, 507.0)],
        )
    };
    let s2 = reduce(&s, &Command::Tick { elapsed: 2 });
    assert_eq!(s2.lives, 0);
    assert!(s2.lose);
    assert_eq!(ids(&s2.exit), vec!["alien0bullet0"]);
    assert!(s2.bullets.is_empty());
}

#[test]
fn ship_hit_costs_one_life() {
    let s = arena(
        vec![Entity::alien("alien0", Vector::new(75.0, 100.0))],
        Vec::new(),
        vec![
            alien_bullet("b1", 290.0, 507.0),
            alien_bullet("b2", 300.0, 507.0),
        ],
    );
    let s2 = reduce(&s, &Command::Tick { elapsed: 2 });
    assert_eq!(s2.lives, 2);
    assert!(!s2.lose);
    assert_eq!(ids(&s2.exit), vec!["b1", "b2"]);
}

#[test]
fn enemy_bullet_destroys_shield_fragment() {
    let s = arena(
        vec![Entity::alien("alien0", Vector::new(75.0, 100.0))],
        vec![
            Entity::shield("shield0", Vector::new(100.0, 400.0)),
            Entity::shield("shield1", Vector::new(110.0, 400.0)),
        ],
        vec![alien_bullet("b", 105.0, 402.0)],
    );
    let s2 = reduce(&s, &Command::Tick { elapsed: 2 });
    assert_eq!(ids(&s2.shields), vec!["shield1"]);
    assert_eq!(ids(&s2.exit), vec!["shield0", "b"]);
    assert!(s2.bullets.is_empty());
}

#[test]
fn shield_blocks_player_bullet_without_breaking() {
    let s = arena(
        vec![Entity::alien("alien0", Vector::new(75.0, 100.0))],
        vec![Entity::shield("shield0", Vector::new(100.0, 400.0))],
        vec![player_bullet("b", 105.0, 410.0)],
    );
    let s2 = reduce(&s, &Command::Tick { elapsed: 2 });
    assert_eq!(ids(&s2.shields), vec!["shield0"]);
    assert_eq!(ids(&s2.exit), vec!["b"]);
    assert!(s2.bullets.is_empty());
}

#[test]
fn exit_order_is_aliens_shields_then_ship() {
    let s = arena(
        vec![
            Entity::alien("alienA", Vector::new(100.0, 100.0)),
            Entity::alien("alienB", Vector::new(400.0, 100.0)),
        ],
        vec![Entity::shield("shield0", Vector::new(100.0, 400.0))],
        vec![
            alien_bullet("toShip", 290.0, 507.0),
            alien_bullet("toShield", 105.0, 402.0),
            player_bullet("toAlien", 110.0, 120.0),
        ],
    );
    let s2 = reduce(&s, &Command::Tick { elapsed: 2 });
    assert_eq!(
        ids(&s2.exit),
        vec!["alienA", "toAlien", "shield0", "toShield", "toShip"]
    );
    assert_eq!(s2.lives, 2);
}

#[test]
fn exit_does_not_accumulate() {
    let s = arena(
        vec![
            Entity::alien("alienA", Vector::new(100.0, 100.0)),
            Entity::alien("alienB", Vector::new(400.0, 100.0)),
        ],
        Vec::new(),
        vec![player_bullet("bullet0", 110.0, 120.0)],
    );
    let s2 = reduce(&s, &Command::Tick { elapsed: 2 });
    assert_eq!(s2.exit.len(), 2);
    let s3 = reduce(&s2, &Command::Tick { elapsed: 3 });
    assert!(s3.exit.is_empty());
}

#[test]
fn last_alien_down_wins() {
    let s = arena(
        vec![Entity::alien("alien0", Vector::new(100.0, 100.0))],
        Vec::new(),
        vec![player_bullet("bullet0", 110.0, 120.0)],
    );
    let s2 = reduce(&s, &Command::Tick { elapsed: 2 });
    assert!(s2.win);
    assert!(!s2.lose);
    assert_eq!(s2.num_aliens, 32);
    assert_eq!(s2.points, 32);

    let next = reduce(&s2, &Command::LoadLevel);
    assert_eq!(next.level, 2);
    assert_eq!(next.aliens.len(), 32);
    assert_eq!(next.shields.len(), 48);
    assert_eq!(next.lives, 3);
}

#[test]
fn invasion_line_is_strict() {
    let below = arena(vec![Entity::alien("alien0", Vector::new(75.0, 351.0))], Vec::new(), Vec::new());
    assert!(reduce(&below, &Command::Tick { elapsed: 2 }).lose);

    let on = arena(vec![Entity::alien("alien0", Vector::new(75.0, 350.0))], Vec::new(), Vec::new());
    assert!(!reduce(&on, &Command::Tick { elapsed: 2 }).lose);
}

#[test]
fn alien_shot_while_crossing_the_line_does_not_invade() {
    let s = arena(
        vec![
            Entity::alien("alienA", Vector::new(100.0, 351.0)),
            Entity::alien("alienB", Vector::new(400.0, 100.0)),
        ],
        Vec::new(),
        vec![player_bullet("bullet0", 110.0, 371.0)],
    );
    let s2 = reduce(&s, &Command::Tick { elapsed: 2 });
    assert_eq!(ids(&s2.exit), vec!["alienA", "bullet0"]);
    assert_eq!(ids(&s2.aliens), vec!["alienB"]);
    assert!(!s2.lose);
}

#[test]
fn resolve_keeps_untouched_state() {
    let s = arena(
        vec![Entity::alien("alien0", Vector::new(75.0, 100.0))],
        vec![Entity::shield("shield0", Vector::new(100.0, 400.0))],
        vec![player_bullet("b", 500.0, 300.0)],
    );
    let s2 = resolve_collisions(s.clone());
    assert_eq!(s2.aliens, s.aliens);
    assert_eq!(s2.shields, s.shields);
    assert_eq!(s2.bullets, s.bullets);
    assert!(s2.exit.is_empty());
    assert_eq!(s2.lives, 3);
    assert_eq!(s2.num_aliens, 31);
    assert_eq!(s2.points, 31);
}
