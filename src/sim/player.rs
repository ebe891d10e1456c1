//! Player controller
//!
//! Per-tick pipeline: horizontal intent, jump start, gravity, variable-jump
//! shaping, timers, then platform resolution. The variable-height jump works
//! by subtracting a slice of gravity while the button stays held, so an
//! early release simply lets full gravity shorten the arc.

use super::entity::{Enemy, Platform, Player};
use super::events::GameEvent;
use super::physics::{self, Contact};
use super::tick::TickInput;
use crate::config::Tuning;

/// What player-enemy contact resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyContact {
    /// Player landed on the enemy; enemy dies, player bounces
    Stomped,
    /// Player took a hit. `fatal` when it emptied their health.
    Damaged { fatal: bool },
    /// Invulnerability window absorbed the hit
    Ignored,
}

/// Begin a jump if the player is standing on something. Pressing jump while
/// airborne does nothing.
pub fn start_jump(player: &mut Player, tuning: &Tuning) -> bool {
    if !player.on_ground {
        return false;
    }
    player.vel.y = -tuning.jump_power;
    player.on_ground = false;
    player.is_jumping = true;
    player.can_variable_jump = true;
    player.jump_time = 0;
    true
}

/// Advance the player one tick against the platform list
pub fn update(
    player: &mut Player,
    input: &TickInput,
    platforms: &[Platform],
    tuning: &Tuning,
    events: &mut Vec<GameEvent>,
) -> Contact {
    // Horizontal intent maps straight to velocity
    if input.left == input.right {
        player.vel.x = 0.0;
    } else if input.left {
        player.vel.x = -tuning.move_speed;
        player.direction = -1.0;
    } else {
        player.vel.x = tuning.move_speed;
        player.direction = 1.0;
    }

    let started_jump = input.jump && start_jump(player, tuning);
    if started_jump {
        events.push(GameEvent::Jump);
    }

    physics::apply_gravity(&mut player.vel, tuning);

    // Hold shaping on the ticks after takeoff. The first eligible tick gets
    // the big tuned boost, later ones a gravity fraction; releasing forfeits
    // the remainder of the window for this jump.
    if !started_jump && player.is_jumping && !player.on_ground {
        player.jump_time += 1;
        if input.jump {
            if player.can_variable_jump && player.jump_time < tuning.max_jump_time {
                let boost = if player.jump_time == 1 {
                    tuning.first_hold_boost
                } else {
                    tuning.hold_gravity_factor
                };
                player.vel.y -= tuning.gravity * boost;
            }
        } else {
            player.can_variable_jump = false;
        }
    }

    if player.invulnerability_timer > 0 {
        player.invulnerability_timer -= 1;
        if player.invulnerability_timer == 0 {
            player.invulnerable = false;
        }
    }

    let contact =
        physics::move_and_collide(&mut player.pos, &mut player.vel, player.size, platforms);
    player.on_ground = contact.on_ground;
    if contact.on_ground {
        player.is_jumping = false;
        player.can_variable_jump = false;
        player.jump_time = 0;
    }
    contact
}

/// Resolve touching an enemy: stomp when falling onto its top face,
/// otherwise damage gated by the invulnerability window. The caller marks
/// the enemy dead and scores the stomp.
pub fn resolve_enemy_contact(
    player: &mut Player,
    enemy: &Enemy,
    tuning: &Tuning,
) -> EnemyContact {
    let from_above = match player.aabb().depenetration(&enemy.aabb()) {
        // Minimal push is upward when the overlap came through the top face
        Some(push) => push.y < 0.0,
        None => return EnemyContact::Ignored,
    };

    if player.vel.y > 0.0 && from_above {
        player.vel.y = -tuning.stomp_bounce;
        player.on_ground = false;
        player.is_jumping = false;
        player.can_variable_jump = false;
        return EnemyContact::Stomped;
    }

    if player.invulnerable {
        return EnemyContact::Ignored;
    }

    player.health = player.health.saturating_sub(1);
    player.invulnerable = true;
    player.invulnerability_timer = tuning.invulnerability_ticks;
    EnemyContact::Damaged { fatal: player.health == 0 }
}

/// Launch the player off a spring. Only meaningful while falling; the spring
/// itself keeps no state.
pub fn launch_from_spring(player: &mut Player, tuning: &Tuning) {
    player.vel.y = -tuning.spring_velocity;
    player.on_ground = false;
    player.is_jumping = false;
    player.can_variable_jump = false;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::{EnemyDef, EnemyKindDef, PointDef};
    use glam::Vec2;

    fn floor() -> Vec<Platform> {
        vec![Platform {
            pos: Vec2::new(0.0, 500.0),
            size: Vec2::new(2000.0, 40.0),
        }]
    }

    fn grounded_player(tuning: &Tuning) -> Player {
        let mut p = Player::spawn(PointDef { x: 100.0, y: 440.0 }, tuning);
        p.on_ground = true;
        p
    }

    fn slime_at(x: f32, y: f32, tuning: &Tuning) -> Enemy {
        Enemy::from_def(
            &EnemyDef {
                kind: EnemyKindDef::Slime,
                x,
                y,
                speed: None,
                amplitude: None,
            },
            tuning,
        )
    }

    const HELD_JUMP: TickInput = TickInput {
        left: false,
        right: false,
        jump: true,
        pause: false,
    };

    #[test]
    fn test_jump_sets_takeoff_velocity() {
        let tuning = Tuning::default();
        let mut p = grounded_player(&tuning);

        assert!(start_jump(&mut p, &tuning));
        assert_eq!(p.vel.y, -tuning.jump_power);
        assert!(!p.on_ground);
        assert!(p.is_jumping);
        assert!(p.can_variable_jump);
    }

    #[test]
    fn test_jump_needs_ground() {
        let tuning = Tuning::default();
        let mut p = grounded_player(&tuning);
        p.on_ground = false;
        let vel_before = p.vel;

        assert!(!start_jump(&mut p, &tuning));
        assert_eq!(p.vel, vel_before);
        assert!(!p.is_jumping);
    }

    #[test]
    fn test_jump_not_retriggered_midair() {
        let tuning = Tuning::default();
        let plats = floor();
        let mut p = grounded_player(&tuning);
        let mut events = Vec::new();

        // Take off, then release for a tick to end the shaping window
        update(&mut p, &HELD_JUMP, &plats, &tuning, &mut events);
        update(&mut p, &TickInput::default(), &plats, &tuning, &mut events);
        assert!(!p.can_variable_jump);

        // Pressing jump again mid-air changes nothing but gravity
        let before = p.vel.y;
        update(&mut p, &HELD_JUMP, &plats, &tuning, &mut events);
        assert!((p.vel.y - (before + tuning.gravity)).abs() < 1e-4);
        assert_eq!(events.iter().filter(|e| **e == GameEvent::Jump).count(), 1);
    }

    #[test]
    fn test_first_held_tick_gets_tuned_boost() {
        let tuning = Tuning::default();
        let plats = floor();
        let mut p = grounded_player(&tuning);
        let mut events = Vec::new();

        // Takeoff tick: jump then gravity
        update(&mut p, &HELD_JUMP, &plats, &tuning, &mut events);
        let expect0 = -tuning.jump_power + tuning.gravity;
        assert!((p.vel.y - expect0).abs() < 1e-4);

        // First held tick: gravity, minus gravity * first_hold_boost
        update(&mut p, &HELD_JUMP, &plats, &tuning, &mut events);
        let expect1 = expect0 + tuning.gravity - tuning.gravity * tuning.first_hold_boost;
        assert!((p.vel.y - expect1).abs() < 1e-4);

        // Second held tick falls back to the smaller fraction
        update(&mut p, &HELD_JUMP, &plats, &tuning, &mut events);
        let expect2 = expect1 + tuning.gravity - tuning.gravity * tuning.hold_gravity_factor;
        assert!((p.vel.y - expect2).abs() < 1e-4);
    }

    #[test]
    fn test_release_ends_shaping_for_good() {
        let tuning = Tuning::default();
        let plats = floor();
        let mut p = grounded_player(&tuning);
        let mut events = Vec::new();

        update(&mut p, &HELD_JUMP, &plats, &tuning, &mut events);
        update(&mut p, &TickInput::default(), &plats, &tuning, &mut events);
        assert!(!p.can_variable_jump);

        // Re-pressing must not resume compensation
        let before = p.vel.y;
        update(&mut p, &HELD_JUMP, &plats, &tuning, &mut events);
        assert!((p.vel.y - (before + tuning.gravity)).abs() < 1e-4);
    }

    #[test]
    fn test_landing_resets_jump_state() {
        let tuning = Tuning::default();
        let plats = floor();
        let mut p = grounded_player(&tuning);
        let mut events = Vec::new();

        update(&mut p, &HELD_JUMP, &plats, &tuning, &mut events);
        let mut ticks = 0;
        while !p.on_ground {
            update(&mut p, &TickInput::default(), &plats, &tuning, &mut events);
            ticks += 1;
            assert!(ticks < 300, "player never landed");
        }
        assert!(!p.is_jumping);
        assert!(!p.can_variable_jump);
        assert_eq!(p.jump_time, 0);
        assert_eq!(p.pos.y + p.size.y, 500.0);
    }

    #[test]
    fn test_horizontal_input_sets_velocity_and_facing() {
        let tuning = Tuning::default();
        let plats = floor();
        let mut p = grounded_player(&tuning);
        let mut events = Vec::new();

        let left = TickInput { left: true, ..TickInput::default() };
        update(&mut p, &left, &plats, &tuning, &mut events);
        assert_eq!(p.direction, -1.0);

        let right = TickInput { right: true, ..TickInput::default() };
        update(&mut p, &right, &plats, &tuning, &mut events);
        assert_eq!(p.vel.x, tuning.move_speed);
        assert_eq!(p.direction, 1.0);

        let both = TickInput { left: true, right: true, ..TickInput::default() };
        update(&mut p, &both, &plats, &tuning, &mut events);
        assert_eq!(p.vel.x, 0.0);
    }

    #[test]
    fn test_stomp_bounces_without_damage() {
        let tuning = Tuning::default();
        let mut p = grounded_player(&tuning);
        // Falling so the bottom just bit into the slime's top
        let e = slime_at(100.0, 490.0, &tuning);
        p.pos = Vec2::new(100.0, 490.0 - p.size.y + 4.0);
        p.on_ground = false;
        p.vel.y = 6.0;

        let outcome = resolve_enemy_contact(&mut p, &e, &tuning);
        assert_eq!(outcome, EnemyContact::Stomped);
        assert_eq!(p.vel.y, -tuning.stomp_bounce);
        assert_eq!(p.health, tuning.max_health);
        assert!(!p.invulnerable);
    }

    #[test]
    fn test_side_contact_damages_and_arms_invulnerability() {
        let tuning = Tuning::default();
        let mut p = grounded_player(&tuning);
        let e = slime_at(130.0, 472.0, &tuning);
        // Standing beside the slime, overlapping its left face
        p.pos = Vec2::new(130.0 - p.size.x + 6.0, 500.0 - p.size.y);
        p.vel.y = 0.0;

        let outcome = resolve_enemy_contact(&mut p, &e, &tuning);
        assert_eq!(outcome, EnemyContact::Damaged { fatal: false });
        assert_eq!(p.health, tuning.max_health - 1);
        assert!(p.invulnerable);
        assert_eq!(p.invulnerability_timer, tuning.invulnerability_ticks);

        // A second hit inside the window is absorbed
        let outcome = resolve_enemy_contact(&mut p, &e, &tuning);
        assert_eq!(outcome, EnemyContact::Ignored);
        assert_eq!(p.health, tuning.max_health - 1);
    }

    #[test]
    fn test_fatal_hit_reports_fatal() {
        let tuning = Tuning::default();
        let mut p = grounded_player(&tuning);
        p.health = 1;
        let e = slime_at(130.0, 472.0, &tuning);
        p.pos = Vec2::new(130.0 - p.size.x + 6.0, 500.0 - p.size.y);

        let outcome = resolve_enemy_contact(&mut p, &e, &tuning);
        assert_eq!(outcome, EnemyContact::Damaged { fatal: true });
        assert_eq!(p.health, 0);
    }

    #[test]
    fn test_invulnerability_window_expires() {
        let tuning = Tuning::default();
        let plats = floor();
        let mut p = grounded_player(&tuning);
        let mut events = Vec::new();
        p.invulnerable = true;
        p.invulnerability_timer = 3;

        for _ in 0..3 {
            assert!(p.invulnerable);
            update(&mut p, &TickInput::default(), &plats, &tuning, &mut events);
        }
        assert!(!p.invulnerable);
        assert_eq!(p.invulnerability_timer, 0);
    }

    #[test]
    fn test_spring_launch() {
        let tuning = Tuning::default();
        let mut p = grounded_player(&tuning);
        p.vel.y = 9.0;
        launch_from_spring(&mut p, &tuning);
        assert_eq!(p.vel.y, -tuning.spring_velocity);
        assert!(!p.on_ground);
        assert!(!p.can_variable_jump);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::level::PointDef;
    use glam::Vec2;
    use proptest::prelude::*;

    fn floor() -> Vec<Platform> {
        // Wide enough that 64 ticks of running can't leave it
        vec![Platform {
            pos: Vec2::new(-500.0, 500.0),
            size: Vec2::new(3000.0, 40.0),
        }]
    }

    /// Apex height (smallest y reached) for a jump held `hold` ticks
    fn apex_for_hold(hold: u32) -> f32 {
        let tuning = Tuning::default();
        let plats = floor();
        let mut p = Player::spawn(PointDef { x: 100.0, y: 440.0 }, &tuning);
        p.on_ground = true;
        let mut events = Vec::new();

        let mut apex = p.pos.y;
        for t in 0..240 {
            let input = TickInput {
                jump: t < hold,
                ..TickInput::default()
            };
            update(&mut p, &input, &plats, &tuning, &mut events);
            apex = apex.min(p.pos.y);
            if t > 0 && p.on_ground {
                break;
            }
        }
        apex
    }

    proptest! {
        /// Releasing the button earlier never produces a higher apex.
        /// (Smaller y is higher on screen.)
        #[test]
        fn variable_jump_monotonic(short in 1u32..30, extra in 1u32..30) {
            let long = short + extra;
            let apex_short = apex_for_hold(short);
            let apex_long = apex_for_hold(long);
            prop_assert!(
                apex_short >= apex_long - 1e-3,
                "hold {} reached {}, hold {} reached {}",
                short, apex_short, long, apex_long
            );
        }

        /// However the buttons are mashed, health never exceeds max and the
        /// player never ends a tick below their resting depth in the floor.
        #[test]
        fn mashing_never_breaks_player_state(seed in proptest::collection::vec(0u8..8, 64)) {
            let tuning = Tuning::default();
            let plats = floor();
            let mut p = Player::spawn(PointDef { x: 100.0, y: 440.0 }, &tuning);
            let mut events = Vec::new();

            for bits in seed {
                let input = TickInput {
                    left: bits & 1 != 0,
                    right: bits & 2 != 0,
                    jump: bits & 4 != 0,
                    pause: false,
                };
                update(&mut p, &input, &plats, &tuning, &mut events);
                prop_assert!(p.health <= tuning.max_health);
                prop_assert!(p.pos.y + p.size.y <= 500.0 + 1e-3);
                prop_assert!(p.jump_time <= 240);
            }
        }
    }
}
