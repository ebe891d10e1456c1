//! Enemy controller
//!
//! Slimes are ground walkers: they ride gravity, patrol their platform, and
//! turn at walls and edges. Birds ignore gravity entirely, flying a
//! horizontal patrol while bobbing on a sine wave around their spawn height.

use super::entity::{ANIM_PERIOD, Enemy, EnemyKind, Platform};
use super::physics;
use crate::config::Tuning;

/// Advance one enemy by a tick. Dead enemies don't move.
pub fn update(enemy: &mut Enemy, platforms: &[Platform], tuning: &Tuning, death_plane: f32) {
    if !enemy.alive {
        return;
    }
    enemy.anim_time = (enemy.anim_time + 1) % ANIM_PERIOD;

    match enemy.kind {
        EnemyKind::Slime { speed } => update_slime(enemy, speed, platforms, tuning),
        EnemyKind::Bird { .. } => update_bird(enemy, tuning),
    }

    // Fell out of the level
    if enemy.pos.y > death_plane {
        enemy.alive = false;
    }
}

fn update_slime(enemy: &mut Enemy, speed: f32, platforms: &[Platform], tuning: &Tuning) {
    let aabb = enemy.aabb();

    // Turn before the leading foot steps past the platform edge. Only
    // meaningful while supported; an airborne slime just falls straight.
    if physics::has_support_at(aabb.center().x, aabb.bottom(), platforms) {
        let ahead_x = if enemy.direction > 0.0 {
            aabb.right() + speed
        } else {
            aabb.left() - speed
        };
        if !physics::has_support_at(ahead_x, aabb.bottom(), platforms) {
            enemy.direction = -enemy.direction;
        }
    }

    enemy.vel.x = enemy.direction * speed;
    physics::apply_gravity(&mut enemy.vel, tuning);
    let contact =
        physics::move_and_collide(&mut enemy.pos, &mut enemy.vel, enemy.size, platforms);

    // Walked into a wall; next tick moves the other way
    if contact.hit_wall {
        enemy.direction = -enemy.direction;
    }
}

fn update_bird(enemy: &mut Enemy, tuning: &Tuning) {
    let EnemyKind::Bird { speed, amplitude, baseline, phase, home_x } = &mut enemy.kind else {
        return;
    };
    let prev = enemy.pos;

    *phase += tuning.bird_phase_step;
    enemy.pos.x += enemy.direction * *speed;
    if enemy.pos.x > *home_x + tuning.bird_patrol_range {
        enemy.direction = -1.0;
    } else if enemy.pos.x < *home_x - tuning.bird_patrol_range {
        enemy.direction = 1.0;
    }
    enemy.pos.y = *baseline + *amplitude * phase.sin();

    // Renderer-facing velocity; the oscillation itself is positional
    enemy.vel = enemy.pos - prev;
}
