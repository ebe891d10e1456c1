//! Gravity and platform collision resolution
//!
//! Bodies move one axis at a time, x before y. Resolving horizontal motion
//! first keeps a falling body that clips a platform corner from being lifted
//! onto a side it approached laterally; the vertical pass then only sees
//! genuine landings and head bumps. The resolver snaps to platform faces, so
//! a landed body sits at exactly `platform.top - body.height`.

use glam::Vec2;

use super::collision::Aabb;
use super::entity::Platform;
use crate::config::Tuning;

/// Contact flags produced by one resolution pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Contact {
    /// Body ended the tick standing on a platform
    pub on_ground: bool,
    /// Horizontal motion was stopped by a platform side
    pub hit_wall: bool,
    /// Upward motion was stopped by a platform underside
    pub hit_ceiling: bool,
}

/// One tick of gravity, clamped to terminal fall speed
#[inline]
pub fn apply_gravity(vel: &mut Vec2, tuning: &Tuning) {
    vel.y = (vel.y + tuning.gravity).min(tuning.terminal_velocity);
}

/// Move a body by its velocity and resolve against every platform.
///
/// The final pass pushes out along the axis of minimal penetration; with the
/// axis passes done it only fires for bodies that started the tick inside
/// geometry (e.g. spawned overlapping), which is recovered, never an error.
pub fn move_and_collide(
    pos: &mut Vec2,
    vel: &mut Vec2,
    size: Vec2,
    platforms: &[Platform],
) -> Contact {
    let mut contact = Contact::default();

    // Horizontal pass
    let dir_x = vel.x;
    if dir_x != 0.0 {
        pos.x += dir_x;
        for platform in platforms {
            let plat = platform.aabb();
            if Aabb::new(*pos, size).overlaps(&plat) {
                if dir_x > 0.0 {
                    pos.x = plat.left() - size.x;
                } else {
                    pos.x = plat.right();
                }
                vel.x = 0.0;
                contact.hit_wall = true;
            }
        }
    }

    // Vertical pass
    let dir_y = vel.y;
    if dir_y != 0.0 {
        pos.y += dir_y;
        for platform in platforms {
            let plat = platform.aabb();
            if Aabb::new(*pos, size).overlaps(&plat) {
                if dir_y > 0.0 {
                    // Falling: land on top
                    pos.y = plat.top() - size.y;
                    vel.y = 0.0;
                    contact.on_ground = true;
                } else {
                    // Rising: bump the underside
                    pos.y = plat.bottom();
                    vel.y = 0.0;
                    contact.hit_ceiling = true;
                }
            }
        }
    }

    // Recovery for bodies that began the tick inside geometry. Snap to the
    // face indicated by the minimal-penetration axis; a push can land in a
    // neighboring platform, so repeat until clean (bounded).
    for _ in 0..4 {
        let mut pushed = false;
        for platform in platforms {
            let plat = platform.aabb();
            if let Some(push) = Aabb::new(*pos, size).depenetration(&plat) {
                pushed = true;
                if push.x < 0.0 {
                    pos.x = plat.left() - size.x;
                    vel.x = 0.0;
                    contact.hit_wall = true;
                } else if push.x > 0.0 {
                    pos.x = plat.right();
                    vel.x = 0.0;
                    contact.hit_wall = true;
                } else if push.y < 0.0 {
                    pos.y = plat.top() - size.y;
                    vel.y = 0.0;
                    contact.on_ground = true;
                } else {
                    pos.y = plat.bottom();
                    vel.y = 0.0;
                    contact.hit_ceiling = true;
                }
            }
        }
        if !pushed {
            break;
        }
    }

    contact
}

/// Whether a body standing at `pos` would still be supported after stepping
/// to `probe_x`. Used by patrolling enemies to turn before walking off an
/// edge.
pub fn has_support_at(probe_x: f32, bottom_y: f32, platforms: &[Platform]) -> bool {
    // Look a short way below the feet; resting contact is edge-exact
    let probe = Vec2::new(probe_x, bottom_y + 1.0);
    platforms.iter().any(|p| p.aabb().contains_point(probe))
}
