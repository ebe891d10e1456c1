//! Entity state
//!
//! Runtime structs for everything that lives in a level. Built from level
//! records at load time, mutated only by the simulation tick. Positions are
//! top-left corners in level coordinates.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::config::Tuning;
use crate::level::{EnemyDef, EnemyKindDef, PlatformDef, PointDef};

/// Ticks before an entity's animation counter wraps to 0
pub const ANIM_PERIOD: u32 = 60;

/// The player avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// Facing, +1 right / -1 left (sprite flip for the renderer)
    pub direction: f32,
    pub on_ground: bool,
    pub is_jumping: bool,
    /// Whether holding the jump button still shapes the current ascent
    pub can_variable_jump: bool,
    pub invulnerable: bool,
    /// Ticks since the current jump started
    pub jump_time: u32,
    /// Ticks of invulnerability remaining
    pub invulnerability_timer: u32,
    /// Hit points within the current life
    pub health: u32,
}

impl Player {
    pub fn spawn(at: PointDef, tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(at.x, at.y),
            vel: Vec2::ZERO,
            size: Vec2::new(tuning.player_width, tuning.player_height),
            direction: 1.0,
            on_ground: false,
            is_jumping: false,
            can_variable_jump: false,
            invulnerable: false,
            jump_time: 0,
            invulnerability_timer: 0,
            health: tuning.max_health,
        }
    }

    /// Reset kinematics, health, and timers for a fresh life
    pub fn respawn(&mut self, at: PointDef, tuning: &Tuning) {
        *self = Self::spawn(at, tuning);
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// Per-species movement data
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum EnemyKind {
    /// Walks its platform, turning at walls and edges
    Slime { speed: f32 },
    /// Flies a horizontal patrol while bobbing on a sine wave
    Bird {
        speed: f32,
        amplitude: f32,
        /// Center of the vertical oscillation
        baseline: f32,
        phase: f32,
        /// Center of the horizontal patrol
        home_x: f32,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// Patrol heading, +1 right / -1 left
    pub direction: f32,
    /// Wraps at [`ANIM_PERIOD`]; renderer-only
    pub anim_time: u32,
    pub alive: bool,
}

impl Enemy {
    pub fn from_def(def: &EnemyDef, tuning: &Tuning) -> Self {
        let (kind, size) = match def.kind {
            EnemyKindDef::Slime => (
                EnemyKind::Slime {
                    speed: def.speed.unwrap_or(tuning.slime_speed),
                },
                Vec2::new(tuning.slime_width, tuning.slime_height),
            ),
            EnemyKindDef::Bird => (
                EnemyKind::Bird {
                    speed: def.speed.unwrap_or(tuning.bird_speed),
                    amplitude: def.amplitude.unwrap_or(tuning.bird_amplitude),
                    baseline: def.y,
                    phase: 0.0,
                    home_x: def.x,
                },
                Vec2::new(tuning.bird_width, tuning.bird_height),
            ),
        };
        Self {
            kind,
            pos: Vec2::new(def.x, def.y),
            vel: Vec2::ZERO,
            size,
            direction: 1.0,
            anim_time: 0,
            alive: true,
        }
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// World-fixed platform geometry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Platform {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Platform {
    pub fn from_def(def: &PlatformDef) -> Self {
        Self {
            pos: Vec2::new(def.x, def.y),
            size: Vec2::new(def.width, def.height),
        }
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// A collectible coin. Flips to collected exactly once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub pos: Vec2,
    pub size: Vec2,
    pub collected: bool,
    /// Points awarded on pickup
    pub value: u32,
}

impl Coin {
    pub fn new(at: PointDef, tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(at.x, at.y),
            size: Vec2::splat(tuning.coin_size),
            collected: false,
            value: tuning.coin_value,
        }
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// Stateless launch pad. Triggers every tick the player overlaps it while
/// falling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spring {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Spring {
    pub fn new(at: PointDef, tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(at.x, at.y),
            size: Vec2::new(tuning.spring_width, tuning.spring_height),
        }
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// The level-exit flag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Goal {
    pub fn new(at: PointDef, tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(at.x, at.y),
            size: Vec2::new(tuning.goal_width, tuning.goal_height),
        }
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_spawn_defaults() {
        let tuning = Tuning::default();
        let p = Player::spawn(PointDef { x: 100.0, y: 300.0 }, &tuning);
        assert_eq!(p.pos, Vec2::new(100.0, 300.0));
        assert_eq!(p.health, tuning.max_health);
        assert!(!p.on_ground);
        assert!(!p.is_jumping);
        assert_eq!(p.direction, 1.0);
    }

    #[test]
    fn test_enemy_def_overrides_tuning() {
        let tuning = Tuning::default();
        let def = EnemyDef {
            kind: EnemyKindDef::Bird,
            x: 50.0,
            y: 200.0,
            speed: Some(2.5),
            amplitude: Some(80.0),
        };
        let e = Enemy::from_def(&def, &tuning);
        match e.kind {
            EnemyKind::Bird { speed, amplitude, baseline, home_x, .. } => {
                assert_eq!(speed, 2.5);
                assert_eq!(amplitude, 80.0);
                assert_eq!(baseline, 200.0);
                assert_eq!(home_x, 50.0);
            }
            _ => panic!("expected a bird"),
        }
    }

    #[test]
    fn test_slime_uses_tuning_speed_by_default() {
        let tuning = Tuning::default();
        let def = EnemyDef {
            kind: EnemyKindDef::Slime,
            x: 0.0,
            y: 0.0,
            speed: None,
            amplitude: None,
        };
        let e = Enemy::from_def(&def, &tuning);
        assert_eq!(e.kind, EnemyKind::Slime { speed: tuning.slime_speed });
    }
}
