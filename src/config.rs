//! Simulation tuning
//!
//! Every gameplay constant lives here as one immutable struct handed to the
//! simulation at construction. Units are pixels and ticks: velocities are
//! px/tick, accelerations px/tick². Defaults reproduce the original game's
//! feel and are relied on by the regression tests.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    /// Visible world width in pixels (camera viewport)
    pub world_width: f32,
    /// Visible world height in pixels
    pub world_height: f32,
    /// Distance below the level floor at which the death plane sits
    pub death_margin: f32,

    // === Physics ===
    /// Downward acceleration applied to airborne entities each tick
    pub gravity: f32,
    /// Maximum downward speed (falling never exceeds this)
    pub terminal_velocity: f32,

    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    /// Horizontal run speed
    pub move_speed: f32,
    /// Initial upward speed when a jump starts
    pub jump_power: f32,
    /// Ticks the jump button can keep shaping the ascent
    pub max_jump_time: u32,
    /// Gravity multiple subtracted on the first held tick of a jump.
    /// Tuned value; changing it changes every jump arc.
    pub first_hold_boost: f32,
    /// Gravity fraction subtracted on later held ticks
    pub hold_gravity_factor: f32,
    /// Hit points per life
    pub max_health: u32,
    /// Lives per session
    pub starting_lives: u32,
    /// Ticks of post-damage invulnerability
    pub invulnerability_ticks: u32,
    /// Upward speed granted by stomping an enemy
    pub stomp_bounce: f32,

    // === Enemies ===
    pub slime_width: f32,
    pub slime_height: f32,
    /// Default slime patrol speed (level data may override)
    pub slime_speed: f32,
    pub bird_width: f32,
    pub bird_height: f32,
    /// Default bird patrol speed
    pub bird_speed: f32,
    /// Default bird oscillation amplitude in pixels
    pub bird_amplitude: f32,
    /// Radians the bird's oscillation phase advances per tick
    pub bird_phase_step: f32,
    /// Half-width of a bird's horizontal patrol range
    pub bird_patrol_range: f32,

    // === Collectibles ===
    pub coin_size: f32,
    pub spring_width: f32,
    pub spring_height: f32,
    /// Upward speed granted by a spring
    pub spring_velocity: f32,
    pub goal_width: f32,
    pub goal_height: f32,

    // === Scoring ===
    /// Points per coin
    pub coin_value: u32,
    /// Points per stomped enemy
    pub stomp_value: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world_width: 960.0,
            world_height: 540.0,
            death_margin: 120.0,

            gravity: 0.65,
            terminal_velocity: 15.0,

            player_width: 40.0,
            player_height: 60.0,
            move_speed: 4.5,
            jump_power: 18.0,
            max_jump_time: 22,
            first_hold_boost: 1.8,
            hold_gravity_factor: 0.5,
            max_health: 3,
            starting_lives: 3,
            invulnerability_ticks: 90,
            stomp_bounce: 10.0,

            slime_width: 36.0,
            slime_height: 28.0,
            slime_speed: 0.7,
            bird_width: 34.0,
            bird_height: 26.0,
            bird_speed: 1.2,
            bird_amplitude: 40.0,
            bird_phase_step: 0.05,
            bird_patrol_range: 120.0,

            coin_size: 24.0,
            spring_width: 40.0,
            spring_height: 16.0,
            spring_velocity: 22.0,
            goal_width: 40.0,
            goal_height: 80.0,

            coin_value: 10,
            stomp_value: 50,
        }
    }
}

impl Tuning {
    /// Parse a tuning override file. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Y coordinate below which an entity counts as fallen out of the level
    #[inline]
    pub fn death_plane(&self, level_height: f32) -> f32 {
        level_height + self.death_margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_feel() {
        let t = Tuning::default();
        assert_eq!(t.gravity, 0.65);
        assert_eq!(t.jump_power, 18.0);
        assert_eq!(t.first_hold_boost, 1.8);
        assert_eq!(t.slime_speed, 0.7);
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let t = Tuning::from_json(r#"{"gravity": 0.8, "coin_value": 25}"#).unwrap();
        assert_eq!(t.gravity, 0.8);
        assert_eq!(t.coin_value, 25);
        assert_eq!(t.jump_power, Tuning::default().jump_power);
    }

    #[test]
    fn test_death_plane_below_level() {
        let t = Tuning::default();
        assert_eq!(t.death_plane(540.0), 660.0);
    }
}
