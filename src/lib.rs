//! Meadow Run - simulation core for a 2D side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, entities, game state)
//! - `level`: Level data records and validation
//! - `config`: Immutable simulation tuning
//! - `runner`: Fixed-timestep scheduler and host capability traits
//! - `camera`: Follow camera handed to the renderer capability
//! - `assets`: Asset readiness registry for renderers
//! - `highscores`: Local top-10 leaderboard with file persistence

pub mod assets;
pub mod audio;
pub mod camera;
pub mod config;
pub mod highscores;
pub mod level;
pub mod runner;
pub mod sim;

pub use config::Tuning;
pub use highscores::HighScores;
pub use level::{LevelData, LevelError};

/// Loop timing constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per rendered frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Largest frame delta fed to the accumulator (stalls don't snowball)
    pub const MAX_FRAME_DT: f32 = 0.1;
}
