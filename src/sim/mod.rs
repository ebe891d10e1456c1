//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Per-tick units only (px/tick, px/tick^2), no wall-clock time
//! - Stable iteration order (level definition order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod enemy;
pub mod entity;
pub mod events;
pub mod physics;
pub mod player;
pub mod state;
pub mod tick;

pub use collision::Aabb;
pub use entity::{Coin, Enemy, EnemyKind, Goal, Platform, Player, Spring};
pub use events::GameEvent;
pub use state::{GameState, Phase};
pub use tick::{TickInput, tick};
