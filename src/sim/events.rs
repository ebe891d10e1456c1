//! Simulation events
//!
//! Each tick returns the events it produced. The host forwards them to the
//! audio capability and may react to the lifecycle ones (e.g. offering the
//! score to the leaderboard on game over). Events carry no payload; all
//! authoritative numbers live in [`GameState`](super::GameState).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player left the ground under their own power
    Jump,
    /// A coin flipped to collected
    CoinCollected,
    /// Player took contact damage (also fired on a lost-life fall)
    Damage,
    /// An enemy died under the player's boots
    EnemyStomped,
    /// A spring launched the player
    SpringBounce,
    LevelComplete,
    GameOver,
    /// UI command acknowledged (start/pause/restart/advance)
    ButtonClick,
}
