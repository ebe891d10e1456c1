//! Audio capability seam.
//!
//! The simulation only decides which sound fires (one per [`GameEvent`]);
//! making noise is the host's job. [`sound_name`] gives hosts a stable key
//! per event so asset manifests and mixers stay data-driven.

use crate::sim::GameEvent;

/// Host-side sound output. `play` is called once per event, in tick order.
pub trait AudioSink {
    fn play(&mut self, event: GameEvent);

    /// Hosts with a mixer can honor this; the default ignores it.
    fn set_muted(&mut self, _muted: bool) {}
}

/// Stable asset key for each event's sound effect.
pub fn sound_name(event: GameEvent) -> &'static str {
    match event {
        GameEvent::Jump => "jump",
        GameEvent::CoinCollected => "coin",
        GameEvent::Damage => "damage",
        GameEvent::EnemyStomped => "stomp",
        GameEvent::SpringBounce => "spring",
        GameEvent::LevelComplete => "level-complete",
        GameEvent::GameOver => "game-over",
        GameEvent::ButtonClick => "button-click",
    }
}

/// Discards everything. For tests and headless hosts.
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _event: GameEvent) {}
}

/// Logs each effect instead of playing it. Useful while a host's real
/// backend is not wired up yet.
#[derive(Debug, Default)]
pub struct LogAudio {
    muted: bool,
}

impl AudioSink for LogAudio {
    fn play(&mut self, event: GameEvent) {
        if !self.muted {
            log::debug!("sfx: {}", sound_name(event));
        }
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }
}
