//! The per-tick simulation entry point.
//!
//! One call to [`tick`] advances the world by exactly one step and returns
//! the events that fired, in order. Same state plus same inputs gives the
//! same result; wall-clock pacing lives in [`crate::runner`].

use serde::{Deserialize, Serialize};

use super::enemy;
use super::events::GameEvent;
use super::player::{self, EnemyContact};
use super::state::{GameState, Phase};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Move left
    pub left: bool,
    /// Move right
    pub right: bool,
    /// Jump, held across ticks to shape the arc
    pub jump: bool,
    /// Pause toggle (send for one tick, not held)
    pub pause: bool,
}

/// Advance the game state by one step.
///
/// Pause is honored first so it works while frozen; everything else runs
/// only while Playing.
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.pause {
        state.toggle_pause();
    }
    if state.phase != Phase::Playing {
        return events;
    }

    state.time_ticks += 1;

    let contact = player::update(
        &mut state.player,
        input,
        &state.platforms,
        &state.tuning,
        &mut events,
    );

    // Springs fire while the player is descending; a landing that zeroed the
    // fall this tick still counts as descent.
    if contact.on_ground || state.player.vel.y > 0.0 {
        let player_box = state.player.aabb();
        if state.springs.iter().any(|s| s.aabb().overlaps(&player_box)) {
            player::launch_from_spring(&mut state.player, &state.tuning);
            events.push(GameEvent::SpringBounce);
        }
    }

    let player_box = state.player.aabb();
    for coin in &mut state.coins {
        if !coin.collected && coin.aabb().overlaps(&player_box) {
            coin.collected = true;
            state.score += coin.value;
            state.coins_collected += 1;
            events.push(GameEvent::CoinCollected);
        }
    }

    for e in &mut state.enemies {
        enemy::update(e, &state.platforms, &state.tuning, state.death_plane);
    }

    for i in 0..state.enemies.len() {
        if !state.enemies[i].alive {
            continue;
        }
        if !state.enemies[i].aabb().overlaps(&state.player.aabb()) {
            continue;
        }
        match player::resolve_enemy_contact(&mut state.player, &state.enemies[i], &state.tuning) {
            EnemyContact::Stomped => {
                state.enemies[i].alive = false;
                state.score += state.tuning.stomp_value;
                events.push(GameEvent::EnemyStomped);
            }
            EnemyContact::Damaged { fatal } => {
                events.push(GameEvent::Damage);
                if fatal {
                    if state.lose_life() {
                        // Fresh life back at the spawn point.
                        break;
                    }
                    state.set_phase(Phase::GameOver);
                    events.push(GameEvent::GameOver);
                    return events;
                }
            }
            EnemyContact::Ignored => {}
        }
    }

    // The flag wins ties with the death plane so a goal at the bottom of a
    // drop still counts.
    if state.goal.aabb().overlaps(&state.player.aabb()) {
        state.set_phase(Phase::LevelComplete);
        events.push(GameEvent::LevelComplete);
        return events;
    }

    if state.player.pos.y > state.death_plane {
        events.push(GameEvent::Damage);
        if !state.lose_life() {
            state.set_phase(Phase::GameOver);
            events.push(GameEvent::GameOver);
        }
    }

    events
}
