//! Session state and the phase machine.
//!
//! [`GameState`] owns every entity the simulation mutates plus the session
//! counters (score, lives, level index). Hosts drive it through the command
//! methods here and the per-tick entry point in [`super::tick::tick`].

use serde::{Deserialize, Serialize};

use super::entity::{Coin, Enemy, Goal, Platform, Player, Spring};
use crate::config::Tuning;
use crate::level::{LevelData, LevelError, PointDef};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Title screen, no live session
    Start,
    /// Active gameplay
    Playing,
    /// Simulation frozen; only unpause is honored
    Paused,
    /// Run ended with no lives left
    GameOver,
    /// Goal reached, waiting for the host to advance
    LevelComplete,
}

/// Everything the simulation reads and writes.
///
/// Fields are public so renderers and tests can peek freely, but mutation
/// goes through [`super::tick::tick`] and the command methods so the phase
/// machine stays consistent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    pub levels: Vec<LevelData>,
    pub level_index: usize,
    pub phase: Phase,

    // Session counters
    pub score: u32,
    pub lives: u32,
    pub coins_collected: u32,
    /// Ticks simulated since the session began
    pub time_ticks: u64,
    /// Set when the last level is cleared
    pub session_complete: bool,

    // Live entities for the current level
    pub player: Player,
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    pub coins: Vec<Coin>,
    pub springs: Vec<Spring>,
    pub goal: Goal,

    // Cached per-level geometry
    pub spawn_point: PointDef,
    pub level_width: f32,
    pub level_height: f32,
    /// Falling past this y costs a life
    pub death_plane: f32,
}

impl GameState {
    /// Build a session over `levels`, pre-loading the first one.
    ///
    /// Every level is validated up front so gameplay never trips over a
    /// malformed definition mid-session.
    pub fn new(levels: Vec<LevelData>, tuning: Tuning) -> Result<Self, LevelError> {
        if levels.is_empty() {
            return Err(LevelError::NoLevels);
        }
        for level in &levels {
            level.validate()?;
        }

        let origin = PointDef { x: 0.0, y: 0.0 };
        let mut state = Self {
            player: Player::spawn(origin, &tuning),
            goal: Goal::new(origin, &tuning),
            lives: tuning.starting_lives,
            tuning,
            levels,
            level_index: 0,
            phase: Phase::Start,
            score: 0,
            coins_collected: 0,
            time_ticks: 0,
            session_complete: false,
            platforms: Vec::new(),
            enemies: Vec::new(),
            coins: Vec::new(),
            springs: Vec::new(),
            spawn_point: origin,
            level_width: 0.0,
            level_height: 0.0,
            death_plane: 0.0,
        };
        state.load_level(0);
        Ok(state)
    }

    /// Sole phase mutator. Illegal transitions are ignored (and logged) so a
    /// stale host command cannot corrupt the session.
    pub fn set_phase(&mut self, next: Phase) -> bool {
        let legal = matches!(
            (self.phase, next),
            (Phase::Start, Phase::Playing)
                | (Phase::Playing, Phase::Paused)
                | (Phase::Paused, Phase::Playing)
                | (Phase::Playing, Phase::GameOver)
                | (Phase::Playing, Phase::LevelComplete)
                | (Phase::Playing, Phase::Start)
                | (Phase::GameOver, Phase::Start)
                | (Phase::LevelComplete, Phase::Start)
                | (Phase::LevelComplete, Phase::Playing)
        );
        if legal {
            log::debug!("phase {:?} -> {:?}", self.phase, next);
            self.phase = next;
        } else {
            log::debug!("ignoring phase change {:?} -> {:?}", self.phase, next);
        }
        legal
    }

    /// Start a session from the title screen. A no-op in any other phase.
    pub fn begin(&mut self) {
        if self.phase != Phase::Start {
            return;
        }
        self.score = 0;
        self.coins_collected = 0;
        self.time_ticks = 0;
        self.session_complete = false;
        self.lives = self.tuning.starting_lives;
        self.level_index = 0;
        self.load_level(0);
        self.set_phase(Phase::Playing);
    }

    /// Pause or resume. A no-op outside Playing/Paused.
    pub fn toggle_pause(&mut self) {
        match self.phase {
            Phase::Playing => {
                self.set_phase(Phase::Paused);
            }
            Phase::Paused => {
                self.set_phase(Phase::Playing);
            }
            _ => {}
        }
    }

    /// Quit to the title screen, mid-run or from an end screen. Session
    /// counters survive until the next `begin` so the host can offer the
    /// score to the leaderboard.
    pub fn restart(&mut self) {
        if matches!(
            self.phase,
            Phase::Playing | Phase::GameOver | Phase::LevelComplete
        ) {
            self.set_phase(Phase::Start);
        }
    }

    /// Move on after a cleared level. Past the last level the session is
    /// complete and the state returns to the title screen.
    pub fn advance_level(&mut self) {
        if self.phase != Phase::LevelComplete {
            return;
        }
        let next = self.level_index + 1;
        if next >= self.levels.len() {
            self.session_complete = true;
            self.set_phase(Phase::Start);
            return;
        }
        self.level_index = next;
        self.load_level(next);
        self.set_phase(Phase::Playing);
    }

    /// Take one life. Respawns the player when lives remain; returns false
    /// when the run is out of lives and the caller should end the session.
    pub fn lose_life(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            return false;
        }
        self.player.respawn(self.spawn_point, &self.tuning);
        true
    }

    /// Build the live entity set for `levels[index]`.
    fn load_level(&mut self, index: usize) {
        let level = self.levels[index].clone();
        // Presence of spawn and flag is guaranteed by validation in `new`.
        let spawn = level.spawn.unwrap_or(PointDef { x: 0.0, y: 0.0 });
        let flag = level.flag.unwrap_or(PointDef { x: 0.0, y: 0.0 });

        self.platforms = level.platforms.iter().map(Platform::from_def).collect();
        self.enemies = level
            .enemies
            .iter()
            .map(|def| Enemy::from_def(def, &self.tuning))
            .collect();
        self.coins = level
            .coins
            .iter()
            .map(|&at| Coin::new(at, &self.tuning))
            .collect();
        self.springs = level
            .springs
            .iter()
            .map(|&at| Spring::new(at, &self.tuning))
            .collect();
        self.goal = Goal::new(flag, &self.tuning);

        self.spawn_point = spawn;
        self.level_width = level.width();
        self.level_height = level.height();
        self.death_plane = self.tuning.death_plane(self.level_height);
        self.player = Player::spawn(spawn, &self.tuning);

        log::info!(
            "loaded level {} ({:?}): {} platforms, {} enemies, {} coins",
            index,
            level.name,
            self.platforms.len(),
            self.enemies.len(),
            self.coins.len()
        );
    }
}
