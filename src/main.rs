//! Meadow Run entry point
//!
//! Headless demo: drives the simulation with a canned input tape at a
//! synthetic 60 Hz clock, printing progress once a second and the local
//! leaderboard at the end. Pass `--quiet` to mute the sfx log lines.
//! Real hosts supply their own [`Renderer`], [`InputSource`] and
//! [`AudioSink`](meadow_run::audio::AudioSink) implementations and a wall
//! clock.

use std::time::{SystemTime, UNIX_EPOCH};

use meadow_run::audio::{AudioSink, LogAudio};
use meadow_run::camera::Camera;
use meadow_run::consts::SIM_DT;
use meadow_run::level::demo_levels;
use meadow_run::runner::{GameRunner, InputSource, Renderer};
use meadow_run::sim::{GameState, Phase, TickInput};
use meadow_run::{HighScores, Tuning};

/// Prints a status line once a second instead of drawing.
struct ConsoleRenderer {
    frames: u64,
}

impl Renderer for ConsoleRenderer {
    fn draw(&mut self, state: &GameState, camera: &Camera) {
        self.frames += 1;
        if self.frames % 60 != 0 {
            return;
        }
        println!(
            "[{:>3}s] {:?} level {} score {} lives {} player ({:.0},{:.0}) scroll {:.0}",
            state.time_ticks / 60,
            state.phase,
            state.level_index + 1,
            state.score,
            state.lives,
            state.player.pos.x,
            state.player.pos.y,
            camera.pos.x,
        );
    }
}

/// Canned pilot: hold right, hop on a fixed rhythm.
struct DemoPilot {
    frame: u64,
}

impl InputSource for DemoPilot {
    fn poll(&mut self) -> TickInput {
        self.frame += 1;
        TickInput {
            left: false,
            right: true,
            jump: self.frame % 90 < 20,
            pause: false,
        }
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn main() {
    env_logger::init();
    log::info!("Meadow Run (headless demo) starting...");

    let state = match GameState::new(demo_levels(), Tuning::default()) {
        Ok(state) => state,
        Err(err) => {
            eprintln!("level data rejected: {}", err);
            std::process::exit(1);
        }
    };

    let mut runner = GameRunner::new(
        state,
        ConsoleRenderer { frames: 0 },
        LogAudio::default(),
        DemoPilot { frame: 0 },
    );
    if std::env::args().any(|arg| arg == "--quiet") {
        runner.audio_mut().set_muted(true);
    }
    runner.begin();

    // Synthetic clock; four minutes is plenty for the canned pilot to win
    // or run out of lives.
    let mut now = 0.0;
    for _ in 0..(4 * 60 * 60) {
        now += SIM_DT as f64;
        runner.frame(now);

        match runner.state.phase {
            Phase::LevelComplete => {
                println!(
                    "level {} complete, score {}",
                    runner.state.level_index + 1,
                    runner.state.score
                );
                runner.advance_level();
            }
            Phase::GameOver => {
                println!("game over on level {}", runner.state.level_index + 1);
                break;
            }
            _ => {}
        }
        if runner.state.session_complete {
            println!("all levels clear!");
            break;
        }
    }

    let score = runner.state.score;
    let level_reached = (runner.state.level_index + 1) as u32;
    let coins = runner.state.coins_collected;
    println!(
        "final score {} (level {}, {} coins, {} ticks)",
        score, level_reached, coins, runner.state.time_ticks
    );

    let mut scores = HighScores::load();
    if let Some(rank) = scores.add_score(score, level_reached, coins, unix_now()) {
        println!("new high score at rank {}!", rank);
        scores.save();
    }
    if !scores.is_empty() {
        println!("-- high scores --");
        for (i, entry) in scores.entries.iter().enumerate() {
            println!(
                "{:>2}. {:>6}  level {}  {} coins",
                i + 1,
                entry.score,
                entry.level,
                entry.coins
            );
        }
    }
}
