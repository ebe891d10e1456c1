//! Fixed-timestep scheduler and host capability seams.
//!
//! The simulation is wall-clock free; [`GameRunner`] owns the accumulator
//! that turns frame timestamps into whole ticks, fans tick events out to
//! the host's audio sink, and hands the state to the renderer once per
//! frame. Hosts implement [`Renderer`] and [`InputSource`] (and
//! [`AudioSink`](crate::audio::AudioSink)) for their platform.

use glam::Vec2;

use crate::audio::AudioSink;
use crate::camera::Camera;
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::sim::{GameEvent, GameState, TickInput, tick};

/// Drawing capability. Called exactly once per frame, after the simulation
/// has caught up to wall time. Receives read-only state; the runner never
/// waits on the result.
pub trait Renderer {
    fn draw(&mut self, state: &GameState, camera: &Camera);
}

/// Input capability. Polled once per frame; the runner holds the snapshot
/// across substeps and clears one-shot flags itself.
pub trait InputSource {
    fn poll(&mut self) -> TickInput;
}

/// Owns the loop plumbing around a [`GameState`].
pub struct GameRunner<R, A, I> {
    pub state: GameState,
    pub camera: Camera,
    renderer: R,
    audio: A,
    input_source: I,
    input: TickInput,
    accumulator: f32,
    last_time: f64,
}

impl<R: Renderer, A: AudioSink, I: InputSource> GameRunner<R, A, I> {
    /// The camera viewport matches the tuned world size, so a level no
    /// wider than the world never scrolls.
    pub fn new(state: GameState, renderer: R, audio: A, input_source: I) -> Self {
        let viewport = Vec2::new(state.tuning.world_width, state.tuning.world_height);
        Self {
            state,
            camera: Camera::new(viewport),
            renderer,
            audio,
            input_source,
            input: TickInput::default(),
            accumulator: 0.0,
            last_time: 0.0,
        }
    }

    /// Advance by one frame. `now` is a monotonic timestamp in seconds.
    ///
    /// Runs as many fixed ticks as the elapsed time covers, capped at
    /// [`MAX_SUBSTEPS`] so a stalled host cannot spiral, then draws once.
    /// Returns every event the ticks produced, in order.
    pub fn frame(&mut self, now: f64) -> Vec<GameEvent> {
        let dt = if self.last_time > 0.0 {
            ((now - self.last_time) as f32).min(MAX_FRAME_DT)
        } else {
            SIM_DT
        };
        self.last_time = now;
        self.accumulator += dt;

        self.input = self.input_source.poll();

        let mut events = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = self.input;
            events.extend(tick(&mut self.state, &input));
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.pause = false;
        }

        for &event in &events {
            self.audio.play(event);
        }

        self.camera.follow(
            self.state.player.aabb().center(),
            Vec2::new(self.state.level_width, self.state.level_height),
        );
        self.renderer.draw(&self.state, &self.camera);

        events
    }

    /// Start a run from the title screen.
    pub fn begin(&mut self) {
        if self.command(GameState::begin) {
            self.reset_clock();
        }
    }

    /// Quit to the title screen, mid-run or after a run ends.
    pub fn restart(&mut self) {
        if self.command(GameState::restart) {
            self.reset_clock();
        }
    }

    /// Continue to the next level from the level-complete screen.
    pub fn advance_level(&mut self) {
        self.command(GameState::advance_level);
    }

    /// UI commands click only when the state machine accepts them.
    fn command(&mut self, apply: fn(&mut GameState)) -> bool {
        let before = self.state.phase;
        apply(&mut self.state);
        let accepted = self.state.phase != before;
        if accepted {
            self.audio.play(GameEvent::ButtonClick);
        }
        accepted
    }

    fn reset_clock(&mut self) {
        self.accumulator = 0.0;
        self.input = TickInput::default();
    }

    /// Mute control and other sink state live on the host's type.
    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }
}
