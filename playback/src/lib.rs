//! Replay playback engine for recorded Taiman matches.
//!
//! A recorded match is a binary log of every control input both players
//! pressed, frame by frame. This crate decodes that log and drives it back
//! through the same deterministic fight engine used for live play, round by
//! round, at a user-selected speed. Player decisions are never re-simulated;
//! only the recorded inputs are.
//!
//! The session is step-driven and single-threaded: the host calls
//! [`ReplaySession::update`] once per outer frame and reads the published
//! snapshots back out. Everything the session needs from the host (fight
//! engine, renderer, audio, live input, scene transitions) is injected as a
//! trait object through [`ReplaySessionBuilder`].

pub mod codec;
pub mod config;
pub mod errors;
pub mod frontend;
pub mod input;
pub mod rounds;
pub mod sim;
pub mod speed;
pub mod types;

use std::fmt;
use std::io::Read;

use taiman_integrations::Log;

use crate::codec::{FrameRead, RecordReader};
use crate::config::{ConfigSource, PlaybackConfig};
use crate::errors::PlaybackError;
use crate::frontend::{AudioBackend, Headless, LiveInput, Renderer, SceneController};
use crate::input::InputFrame;
use crate::rounds::{RoundLifecycle, RoundPhase};
use crate::sim::FightSimulation;
use crate::speed::PlaySpeed;
use crate::types::{HeaderInfo, ScreenSnapshot, SimulationSnapshot};

/// The central orchestrator: owns the open log stream, the round and frame
/// counters, and the collaborator handles, and advances the whole session
/// one outer update at a time.
pub struct ReplaySession<R> {
    /// `None` once the stream has been closed; closing twice is a no-op.
    reader: Option<RecordReader<R>>,
    header: HeaderInfo,
    lifecycle: RoundLifecycle,
    speed: PlaySpeed,
    sim: Box<dyn FightSimulation>,
    renderer: Box<dyn Renderer>,
    audio: Box<dyn AudioBackend>,
    live_input: Box<dyn LiveInput>,
    scene: Box<dyn SceneController>,
    frame_data: SimulationSnapshot,
    screen_data: ScreenSnapshot,
    /// One-way latch; once set the session only hands out state.
    terminated: bool,
}

impl<R> fmt::Debug for ReplaySession<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReplaySession")
            .field("header", &self.header)
            .field("lifecycle", &self.lifecycle)
            .field("speed", &self.speed)
            .field("frame_data", &self.frame_data)
            .field("screen_data", &self.screen_data)
            .field("terminated", &self.terminated)
            .finish_non_exhaustive()
    }
}

impl<R: Read> ReplaySession<R> {
    /// Builder for injecting the host collaborators.
    pub fn builder() -> ReplaySessionBuilder {
        ReplaySessionBuilder::default()
    }

    /// Advances the session by one outer update.
    ///
    /// The current phase decides the work: one reset step, one break step,
    /// or up to one speed-multiplier's worth of simulation ticks. The
    /// external cancel signal is checked once per update and wins over
    /// everything else.
    pub fn update(&mut self) -> Result<(), PlaybackError> {
        if self.terminated {
            return Ok(());
        }

        if self.lifecycle.past_round_max() {
            self.finish();
        } else {
            match self.lifecycle.phase() {
                RoundPhase::RoundStart => {
                    self.sim.init_round(self.lifecycle.round());
                    self.lifecycle.start_round();
                }
                RoundPhase::BreakInterval => {
                    self.renderer.draw_waiting();
                    self.lifecycle.advance_break();
                }
                RoundPhase::ActivePlay => self.run_active()?,
                RoundPhase::SessionEnd => self.finish(),
            }
        }

        if self.live_input.exit_requested() {
            self.finish();
        }

        Ok(())
    }

    /// Runs up to one multiplier's worth of simulation ticks, then publishes
    /// the frame for rendering.
    fn run_active(&mut self) -> Result<(), PlaybackError> {
        self.speed.apply(self.live_input.directional_event());

        for _ in 0..self.speed.multiplier() {
            if self.lifecycle.finished() {
                break;
            }

            let Some(reader) = self.reader.as_mut() else {
                break;
            };
            let pair = match reader.read_frame_pair()? {
                FrameRead::Pair(pair) => pair,
                FrameRead::EndOfStream => {
                    // The recording stopped mid-match. Not an error: wrap up
                    // exactly as if the match had concluded.
                    self.finish();
                    return Ok(());
                }
            };

            let frame = InputFrame::from_pair(pair);
            self.frame_data = self.sim.process_tick(self.lifecycle.frame(), &frame);

            if self.knockout() || self.lifecycle.timeout_reached() {
                self.lifecycle.end_round();
                self.lifecycle.advance_frame();
                break;
            }
            self.lifecycle.advance_frame();
        }

        self.renderer.draw_match(&self.frame_data, self.lifecycle.round());
        self.renderer.draw_play_speed(self.speed.multiplier());
        self.screen_data = ScreenSnapshot::default();
        Ok(())
    }

    /// Knockouts only end rounds in limited-HP sessions; time-limited
    /// matches run to the clock regardless of HP.
    fn knockout(&self) -> bool {
        self.header.limited_hp && self.frame_data.players.iter().any(|p| p.hp <= 0)
    }

    /// Terminal hand-off. Reachable from several paths (round max, end of
    /// stream, cancel); the latch keeps the side effects to one occurrence.
    fn finish(&mut self) {
        if self.terminated {
            return;
        }
        self.terminated = true;
        self.lifecycle.end_session();
        self.close_stream();
        self.audio.stop_bgm();
        self.scene.request_transition();
        tracing::info!(target: Log::Playback, round = self.lifecycle.round(), "replay session ended");
    }

    fn close_stream(&mut self) {
        if self.reader.take().is_some() {
            tracing::debug!(target: Log::Playback, "replay log closed");
        }
    }

    /// Latest simulation output, deep-copied so callers can mutate freely.
    pub fn latest_frame_data(&self) -> SimulationSnapshot {
        self.frame_data.clone()
    }

    /// Latest screen state, deep-copied.
    pub fn latest_screen_data(&self) -> ScreenSnapshot {
        self.screen_data.clone()
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    pub fn header(&self) -> &HeaderInfo {
        &self.header
    }

    pub fn current_round(&self) -> u32 {
        self.lifecycle.round()
    }

    pub fn current_frame(&self) -> u32 {
        self.lifecycle.frame()
    }

    pub fn current_multiplier(&self) -> u32 {
        self.speed.multiplier()
    }
}

impl<R> Drop for ReplaySession<R> {
    fn drop(&mut self) {
        // The stream may already be gone if the log ran out; take() makes
        // the close idempotent.
        self.reader.take();
    }
}

/// Builder for [`ReplaySession`]. The fight simulation is required; every
/// frontend collaborator defaults to [`Headless`].
#[derive(Default)]
pub struct ReplaySessionBuilder {
    config: Option<PlaybackConfig>,
    config_source: Option<Box<dyn ConfigSource>>,
    sim: Option<Box<dyn FightSimulation>>,
    renderer: Option<Box<dyn Renderer>>,
    audio: Option<Box<dyn AudioBackend>>,
    live_input: Option<Box<dyn LiveInput>>,
    scene: Option<Box<dyn SceneController>>,
}

impl ReplaySessionBuilder {
    pub fn with_config(mut self, config: PlaybackConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Resolves the config from a source at start time. Ignored when an
    /// explicit config was also given.
    pub fn with_config_source(mut self, source: impl ConfigSource + 'static) -> Self {
        self.config_source = Some(Box::new(source));
        self
    }

    pub fn with_simulation(mut self, sim: impl FightSimulation + 'static) -> Self {
        self.sim = Some(Box::new(sim));
        self
    }

    pub fn with_renderer(mut self, renderer: impl Renderer + 'static) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    pub fn with_audio(mut self, audio: impl AudioBackend + 'static) -> Self {
        self.audio = Some(Box::new(audio));
        self
    }

    pub fn with_live_input(mut self, live_input: impl LiveInput + 'static) -> Self {
        self.live_input = Some(Box::new(live_input));
        self
    }

    pub fn with_scene_controller(mut self, scene: impl SceneController + 'static) -> Self {
        self.scene = Some(Box::new(scene));
        self
    }

    /// Opens the session over an already-open log stream: resolves the
    /// config, reads the header, and starts the background music. A header
    /// that cannot be read or that references an unknown character aborts
    /// construction.
    pub fn start<R: Read>(self, stream: R) -> Result<ReplaySession<R>, PlaybackError> {
        let config = match (self.config, self.config_source) {
            (Some(config), _) => config,
            (None, Some(source)) => source.read_current()?,
            (None, None) => PlaybackConfig::default(),
        };

        let sim = self
            .sim
            .ok_or(PlaybackError::MissingCollaborator("fight simulation"))?;

        let mut reader = RecordReader::new(stream);
        let header = reader.read_header(&config.roster)?;

        tracing::info!(
            target: Log::Playback,
            p1 = %header.players[0].character,
            p2 = %header.players[1].character,
            limited_hp = header.limited_hp,
            "replay session started"
        );

        let mut audio = self.audio.unwrap_or_else(|| Box::new(Headless));
        audio.play_bgm();

        Ok(ReplaySession {
            reader: Some(reader),
            header,
            lifecycle: RoundLifecycle::new(config.round_max, config.break_frames, config.round_frames),
            speed: PlaySpeed::new(config.speeds),
            sim,
            renderer: self.renderer.unwrap_or_else(|| Box::new(Headless)),
            audio,
            live_input: self.live_input.unwrap_or_else(|| Box::new(Headless)),
            scene: self.scene.unwrap_or_else(|| Box::new(Headless)),
            frame_data: SimulationSnapshot::default(),
            screen_data: ScreenSnapshot::default(),
            terminated: false,
        })
    }
}
