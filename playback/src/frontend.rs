//! Trait boundaries for the host-engine collaborators.
//!
//! The host engine historically reached its rendering, audio, and input
//! subsystems through process-wide singletons. Here each one is handed to
//! the session at construction, so a host or a test can swap any of them
//! out while keeping single-instance semantics where the host wants them.

use crate::types::SimulationSnapshot;

/// Directional event sampled from the live input device once per outer
/// update. Drives playback speed only; the replayed match input comes from
/// the log, never from here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Up,
    Down,
    #[default]
    Neutral,
}

/// Draw surface for the playback scene.
pub trait Renderer {
    /// Shown during the pre-round break interval.
    fn draw_waiting(&mut self);

    /// Match overlay: character state plus the round clock.
    fn draw_match(&mut self, snapshot: &SimulationSnapshot, round: u32);

    /// Current speed readout.
    fn draw_play_speed(&mut self, multiplier: u32);
}

/// Background-music control. Stopping must be safe to call more than once.
pub trait AudioBackend {
    fn play_bgm(&mut self);
    fn stop_bgm(&mut self);
}

/// Live keyboard/controller state, polled once per outer update.
pub trait LiveInput {
    fn directional_event(&mut self) -> Direction;
    fn exit_requested(&mut self) -> bool;
}

/// Scene-transition hook. The session calls this exactly once, when it hands
/// control back to the host.
pub trait SceneController {
    fn request_transition(&mut self);
}

/// No-op collaborator set for headless playback (batch analysis, tests).
#[derive(Debug, Default, Clone, Copy)]
pub struct Headless;

impl Renderer for Headless {
    fn draw_waiting(&mut self) {}
    fn draw_match(&mut self, _snapshot: &SimulationSnapshot, _round: u32) {}
    fn draw_play_speed(&mut self, _multiplier: u32) {}
}

impl AudioBackend for Headless {
    fn play_bgm(&mut self) {}
    fn stop_bgm(&mut self) {}
}

impl LiveInput for Headless {
    fn directional_event(&mut self) -> Direction {
        Direction::Neutral
    }

    fn exit_requested(&mut self) -> bool {
        false
    }
}

impl SceneController for Headless {
    fn request_transition(&mut self) {}
}
