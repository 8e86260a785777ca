use crate::input::InputFrame;
use crate::types::SimulationSnapshot;

/// The deterministic fight engine the replayed inputs feed into.
///
/// The playback core never looks inside the engine; it replays the recorded
/// inputs tick by tick and reads back the snapshot for the end-of-round
/// checks and the renderer. Feeding the same log through the same engine
/// build reproduces the original match exactly.
pub trait FightSimulation {
    /// Resets per-round simulation state. Called once at the top of every
    /// round, before any tick of that round runs.
    fn init_round(&mut self, round: u32);

    /// Runs one simulation tick with the given inputs and reports the
    /// resulting match state.
    fn process_tick(&mut self, tick: u32, frame: &InputFrame) -> SimulationSnapshot;
}
