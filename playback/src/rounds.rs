//! Round-structured lifecycle for a playback session.
//!
//! A match is a sequence of rounds, each opened by a fixed break interval.
//! The lifecycle owns the counters; the session owns the side effects
//! (decoding, simulation, rendering) and asks the lifecycle where it stands.

/// Phase of the playback session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    /// Per-round reset; consumes one outer update.
    RoundStart,
    /// Pre-round pause showing the waiting indicator.
    BreakInterval,
    /// Frames are decoded and simulated.
    ActivePlay,
    /// Terminal. No further decoding happens in this phase.
    SessionEnd,
}

/// Counters and limits for the round structure. Single-threaded; every
/// transition runs on the caller's update.
#[derive(Debug, Clone)]
pub struct RoundLifecycle {
    phase: RoundPhase,
    /// Current round, 1-based.
    round: u32,
    /// Frame counter within the current round.
    frame: u32,
    /// Outer updates spent in the current break interval.
    elapsed_break: u32,
    /// Set once the current round has ended.
    finished: bool,
    round_max: u32,
    break_frames: u32,
    round_frames: u32,
}

impl RoundLifecycle {
    pub fn new(round_max: u32, break_frames: u32, round_frames: u32) -> Self {
        Self {
            phase: RoundPhase::RoundStart,
            round: 1,
            frame: 0,
            elapsed_break: 0,
            finished: false,
            round_max,
            break_frames,
            round_frames,
        }
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn finished(&self) -> bool {
        self.finished
    }

    /// Per-round reset, run once at the top of every round.
    pub fn start_round(&mut self) {
        self.frame = 0;
        self.elapsed_break = 0;
        self.finished = false;
        self.phase = RoundPhase::BreakInterval;
    }

    /// Advances the break counter by one outer update. Playback speed has no
    /// effect here; the break always lasts the configured number of updates.
    pub fn advance_break(&mut self) {
        self.elapsed_break += 1;
        if self.elapsed_break >= self.break_frames {
            self.phase = RoundPhase::ActivePlay;
        }
    }

    pub fn advance_frame(&mut self) {
        self.frame += 1;
    }

    /// Whether the current frame is the round's last before the clock runs
    /// out.
    pub fn timeout_reached(&self) -> bool {
        self.frame == self.round_frames.saturating_sub(1)
    }

    /// Marks the round finished and moves on. The round-end bookkeeping
    /// resolves within the same outer update: either the next round is lined
    /// up or the session is over.
    pub fn end_round(&mut self) {
        self.finished = true;
        self.round += 1;
        self.phase = if self.round <= self.round_max {
            RoundPhase::RoundStart
        } else {
            RoundPhase::SessionEnd
        };
    }

    /// Drops straight to the terminal phase, bypassing round-end
    /// bookkeeping. Used when the log ends mid-round or the user bails out.
    pub fn end_session(&mut self) {
        self.finished = true;
        self.phase = RoundPhase::SessionEnd;
    }

    /// True once the round counter has passed the configured maximum.
    pub fn past_round_max(&self) -> bool {
        self.round > self.round_max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opens_with_a_reset_then_a_full_break() {
        let mut lifecycle = RoundLifecycle::new(3, 2, 3600);
        assert_eq!(lifecycle.phase(), RoundPhase::RoundStart);

        lifecycle.start_round();
        assert_eq!(lifecycle.phase(), RoundPhase::BreakInterval);
        assert_eq!(lifecycle.frame(), 0);

        lifecycle.advance_break();
        assert_eq!(lifecycle.phase(), RoundPhase::BreakInterval);
        lifecycle.advance_break();
        assert_eq!(lifecycle.phase(), RoundPhase::ActivePlay);
    }

    #[test]
    fn frame_counter_resets_on_every_round_start() {
        let mut lifecycle = RoundLifecycle::new(3, 1, 3600);
        lifecycle.start_round();
        for _ in 0..10 {
            lifecycle.advance_frame();
        }
        lifecycle.end_round();

        assert_eq!(lifecycle.phase(), RoundPhase::RoundStart);
        lifecycle.start_round();
        assert_eq!(lifecycle.frame(), 0);
        assert!(!lifecycle.finished());
    }

    #[test]
    fn round_counter_stays_within_the_maximum_until_session_end() {
        let mut lifecycle = RoundLifecycle::new(2, 1, 3600);

        lifecycle.start_round();
        lifecycle.end_round();
        assert_eq!(lifecycle.round(), 2);
        assert_eq!(lifecycle.phase(), RoundPhase::RoundStart);
        assert!(!lifecycle.past_round_max());

        lifecycle.start_round();
        lifecycle.end_round();
        assert_eq!(lifecycle.round(), 3);
        assert_eq!(lifecycle.phase(), RoundPhase::SessionEnd);
        assert!(lifecycle.past_round_max());
    }

    #[test]
    fn timeout_fires_on_the_last_frame_of_the_round() {
        let mut lifecycle = RoundLifecycle::new(1, 1, 100);
        lifecycle.start_round();

        for _ in 0..99 {
            assert!(!lifecycle.timeout_reached());
            lifecycle.advance_frame();
        }
        assert!(lifecycle.timeout_reached());
    }

    #[test]
    fn end_session_skips_round_end_bookkeeping() {
        let mut lifecycle = RoundLifecycle::new(3, 1, 3600);
        lifecycle.start_round();
        lifecycle.end_session();

        assert_eq!(lifecycle.phase(), RoundPhase::SessionEnd);
        assert_eq!(lifecycle.round(), 1);
        assert!(lifecycle.finished());
    }
}
