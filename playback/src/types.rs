/// Button state for one player on one tick, reconstructed from the log.
///
/// Field order mirrors the packed control byte: `Up, Right, Left, Down, C,
/// B, A` from the highest bit weight down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerInput {
    pub up: bool,
    pub right: bool,
    pub left: bool,
    pub down: bool,
    pub c: bool,
    pub b: bool,
    pub a: bool,
}

/// Per-player header fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerHeader {
    /// Character name resolved against the configured roster.
    pub character: String,
    /// Present only in limited-HP sessions.
    pub max_hp: Option<i32>,
}

/// File-level header. The limited-HP flag is fixed for the whole session
/// once the header has been read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub limited_hp: bool,
    pub players: [PlayerHeader; 2],
}

/// Post-tick character status reported by the fight simulation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerStatus {
    pub hp: i32,
    pub energy: i32,
    pub x: i32,
    pub y: i32,
}

/// Everything the simulation reports after one tick. The session keeps the
/// latest one for the renderer and for the end-of-round checks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimulationSnapshot {
    pub tick: u32,
    pub round: u32,
    pub players: [PlayerStatus; 2],
    pub remaining_time_ms: u32,
}

/// Render-side state published after each active update. The playback core
/// only ever hands out a fresh default; the renderer fills it in.
#[derive(Debug, Clone, Default)]
pub struct ScreenSnapshot {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}
