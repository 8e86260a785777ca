//! Glue shared by every Rust crate that lives inside the Taiman engine.
//!
//! All crates log through `tracing` with a target constant from this module,
//! so the host side can enable or silence subsystems individually without
//! knowing anything about the crate layout.

use time::macros::format_description;
use tracing_subscriber::fmt::time::UtcTime;

/// Log targets for the tracing backend.
///
/// These are associated constants rather than an enum so call sites can pass
/// them straight to the `target:` field of a tracing macro.
#[non_exhaustive]
pub struct Log;

#[allow(non_upper_case_globals)]
impl Log {
    /// General engine-side chatter that has no better home.
    pub const General: &'static str = "taiman";

    /// The replay playback engine.
    pub const Playback: &'static str = "taiman::playback";

    /// Background-music and sound-effect control.
    pub const Audio: &'static str = "taiman::audio";
}

/// Installs the global tracing subscriber.
///
/// The host calls this exactly once at boot, before any playback crate is
/// touched. Calling it again is harmless; the second install attempt is
/// ignored.
pub fn init_tracing() {
    let timer = UtcTime::new(format_description!(
        "[hour]:[minute]:[second].[subsecond digits:3]"
    ));

    let _ = tracing_subscriber::fmt()
        .with_timer(timer)
        .with_max_level(tracing::Level::INFO)
        .try_init();
}
