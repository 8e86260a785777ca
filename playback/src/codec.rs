//! Sequential reader for the binary match log.
//!
//! The log is big-endian and strictly ordered: a two-player header, then one
//! fixed-size record per player per frame, player 0 first. Every record must
//! be consumed in full or the cursor falls out of step with the recorder and
//! every later frame decodes as garbage.

use std::io::{self, Read};

use byteorder::{BigEndian, ReadBytesExt};
use taiman_integrations::Log;

use crate::errors::PlaybackError;
use crate::types::{HeaderInfo, PlayerHeader, PlayerInput};

/// Bit weights of the packed control byte, highest first. The recorder packs
/// `Up, Right, Left, Down, C, B, A` in this order; the decoder has to match
/// it bit for bit.
const BUTTON_WEIGHTS: [u8; 7] = [64, 32, 16, 8, 4, 2, 1];

/// Outcome of one frame-pair read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameRead {
    /// Both players' inputs for the next tick, in player order.
    Pair([PlayerInput; 2]),
    /// The log ended before a full pair could be read. Recordings cut off
    /// mid-match are common, so this is an expected outcome, not an error,
    /// and no partial input is ever surfaced.
    EndOfStream,
}

/// Decodes the log stream record by record. The session owns exactly one of
/// these and nothing else touches the stream.
#[derive(Debug)]
pub struct RecordReader<R> {
    reader: R,
}

impl<R: Read> RecordReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Reads the two-player header.
    ///
    /// Each player slot starts with a mode marker. A negative marker selects
    /// limited-HP mode and is followed by the player's max HP and character
    /// index; a non-negative marker is itself the character index. The sign
    /// of the marker is the only discriminator between the two shapes.
    pub fn read_header(&mut self, roster: &[String]) -> Result<HeaderInfo, PlaybackError> {
        let mut limited_hp = false;
        let p0 = self.read_player_header(roster, 0, &mut limited_hp)?;
        let p1 = self.read_player_header(roster, 1, &mut limited_hp)?;

        Ok(HeaderInfo {
            limited_hp,
            players: [p0, p1],
        })
    }

    fn read_player_header(
        &mut self,
        roster: &[String],
        slot: usize,
        limited_hp: &mut bool,
    ) -> Result<PlayerHeader, PlaybackError> {
        let marker = self
            .reader
            .read_i32::<BigEndian>()
            .map_err(|e| PlaybackError::HeaderFormat(format!("mode marker for player {slot}: {e}")))?;

        if marker < 0 {
            let max_hp = self
                .reader
                .read_i32::<BigEndian>()
                .map_err(|e| PlaybackError::HeaderFormat(format!("max hp for player {slot}: {e}")))?;
            let index = self
                .reader
                .read_i32::<BigEndian>()
                .map_err(|e| PlaybackError::HeaderFormat(format!("character index for player {slot}: {e}")))?;

            *limited_hp = true;
            Ok(PlayerHeader {
                character: resolve_character(roster, index, slot)?,
                max_hp: Some(max_hp),
            })
        } else {
            *limited_hp = false;
            Ok(PlayerHeader {
                character: resolve_character(roster, marker, slot)?,
                max_hp: None,
            })
        }
    }

    /// Reads both players' records for the next tick.
    ///
    /// Hitting the end of the file anywhere inside the pair, even between the
    /// two players, reports `EndOfStream` and drops whatever was decoded so
    /// far. Any other I/O failure is fatal.
    pub fn read_frame_pair(&mut self) -> Result<FrameRead, PlaybackError> {
        let mut pair = [PlayerInput::default(); 2];

        for input in pair.iter_mut() {
            match self.read_player_record() {
                Ok(decoded) => *input = decoded,
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    tracing::info!(target: Log::Playback, "replay log ended mid-frame");
                    return Ok(FrameRead::EndOfStream);
                }
                Err(e) => {
                    tracing::error!(target: Log::Playback, error = %e, "replay log read failed");
                    return Err(PlaybackError::Io(e));
                }
            }
        }

        Ok(FrameRead::Pair(pair))
    }

    fn read_player_record(&mut self) -> io::Result<PlayerInput> {
        // Legacy per-record fields, present for format compatibility with
        // older tooling. Consumed only to keep the cursor aligned.
        self.reader.read_u8()?; // facing flag
        self.reader.read_i8()?; // remaining action frames
        self.reader.read_i8()?; // action id
        self.reader.read_i32::<BigEndian>()?; // hp
        self.reader.read_i32::<BigEndian>()?; // energy
        self.reader.read_i32::<BigEndian>()?; // x
        self.reader.read_i32::<BigEndian>()?; // y

        let control = self.reader.read_u8()?;
        Ok(decode_control_byte(control))
    }
}

fn resolve_character(roster: &[String], index: i32, slot: usize) -> Result<String, PlaybackError> {
    usize::try_from(index)
        .ok()
        .and_then(|i| roster.get(i))
        .cloned()
        .ok_or_else(|| {
            PlaybackError::HeaderFormat(format!(
                "character index {index} for player {slot} is outside the roster ({} entries)",
                roster.len()
            ))
        })
}

/// Unpacks the control byte by successive division with the recorder's bit
/// weights. The high bit is never written by the recorder and is dropped
/// before decoding.
pub fn decode_control_byte(byte: u8) -> PlayerInput {
    let mut rest = byte & 0x7F;
    let mut flags = [false; 7];

    for (flag, weight) in flags.iter_mut().zip(BUTTON_WEIGHTS) {
        *flag = rest / weight == 1;
        rest %= weight;
    }

    let [up, right, left, down, c, b, a] = flags;
    PlayerInput {
        up,
        right,
        left,
        down,
        c,
        b,
        a,
    }
}

/// Packs seven button flags back into the wire byte: the sum of the weights
/// of the set flags. Mostly useful for tests and log-producing tooling.
pub fn encode_control_byte(input: PlayerInput) -> u8 {
    let flags = [
        input.up,
        input.right,
        input.left,
        input.down,
        input.c,
        input.b,
        input.a,
    ];

    flags
        .iter()
        .zip(BUTTON_WEIGHTS)
        .map(|(&on, weight)| if on { weight } else { 0 })
        .sum()
}
