//! Bass fretboard music math.
//!
//! # Responsibility
//! - Map `(string, fret)` positions to pitch classes and frequencies.
//! - Compute equal-tempered fret placement along a scale length.
//! - Generate opaque chord identifiers.
//!
//! # Invariants
//! - Every function here is pure except `generate_id`.
//! - String indices outside `0..STRING_COUNT` are caller contract violations
//!   and panic on table lookup.
//! - Frets are unbounded; pitch classes wrap every 12 frets.

pub mod layout;

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Number of strings on the instrument.
pub const STRING_COUNT: usize = 4;

/// Frets drawn by the full-size fretboard view.
pub const DEFAULT_TOTAL_FRETS: u32 = 12;

/// Open-string pitch classes, top string (index 0) to bottom string.
pub const BASS_TUNING: [PitchClass; STRING_COUNT] =
    [PitchClass::G, PitchClass::D, PitchClass::A, PitchClass::E];

/// Approximate open-string pitches in Hz: G2, D2, A1, E1.
pub const OPEN_STRING_FREQUENCIES: [f64; STRING_COUNT] = [98.0, 73.4, 55.0, 41.2];

/// Chromatic pitch-class table starting at C.
pub const CHROMATIC: [PitchClass; 12] = [
    PitchClass::C,
    PitchClass::CSharp,
    PitchClass::D,
    PitchClass::DSharp,
    PitchClass::E,
    PitchClass::F,
    PitchClass::FSharp,
    PitchClass::G,
    PitchClass::GSharp,
    PitchClass::A,
    PitchClass::ASharp,
    PitchClass::B,
];

const SEMITONES_PER_OCTAVE: u32 = 12;

/// One of the 12 octave-independent note names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PitchClass {
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C#")]
    CSharp,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "D#")]
    DSharp,
    #[serde(rename = "E")]
    E,
    #[serde(rename = "F")]
    F,
    #[serde(rename = "F#")]
    FSharp,
    #[serde(rename = "G")]
    G,
    #[serde(rename = "G#")]
    GSharp,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A#")]
    ASharp,
    #[serde(rename = "B")]
    B,
}

impl PitchClass {
    /// Display label, sharps spelled with `#`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::C => "C",
            Self::CSharp => "C#",
            Self::D => "D",
            Self::DSharp => "D#",
            Self::E => "E",
            Self::F => "F",
            Self::FSharp => "F#",
            Self::G => "G",
            Self::GSharp => "G#",
            Self::A => "A",
            Self::ASharp => "A#",
            Self::B => "B",
        }
    }

    /// Position in [`CHROMATIC`] (C = 0).
    pub fn chromatic_index(self) -> usize {
        match self {
            Self::C => 0,
            Self::CSharp => 1,
            Self::D => 2,
            Self::DSharp => 3,
            Self::E => 4,
            Self::F => 5,
            Self::FSharp => 6,
            Self::G => 7,
            Self::GSharp => 8,
            Self::A => 9,
            Self::ASharp => 10,
            Self::B => 11,
        }
    }

    /// Parses a label such as `"A#"`. Matching is exact.
    pub fn from_label(label: &str) -> Option<Self> {
        CHROMATIC
            .iter()
            .copied()
            .find(|pitch| pitch.as_str() == label)
    }
}

impl Display for PitchClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the open-string pitch class printed beside `string`.
pub fn string_label(string: usize) -> PitchClass {
    BASS_TUNING[string]
}

/// Returns the pitch class sounded at `fret` on `string`.
///
/// # Panics
/// - When `string >= STRING_COUNT`.
pub fn note_from_fret(string: usize, fret: u32) -> PitchClass {
    let open_index = BASS_TUNING[string].chromatic_index();
    let offset = (fret % SEMITONES_PER_OCTAVE) as usize;
    CHROMATIC[(open_index + offset) % CHROMATIC.len()]
}

/// Returns the equal-tempered frequency in Hz at `fret` on `string`.
///
/// # Panics
/// - When `string >= STRING_COUNT`.
pub fn frequency(string: usize, fret: u32) -> f64 {
    OPEN_STRING_FREQUENCIES[string] * 2f64.powf(f64::from(fret) / 12.0)
}

/// Per-semitone length ratio, the 12th root of 2.
pub fn semitone_ratio() -> f64 {
    2f64.powf(1.0 / 12.0)
}

/// Distance from the nut to fret wire `fret_number` along `scale_length`.
///
/// Returns `0.0` for the nut. Values increase with the fret number and stay
/// below a positive `scale_length` for every `u32` fret.
pub fn fret_position_fraction(fret_number: u32, scale_length: f64) -> f64 {
    if fret_number == 0 {
        return 0.0;
    }
    let position = scale_length * (1.0 - 2f64.powf(-f64::from(fret_number) / 12.0));
    if position < scale_length || !(scale_length.is_finite() && scale_length > 0.0) {
        return position;
    }
    // Past f64 resolution the gap to the bridge rounds away; pin to the
    // largest value below the scale length.
    f64::from_bits(scale_length.to_bits() - 1)
}

/// Returns `total_frets + 1` nut-relative positions on a unit scale length.
///
/// Index 0 is the nut.
pub fn fret_positions(total_frets: u32) -> Vec<f64> {
    (0..=total_frets)
        .map(|fret| fret_position_fraction(fret, 1.0))
        .collect()
}

/// Generates an opaque chord identifier.
///
/// Format: base-36 millisecond timestamp followed by 11 hex characters of a
/// random v4 UUID.
pub fn generate_id() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default();
    let random = Uuid::new_v4().simple().to_string();
    format!("{}{}", to_base36(millis), &random[..11])
}

/// Current wall-clock time in Unix epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or_default()
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut buf = Vec::new();
    while value > 0 {
        buf.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    buf.reverse();
    String::from_utf8(buf).unwrap_or_default()
}
