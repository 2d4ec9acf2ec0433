//! Fretboard geometry projection for renderers.
//!
//! # Responsibility
//! - Rescale equal-tempered fret positions so the last drawn fret spans the
//!   full board width.
//! - Convert positions to pixel offsets for fret wires, note buttons and
//!   inlay markers.
//!
//! # Invariants
//! - Normalized positions start at `0.0` and end at exactly `1.0`.
//! - Frets past `total_frets` are not projected.

use super::fret_positions;

/// Horizontal space reserved left of the nut for open-string buttons.
pub const NUT_OFFSET_PX: f64 = 60.0;
/// Center of the open-string button.
pub const OPEN_NOTE_X_PX: f64 = 30.0;
/// Board width the note offset below was tuned for.
pub const REFERENCE_WIDTH_PX: f64 = 800.0;
/// Distance between a fret wire and the center of the note button behind it.
pub const NOTE_OFFSET_PX: f64 = 28.0;
/// Largest board the UI draws; hosts clamp requested sizes to this.
pub const MAX_TOTAL_FRETS: u32 = 24;

/// Position marker drawn between two fret wires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inlay {
    Single,
    Double,
}

/// Returns `fret_positions(total_frets)` rescaled so the last entry is 1.0.
pub fn normalized_fret_positions(total_frets: u32) -> Vec<f64> {
    let raw = fret_positions(total_frets);
    let last = raw.last().copied().unwrap_or_default();
    if last <= 0.0 {
        return vec![0.0];
    }
    raw.into_iter().map(|position| position / last).collect()
}

/// Returns the inlay marker drawn behind `fret`, if any.
pub fn inlay_for_fret(fret: u32) -> Option<Inlay> {
    if fret == 0 {
        return None;
    }
    match fret % 12 {
        0 => Some(Inlay::Double),
        3 | 5 | 7 | 9 => Some(Inlay::Single),
        _ => None,
    }
}

/// Pixel projection of one fretboard view.
#[derive(Debug, Clone, PartialEq)]
pub struct FretboardLayout {
    total_frets: u32,
    width_px: f64,
    positions: Vec<f64>,
}

impl FretboardLayout {
    /// Builds a layout drawing frets `0..=total_frets` across `width_px`.
    pub fn new(total_frets: u32, width_px: f64) -> Self {
        Self {
            total_frets,
            width_px,
            positions: normalized_fret_positions(total_frets),
        }
    }

    pub fn total_frets(&self) -> u32 {
        self.total_frets
    }

    pub fn width_px(&self) -> f64 {
        self.width_px
    }

    /// Normalized positions, index 0 = nut.
    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    /// Whether `fret` is drawn by this view.
    pub fn is_visible(&self, fret: u32) -> bool {
        fret <= self.total_frets
    }

    /// X offset of the wire for `fret`; fret 0 is the nut.
    pub fn fret_wire_x(&self, fret: u32) -> Option<f64> {
        let position = self.position(fret)?;
        Some(NUT_OFFSET_PX + position * self.width_px)
    }

    /// X center of the clickable note button for `fret`.
    pub fn note_x(&self, fret: u32) -> Option<f64> {
        if fret == 0 {
            return Some(OPEN_NOTE_X_PX);
        }
        let position = self.position(fret)?;
        let scaled_offset = NOTE_OFFSET_PX * self.width_px / REFERENCE_WIDTH_PX;
        Some(NUT_OFFSET_PX + position * self.width_px - scaled_offset)
    }

    /// X center of the space between wires `fret - 1` and `fret`.
    pub fn inlay_center_x(&self, fret: u32) -> Option<f64> {
        if fret == 0 {
            return None;
        }
        let current = self.position(fret)?;
        let previous = self.position(fret - 1)?;
        let center = previous + (current - previous) / 2.0;
        Some(NUT_OFFSET_PX + center * self.width_px)
    }

    /// Inlays visible in this view with their x centers.
    pub fn inlays(&self) -> Vec<(u32, Inlay, f64)> {
        (1..=self.total_frets)
            .filter_map(|fret| {
                let inlay = inlay_for_fret(fret)?;
                let x = self.inlay_center_x(fret)?;
                Some((fret, inlay, x))
            })
            .collect()
    }

    fn position(&self, fret: u32) -> Option<f64> {
        self.positions.get(fret as usize).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::{inlay_for_fret, normalized_fret_positions, Inlay};

    #[test]
    fn zero_frets_normalizes_to_nut_only() {
        assert_eq!(normalized_fret_positions(0), vec![0.0]);
    }

    #[test]
    fn inlays_repeat_each_octave() {
        assert_eq!(inlay_for_fret(0), None);
        assert_eq!(inlay_for_fret(4), None);
        assert_eq!(inlay_for_fret(5), Some(Inlay::Single));
        assert_eq!(inlay_for_fret(12), Some(Inlay::Double));
        assert_eq!(inlay_for_fret(15), Some(Inlay::Single));
        assert_eq!(inlay_for_fret(24), Some(Inlay::Double));
    }
}
