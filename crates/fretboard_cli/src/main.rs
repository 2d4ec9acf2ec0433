//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `fretboard_core` linkage without the UI runtime.
//! - Print tuning and fret geometry deterministically.

use fretboard_core::music::{string_label, STRING_COUNT};
use fretboard_core::{normalized_fret_positions, CoreConfig};

fn main() {
    let config = CoreConfig::from_env();
    println!("fretboard_core ping={}", fretboard_core::ping());
    println!("fretboard_core version={}", fretboard_core::core_version());

    let tuning: Vec<&str> = (0..STRING_COUNT)
        .map(|string| string_label(string).as_str())
        .collect();
    println!("tuning={}", tuning.join(","));

    for (fret, position) in normalized_fret_positions(config.total_frets)
        .iter()
        .enumerate()
    {
        println!("fret={fret} position={position:.4}");
    }
}
