use fretboard_core::music::{
    semitone_ratio, string_label, BASS_TUNING, OPEN_STRING_FREQUENCIES, STRING_COUNT,
};
use fretboard_core::{
    fret_position_fraction, fret_positions, frequency, generate_id, note_from_fret, PitchClass,
};
use std::collections::HashSet;

const EPSILON: f64 = 1e-9;

#[test]
fn open_strings_follow_gdae_tuning() {
    assert_eq!(note_from_fret(0, 0), PitchClass::G);
    assert_eq!(note_from_fret(1, 0), PitchClass::D);
    assert_eq!(note_from_fret(2, 0), PitchClass::A);
    assert_eq!(note_from_fret(3, 0), PitchClass::E);
    assert_eq!(note_from_fret(2, 2), PitchClass::B);
    assert_eq!(note_from_fret(3, 1), PitchClass::F);
    assert_eq!(note_from_fret(0, 1), PitchClass::GSharp);

    for (string, open) in BASS_TUNING.iter().enumerate() {
        assert_eq!(string_label(string), *open);
    }
}

#[test]
fn pitch_class_repeats_every_octave() {
    for string in 0..STRING_COUNT {
        for fret in 0..=24 {
            assert_eq!(
                note_from_fret(string, fret + 12),
                note_from_fret(string, fret),
                "string {string} fret {fret}"
            );
        }
    }
}

#[test]
fn very_high_frets_still_wrap() {
    assert_eq!(note_from_fret(3, 120), PitchClass::E);
    assert_eq!(note_from_fret(2, 1_000_003), note_from_fret(2, 1_000_003 % 12));
}

#[test]
fn frequency_doubles_every_octave() {
    for string in 0..STRING_COUNT {
        for fret in 0..=24 {
            let low = frequency(string, fret);
            let high = frequency(string, fret + 12);
            assert!(
                (high - 2.0 * low).abs() < EPSILON * high,
                "string {string} fret {fret}: {high} vs {low}"
            );
        }
    }
}

#[test]
fn open_frequencies_match_base_table() {
    for (string, base) in OPEN_STRING_FREQUENCIES.iter().enumerate() {
        assert_eq!(frequency(string, 0), *base);
    }
    assert!((frequency(2, 12) - 110.0).abs() < EPSILON);
    assert!(frequency(3, 5) > frequency(3, 4));
}

#[test]
fn fret_fraction_is_zero_at_nut_for_any_scale_length() {
    for scale_length in [1.0, 34.0, 864.0] {
        assert_eq!(fret_position_fraction(0, scale_length), 0.0);
    }
}

#[test]
fn fret_fraction_strictly_increases_and_stays_below_scale_length() {
    let scale_length = 864.0;
    let mut previous = 0.0;
    for fret in 1..=36 {
        let current = fret_position_fraction(fret, scale_length);
        assert!(current > previous, "fret {fret} did not move toward bridge");
        assert!(current < scale_length);
        previous = current;
    }
}

#[test]
fn fret_fraction_stays_in_range_for_huge_fret_numbers() {
    for scale_length in [1.0, 864.0] {
        for fret in [700, 1u32 << 31, u32::MAX] {
            let position = fret_position_fraction(fret, scale_length);
            assert!(position.is_finite(), "fret {fret} is not finite");
            assert!(position >= 0.0);
            assert!(position < scale_length, "fret {fret} reached the bridge");
        }
    }
}

#[test]
fn twelfth_fret_sits_at_half_scale() {
    assert!((fret_position_fraction(12, 1.0) - 0.5).abs() < EPSILON);
    assert!((fret_position_fraction(24, 1.0) - 0.75).abs() < EPSILON);
    assert!((semitone_ratio().powi(12) - 2.0).abs() < EPSILON);
}

#[test]
fn fret_positions_include_nut_and_each_fret() {
    let positions = fret_positions(12);
    assert_eq!(positions.len(), 13);
    assert_eq!(positions[0], 0.0);
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(positions.iter().all(|value| (0.0..1.0).contains(value)));

    assert_eq!(fret_positions(0), vec![0.0]);
}

#[test]
fn generated_ids_are_unique_within_a_burst() {
    let ids: HashSet<String> = (0..1_000).map(|_| generate_id()).collect();
    assert_eq!(ids.len(), 1_000);
    assert!(ids
        .iter()
        .all(|id| id.chars().all(|c| c.is_ascii_alphanumeric())));
}
