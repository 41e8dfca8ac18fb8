//! Equal-temperament note mapping, A4 = 440 Hz.

use serde::{Deserialize, Serialize};

pub const A4_HZ: f64 = 440.0;

pub const PITCH_CLASSES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Index offset that puts A4 (zero semitones from the reference) at
/// pitch class 9 of octave 4.
const NOTE_INDEX_OFFSET: i32 = 57;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NearestNote {
    pub name: String,
    pub pitch_class: usize,
    pub octave: i32,
    /// Exact equal-tempered frequency of the note.
    pub frequency: f64,
}

/// Round half up. `f64::round` rounds half away from zero, which disagrees
/// for negative halves.
pub(crate) fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

pub(crate) fn round2(x: f64) -> f64 {
    round_half_up(x * 100.0) / 100.0
}

/// Maps a frequency to the closest equal-tempered note.
///
/// `freq` must be positive and finite.
pub fn nearest_note(freq: f64) -> NearestNote {
    let semitones = 12.0 * (freq / A4_HZ).log2();
    let note_index = round_half_up(semitones) as i32 + NOTE_INDEX_OFFSET;
    let pitch_class = note_index.rem_euclid(12) as usize;
    let octave = note_index.div_euclid(12);

    NearestNote {
        name: format!("{}{}", PITCH_CLASSES[pitch_class], octave),
        pitch_class,
        octave,
        frequency: note_frequency(pitch_class, octave),
    }
}

pub fn note_frequency(pitch_class: usize, octave: i32) -> f64 {
    let semitones = pitch_class as i32 + (octave - 4) * 12 - 9;
    A4_HZ * 2.0_f64.powf(semitones as f64 / 12.0)
}

/// Relative deviation from `target` in percent, unsigned.
pub fn deviation_percent(freq: f64, target: f64) -> f64 {
    100.0 * (freq - target).abs() / target
}

/// Signed deviation in cents (positive = sharp).
pub fn cents_deviation(freq: f64, target: f64) -> f64 {
    1200.0 * (freq / target).log2()
}
