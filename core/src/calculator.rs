use serde::{Deserialize, Serialize};

use crate::params::InstrumentParameters;
use crate::tuning::{deviation_percent, nearest_note, round2, A4_HZ};

pub const SPEED_OF_SOUND: f64 = 343_000.0; // mm/s
const HOLE_SIZE_FACTOR: f64 = 0.3;
const MIN_HOLE_SIZE: f64 = 1.0; // mm

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ToneHoleDescriptor {
    /// 1-based, counted from the reference end.
    pub number: u32,
    pub position: f64,                  // mm from the reference end
    pub bore_diameter_at_position: f64, // mm
    pub estimated_frequency_hz: f64,
    pub nearest_note_name: String,
    pub tuning_accuracy_percent: f64,
    pub hole_size_mm: f64,
}

/// Places `tone_hole_count` evenly spaced holes along the bore and estimates
/// the pitch each one sounds.
///
/// Each hole's position doubles as the sounding length of a quarter-wave
/// resonator, and the diameter taper is measured from the tip. Both are
/// deliberate simplifications; this is not an acoustic simulation.
///
/// A non-positive or non-finite length yields no holes rather than NaN rows.
/// `wall_thickness` does not influence the result.
pub fn compute_tone_holes(params: &InstrumentParameters) -> Vec<ToneHoleDescriptor> {
    let count = params.tone_hole_count;
    if count == 0 {
        return Vec::new();
    }
    if !params.length.is_finite() || params.length <= 0.0 {
        log::warn!(
            "degenerate bore length {}, no tone holes computed",
            params.length
        );
        return Vec::new();
    }

    let spacing = params.length / (count as f64 + 1.0);
    let taper = params.base_diameter - params.tip_diameter;

    let holes: Vec<ToneHoleDescriptor> = (1..=count)
        .map(|number| {
            let position = spacing * number as f64;
            let bore = params.tip_diameter + taper * position / params.length;

            let wavelength = 4.0 * position;
            let frequency = SPEED_OF_SOUND / wavelength;

            let note = nearest_note(frequency);
            let accuracy = round2(deviation_percent(frequency, note.frequency));
            let hole_size =
                round2((frequency / A4_HZ) * bore * HOLE_SIZE_FACTOR).max(MIN_HOLE_SIZE);

            ToneHoleDescriptor {
                number,
                position,
                bore_diameter_at_position: bore,
                estimated_frequency_hz: frequency,
                nearest_note_name: note.name,
                tuning_accuracy_percent: accuracy,
                hole_size_mm: hole_size,
            }
        })
        .collect();

    log::debug!(
        "computed {} tone holes for a {} mm bore",
        holes.len(),
        params.length
    );
    holes
}
