pub mod audio;
pub mod calculator;
pub mod error;
pub mod export;
pub mod geometry;
pub mod params;
pub mod persistence;
pub mod session;
pub mod tuning;

pub use calculator::{compute_tone_holes, ToneHoleDescriptor};
pub use error::{DesignError, Result};
pub use params::InstrumentParameters;
pub use session::Designer;

use audio::{ToneSettings, WavTonePlayer};
use export::{StlExporter, StlFormat};
use persistence::{decode_design, encode_design};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct BoreEngine {
    inner: Designer,
}

#[wasm_bindgen]
impl BoreEngine {
    #[wasm_bindgen(constructor)]
    pub fn new(
        length: f64,
        base_diameter: f64,
        tip_diameter: f64,
        tone_holes: u32,
        wall_thickness: f64,
    ) -> BoreEngine {
        console_error_panic_hook::set_once();
        BoreEngine {
            inner: Designer::new(InstrumentParameters::new(
                length,
                base_diameter,
                tip_diameter,
                tone_holes,
                wall_thickness,
            )),
        }
    }

    pub fn set_length(&mut self, length: f64) {
        self.inner.set_length(length);
    }

    pub fn set_base_diameter(&mut self, diameter: f64) {
        self.inner.set_base_diameter(diameter);
    }

    pub fn set_tip_diameter(&mut self, diameter: f64) {
        self.inner.set_tip_diameter(diameter);
    }

    pub fn set_tone_holes(&mut self, count: u32) {
        self.inner.set_tone_hole_count(count);
    }

    pub fn set_wall_thickness(&mut self, thickness: f64) {
        self.inner.set_wall_thickness(thickness);
    }

    pub fn hole_count(&self) -> usize {
        self.inner.holes().len()
    }

    pub fn revision(&self) -> u64 {
        self.inner.revision()
    }

    /// Estimated frequency of every hole, in hole order.
    pub fn frequencies(&self) -> Vec<f64> {
        self.inner
            .holes()
            .iter()
            .map(|h| h.estimated_frequency_hz)
            .collect()
    }

    pub fn note_names(&self) -> Vec<String> {
        self.inner
            .holes()
            .iter()
            .map(|h| h.nearest_note_name.clone())
            .collect()
    }

    /// The full descriptor rows as an array of camelCase objects.
    pub fn holes(&self) -> std::result::Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(self.inner.holes())?)
    }

    pub fn save_json(&self) -> std::result::Result<String, JsError> {
        Ok(encode_design(self.inner.params())?)
    }

    /// Replaces the design from a saved document. A rejected document
    /// leaves the current design in place.
    pub fn load_json(&mut self, json: &str) -> std::result::Result<(), JsError> {
        let params = decode_design(json).map_err(|err| {
            log::warn!("rejected design document: {}", err);
            err
        })?;
        self.inner.replace(params);
        Ok(())
    }

    pub fn export_stl(&self, binary: bool) -> std::result::Result<Vec<u8>, JsError> {
        let format = if binary {
            StlFormat::Binary
        } else {
            StlFormat::Ascii
        };
        Ok(self.inner.export_mesh(&StlExporter::new(format))?)
    }

    /// WAV bytes of the tone for hole `number` (1-based).
    pub fn render_tone_wav(&self, number: u32) -> std::result::Result<Vec<u8>, JsError> {
        let mut player = WavTonePlayer::new(ToneSettings::default());
        self.inner.play_hole(number, &mut player)?;
        Ok(player.take_clip().unwrap_or_default())
    }
}
