use crate::audio::TonePlayer;
use crate::calculator::{compute_tone_holes, ToneHoleDescriptor};
use crate::error::{DesignError, Result};
use crate::export::MeshExporter;
use crate::geometry::{build_bore_mesh, MeshOptions};
use crate::params::InstrumentParameters;
use crate::persistence::{load_design, save_design, FileStore};

/// The live design: current parameters plus the tone holes derived from
/// them. Any change to the parameters replaces the hole list wholesale.
#[derive(Debug, Clone)]
pub struct Designer {
    params: InstrumentParameters,
    holes: Vec<ToneHoleDescriptor>,
    revision: u64,
    pub mesh_options: MeshOptions,
}

impl Designer {
    pub fn new(params: InstrumentParameters) -> Self {
        Designer {
            holes: compute_tone_holes(&params),
            params,
            revision: 0,
            mesh_options: MeshOptions::default(),
        }
    }

    pub fn params(&self) -> &InstrumentParameters {
        &self.params
    }

    pub fn holes(&self) -> &[ToneHoleDescriptor] {
        &self.holes
    }

    /// Bumped on every recompute.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn hole(&self, number: u32) -> Result<&ToneHoleDescriptor> {
        self.holes
            .iter()
            .find(|h| h.number == number)
            .ok_or(DesignError::UnknownHole(number))
    }

    pub fn replace(&mut self, params: InstrumentParameters) {
        self.params = params;
        self.recompute();
    }

    pub fn set_length(&mut self, length: f64) {
        self.params.length = length;
        self.recompute();
    }

    pub fn set_base_diameter(&mut self, diameter: f64) {
        self.params.base_diameter = diameter;
        self.recompute();
    }

    pub fn set_tip_diameter(&mut self, diameter: f64) {
        self.params.tip_diameter = diameter;
        self.recompute();
    }

    pub fn set_tone_hole_count(&mut self, count: u32) {
        self.params.tone_hole_count = count;
        self.recompute();
    }

    pub fn set_wall_thickness(&mut self, thickness: f64) {
        self.params.wall_thickness = thickness;
        self.recompute();
    }

    fn recompute(&mut self) {
        self.holes = compute_tone_holes(&self.params);
        self.revision += 1;
    }

    pub fn save<S: FileStore + ?Sized>(&self, store: &mut S, key: &str) -> Result<()> {
        save_design(store, key, &self.params)
    }

    /// Replaces the design with the stored one. On error the current design
    /// is left untouched.
    pub fn load<S: FileStore + ?Sized>(&mut self, store: &S, key: &str) -> Result<()> {
        match load_design(store, key) {
            Ok(params) => {
                self.replace(params);
                Ok(())
            }
            Err(err) => {
                log::warn!("failed to load design '{}': {}", key, err);
                Err(err)
            }
        }
    }

    pub fn play_hole<P: TonePlayer + ?Sized>(&self, number: u32, player: &mut P) -> Result<()> {
        let hole = self.hole(number)?;
        player.play(hole.estimated_frequency_hz)
    }

    pub fn export_mesh<E: MeshExporter + ?Sized>(&self, exporter: &E) -> Result<Vec<u8>> {
        let mesh = build_bore_mesh(&self.params, &self.holes, &self.mesh_options);
        exporter.export(&mesh)
    }
}

impl Default for Designer {
    fn default() -> Self {
        Designer::new(InstrumentParameters::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[derive(Default)]
    struct RecordingPlayer {
        played: Vec<f64>,
    }

    impl TonePlayer for RecordingPlayer {
        fn play(&mut self, frequency_hz: f64) -> Result<()> {
            self.played.push(frequency_hz);
            Ok(())
        }
    }

    #[test]
    fn every_setter_recomputes() {
        let mut designer = Designer::default();
        assert_eq!(designer.holes().len(), 6);

        designer.set_tone_hole_count(10);
        assert_eq!(designer.holes().len(), 10);

        let before = designer.holes()[0].clone();
        designer.set_length(800.0);
        assert!(designer.holes()[0].position > before.position);

        designer.set_tip_diameter(8.0);
        designer.set_base_diameter(30.0);
        designer.set_wall_thickness(3.0);
        assert_eq!(designer.revision(), 5);
        assert_eq!(designer.holes(), compute_tone_holes(designer.params()).as_slice());
    }

    #[test]
    fn failed_load_leaves_state_unchanged() {
        let mut store = MemoryStore::new();
        store.write("broken.json", "{ \"length\": ").unwrap();

        let mut designer = Designer::default();
        designer.set_length(750.0);
        let params = *designer.params();
        let holes = designer.holes().to_vec();
        let revision = designer.revision();

        assert!(designer.load(&store, "broken.json").is_err());
        assert!(designer.load(&store, "missing.json").is_err());

        assert_eq!(*designer.params(), params);
        assert_eq!(designer.holes(), holes.as_slice());
        assert_eq!(designer.revision(), revision);
    }

    #[test]
    fn positional_array_document_is_rejected() {
        let mut store = MemoryStore::new();
        store.write("array.json", "[300, 15, 3, 1, 4]").unwrap();

        let mut designer = Designer::default();
        let params = *designer.params();
        let holes = designer.holes().to_vec();

        assert!(matches!(
            designer.load(&store, "array.json"),
            Err(DesignError::Parse(_))
        ));
        assert_eq!(*designer.params(), params);
        assert_eq!(designer.holes(), holes.as_slice());
        assert_eq!(designer.revision(), 0);
    }

    #[test]
    fn load_replaces_design() {
        let mut store = MemoryStore::new();
        let saved = Designer::new(InstrumentParameters::new(300.0, 15.0, 3.0, 4, 1.0));
        saved.save(&mut store, "small.json").unwrap();

        let mut designer = Designer::default();
        designer.load(&store, "small.json").unwrap();
        assert_eq!(designer.params(), saved.params());
        assert_eq!(designer.holes(), saved.holes());
    }

    #[test]
    fn play_hole_sends_its_frequency() {
        let designer = Designer::default();
        let mut player = RecordingPlayer::default();
        designer.play_hole(2, &mut player).unwrap();
        assert_eq!(player.played, vec![designer.holes()[1].estimated_frequency_hz]);

        assert!(matches!(
            designer.play_hole(7, &mut player),
            Err(DesignError::UnknownHole(7))
        ));
        assert_eq!(player.played.len(), 1);
    }
}
