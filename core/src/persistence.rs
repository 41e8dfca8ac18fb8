//! Design documents and the stores they are kept in.
//!
//! A design document is a flat JSON object holding the five instrument
//! parameters:
//!
//! ```json
//! { "length": 600.0, "baseDiameter": 20.0, "tipDiameter": 5.0,
//!   "wallThickness": 2.0, "toneHoles": 6 }
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use serde_json::{Map, Value};

use crate::error::{DesignError, Result};
use crate::params::InstrumentParameters;

pub trait FileStore {
    fn read(&self, key: &str) -> Result<String>;
    fn write(&mut self, key: &str, contents: &str) -> Result<()>;
}

pub fn encode_design(params: &InstrumentParameters) -> Result<String> {
    Ok(serde_json::to_string_pretty(params)?)
}

/// Only a JSON object is a design; serde would otherwise map an array onto
/// the fields by position.
pub fn decode_design(json: &str) -> Result<InstrumentParameters> {
    let object: Map<String, Value> = serde_json::from_str(json)?;
    Ok(serde_json::from_value(Value::Object(object))?)
}

pub fn save_design<S: FileStore + ?Sized>(
    store: &mut S,
    key: &str,
    params: &InstrumentParameters,
) -> Result<()> {
    let json = encode_design(params)?;
    store.write(key, &json)
}

pub fn load_design<S: FileStore + ?Sized>(store: &S, key: &str) -> Result<InstrumentParameters> {
    let json = store.read(key)?;
    decode_design(&json)
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    files: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl FileStore for MemoryStore {
    fn read(&self, key: &str) -> Result<String> {
        self.files
            .get(key)
            .cloned()
            .ok_or_else(|| DesignError::MissingKey(key.to_string()))
    }

    fn write(&mut self, key: &str, contents: &str) -> Result<()> {
        self.files.insert(key.to_string(), contents.to_string());
        Ok(())
    }
}

/// Keys are paths relative to `root`.
#[derive(Debug, Clone)]
pub struct DiskStore {
    root: PathBuf,
}

impl DiskStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DiskStore { root: root.into() }
    }
}

impl FileStore for DiskStore {
    fn read(&self, key: &str) -> Result<String> {
        Ok(fs::read_to_string(self.root.join(key))?)
    }

    fn write(&mut self, key: &str, contents: &str) -> Result<()> {
        Ok(fs::write(self.root.join(key), contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_has_exactly_the_five_keys() {
        let json = encode_design(&InstrumentParameters::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let object = value.as_object().unwrap();

        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            ["baseDiameter", "length", "tipDiameter", "toneHoles", "wallThickness"]
        );
        assert!(object["toneHoles"].is_u64());
    }

    #[test]
    fn save_then_load_is_exact() {
        let params = InstrumentParameters::new(612.345, 23.1, 4.75, 11, 1.35);
        let mut store = MemoryStore::new();
        save_design(&mut store, "design.json", &params).unwrap();
        assert_eq!(load_design(&store, "design.json").unwrap(), params);
    }

    #[test]
    fn decode_accepts_integral_floats_for_dimensions() {
        let json = r#"{"length":600,"baseDiameter":20,"tipDiameter":5,"wallThickness":2,"toneHoles":6}"#;
        assert_eq!(decode_design(json).unwrap(), InstrumentParameters::default());
    }

    #[test]
    fn decode_rejects_bad_documents() {
        let cases = [
            "not json",
            "{}",
            r#"{"length":600,"baseDiameter":20,"tipDiameter":5,"wallThickness":2}"#,
            r#"{"length":600,"baseDiameter":20,"tipDiameter":5,"wallThickness":2,"toneHoles":6.5}"#,
            r#"{"length":600,"baseDiameter":20,"tipDiameter":5,"wallThickness":2,"toneHoles":-1}"#,
            r#"{"length":"long","baseDiameter":20,"tipDiameter":5,"wallThickness":2,"toneHoles":6}"#,
            r#"{"length":600,"baseDiameter":20,"tipDiameter":5,"wallThickness":2,"toneHoles":6,"extra":1}"#,
            "[600, 20, 5, 2, 6]",
            "[600, 20, 5, 2, 6, 1]",
            "\"design\"",
            "null",
        ];
        for json in cases {
            assert!(
                matches!(decode_design(json), Err(DesignError::Parse(_))),
                "accepted {:?}",
                json
            );
        }
    }

    #[test]
    fn missing_key_is_reported() {
        let store = MemoryStore::new();
        assert!(matches!(
            load_design(&store, "nope.json"),
            Err(DesignError::MissingKey(key)) if key == "nope.json"
        ));
    }

    #[test]
    fn disk_store_round_trip() {
        let dir = std::env::temp_dir().join(format!("bore_core_store_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        let mut store = DiskStore::new(&dir);
        let params = InstrumentParameters::new(450.0, 18.0, 6.0, 8, 3.0);
        save_design(&mut store, "flute.json", &params).unwrap();
        assert_eq!(load_design(&store, "flute.json").unwrap(), params);
        assert!(matches!(load_design(&store, "absent.json"), Err(DesignError::Io(_))));

        fs::remove_dir_all(&dir).unwrap();
    }
}
