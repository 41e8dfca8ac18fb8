use serde::{Deserialize, Serialize};

use crate::error::{DesignError, Result};

/// Closed interval offered by a UI slider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterRange {
    pub min: f64,
    pub max: f64,
}

impl ParameterRange {
    pub const fn new(min: f64, max: f64) -> Self {
        ParameterRange { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    fn check(&self, field: &'static str, value: f64) -> Result<()> {
        if self.contains(value) {
            Ok(())
        } else {
            Err(DesignError::OutOfRange {
                field,
                value,
                min: self.min,
                max: self.max,
            })
        }
    }
}

pub const LENGTH_RANGE: ParameterRange = ParameterRange::new(200.0, 1000.0);
pub const BASE_DIAMETER_RANGE: ParameterRange = ParameterRange::new(10.0, 50.0);
pub const TIP_DIAMETER_RANGE: ParameterRange = ParameterRange::new(1.0, 20.0);
pub const TONE_HOLE_RANGE: ParameterRange = ParameterRange::new(1.0, 30.0);
pub const WALL_THICKNESS_RANGE: ParameterRange = ParameterRange::new(0.5, 5.0);

/// Dimensions of a conical bore. All lengths are millimetres.
///
/// The serialized form is the saved design document, so field names follow
/// the document keys rather than Rust naming.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct InstrumentParameters {
    pub length: f64,
    pub base_diameter: f64,
    pub tip_diameter: f64,
    pub wall_thickness: f64,
    #[serde(rename = "toneHoles")]
    pub tone_hole_count: u32,
}

impl InstrumentParameters {
    pub fn new(
        length: f64,
        base_diameter: f64,
        tip_diameter: f64,
        tone_hole_count: u32,
        wall_thickness: f64,
    ) -> Self {
        InstrumentParameters {
            length,
            base_diameter,
            tip_diameter,
            wall_thickness,
            tone_hole_count,
        }
    }

    /// Checks every field against the UI slider bounds.
    ///
    /// The calculator never calls this; it is for callers that accept
    /// parameters from somewhere other than the sliders.
    pub fn validate(&self) -> Result<()> {
        LENGTH_RANGE.check("length", self.length)?;
        BASE_DIAMETER_RANGE.check("baseDiameter", self.base_diameter)?;
        TIP_DIAMETER_RANGE.check("tipDiameter", self.tip_diameter)?;
        TONE_HOLE_RANGE.check("toneHoles", self.tone_hole_count as f64)?;
        WALL_THICKNESS_RANGE.check("wallThickness", self.wall_thickness)?;
        Ok(())
    }
}

impl Default for InstrumentParameters {
    fn default() -> Self {
        InstrumentParameters::new(600.0, 20.0, 5.0, 6, 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_design_is_within_slider_bounds() {
        assert!(InstrumentParameters::default().validate().is_ok());
    }

    #[test]
    fn validate_reports_first_offending_field() {
        let params = InstrumentParameters::new(1500.0, 60.0, 5.0, 6, 2.0);
        match params.validate() {
            Err(DesignError::OutOfRange { field, value, .. }) => {
                assert_eq!(field, "length");
                assert_eq!(value, 1500.0);
            }
            other => panic!("expected OutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn zero_holes_is_below_the_slider_minimum() {
        let params = InstrumentParameters::new(600.0, 20.0, 5.0, 0, 2.0);
        assert!(matches!(
            params.validate(),
            Err(DesignError::OutOfRange { field: "toneHoles", .. })
        ));
    }

    #[test]
    fn range_bounds_are_inclusive() {
        assert!(WALL_THICKNESS_RANGE.contains(0.5));
        assert!(WALL_THICKNESS_RANGE.contains(5.0));
        assert!(!WALL_THICKNESS_RANGE.contains(5.01));
    }
}
