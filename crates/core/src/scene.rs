//! Caller-owned scene state: everything one regeneration needs.
//!
//! A [`Scene`] bundles the charges, sampling domain, grid resolution, level
//! range and arrow settings. The core keeps no state between calls; the
//! presentation layer owns a `Scene` and passes it by reference. Two equal
//! scenes always produce bit-identical geometry.

use crate::charge::Charge;
use crate::domain::{Domain, Resolution};
use crate::error::FieldError;
use crate::field_source::ChargeField;
use crate::grid::Grid;
use crate::levels::LevelRange;
use crate::params::{param_f64, param_usize};
use crate::vectors::{field_arrows, Arrow, VectorSettings};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// Charges plus sampling and overlay configuration.
///
/// Missing keys in a JSON scene fall back to the reference defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Scene {
    pub charges: Vec<Charge>,
    pub domain: Domain,
    pub resolution: Resolution,
    pub levels: LevelRange,
    pub vectors: VectorSettings,
}

impl Default for Scene {
    /// Two positive unit charges on the x axis and a negative one above them.
    fn default() -> Self {
        Self {
            charges: vec![
                Charge::new(-1.0, 0.0, 1.0),
                Charge::new(1.0, 0.0, 1.0),
                Charge::new(0.0, 1.2, -1.0),
            ],
            domain: Domain::default(),
            resolution: Resolution::default(),
            levels: LevelRange::default(),
            vectors: VectorSettings::default(),
        }
    }
}

impl Scene {
    /// Parses a scene from JSON text.
    ///
    /// Syntax and shape errors are `FieldError::InvalidScene`.
    pub fn from_json_str(text: &str) -> Result<Self, FieldError> {
        serde_json::from_str(text).map_err(|e| FieldError::InvalidScene(e.to_string()))
    }

    /// Reads and parses a scene file.
    pub fn load(path: &Path) -> Result<Self, FieldError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| FieldError::Io(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&text)
    }

    /// Applies flat overrides (`vmin`, `vmax`, `num_levels`, `nx`, `ny`,
    /// `field_step`, `min_length`, `max_length`). Unknown keys and values of
    /// the wrong type are ignored.
    pub fn apply_overrides(&mut self, params: &Value) {
        self.levels.min = param_f64(params, "vmin", self.levels.min);
        self.levels.max = param_f64(params, "vmax", self.levels.max);
        self.levels.count = param_usize(params, "num_levels", self.levels.count);
        self.resolution.nx = param_usize(params, "nx", self.resolution.nx);
        self.resolution.ny = param_usize(params, "ny", self.resolution.ny);
        self.vectors.step = param_f64(params, "field_step", self.vectors.step);
        self.vectors.min_length = param_f64(params, "min_length", self.vectors.min_length);
        self.vectors.max_length = param_f64(params, "max_length", self.vectors.max_length);
    }

    /// Checks every part of the scene.
    pub fn validate(&self) -> Result<(), FieldError> {
        self.field_source()?;
        self.domain.validate()?;
        self.resolution.validate()?;
        self.levels.validate()?;
        self.vectors.validate()
    }

    /// Field model over this scene's charges.
    pub fn field_source(&self) -> Result<ChargeField<'_>, FieldError> {
        ChargeField::new(&self.charges)
    }

    /// Potential grid over the scene's domain and resolution.
    pub fn grid(&self) -> Result<Grid, FieldError> {
        Grid::sample(&self.domain, self.resolution, &self.field_source()?)
    }

    /// Field-direction arrows for the scene.
    pub fn arrows(&self) -> Result<Vec<Arrow>, FieldError> {
        field_arrows(&self.field_source()?, &self.domain, &self.vectors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_scene_matches_reference_state() {
        let s = Scene::default();
        assert_eq!(s.charges.len(), 3);
        assert_eq!(s.charges[2], Charge::new(0.0, 1.2, -1.0));
        assert_eq!(s.resolution, Resolution::new(150, 150));
        assert_eq!(s.levels, LevelRange::new(-5.0, 5.0, 12));
        assert!(s.validate().is_ok());
    }

    #[test]
    fn json_round_trip() {
        let mut s = Scene::default();
        s.charges.push(Charge::new(2.0, 2.0, -0.5));
        s.levels.count = 3;
        let text = serde_json::to_string_pretty(&s).unwrap();
        let restored = Scene::from_json_str(&text).unwrap();
        assert_eq!(s, restored);
    }

    #[test]
    fn json_contains_expected_keys() {
        let v = serde_json::to_value(Scene::default()).unwrap();
        for key in ["charges", "domain", "resolution", "levels", "vectors"] {
            assert!(v.get(key).is_some(), "missing key {key}");
        }
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let s = Scene::from_json_str(r#"{"charges": [{"x": 0.0, "y": 0.0, "q": 2.0}]}"#).unwrap();
        assert_eq!(s.charges, vec![Charge::new(0.0, 0.0, 2.0)]);
        assert_eq!(s.domain, Domain::default());
        assert_eq!(s.levels, LevelRange::default());
    }

    #[test]
    fn malformed_json_is_an_invalid_scene() {
        assert!(matches!(
            Scene::from_json_str("{charges: oops"),
            Err(FieldError::InvalidScene(_))
        ));
    }

    #[test]
    fn wrong_field_type_is_an_invalid_scene() {
        assert!(matches!(
            Scene::from_json_str(r#"{"resolution": {"nx": "wide", "ny": 10}}"#),
            Err(FieldError::InvalidScene(_))
        ));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let result = Scene::load(Path::new("/nonexistent/equipotential/scene.json"));
        assert!(matches!(result, Err(FieldError::Io(_))));
    }

    #[test]
    fn overrides_replace_known_keys() {
        let mut s = Scene::default();
        s.apply_overrides(&json!({
            "vmin": -2,
            "vmax": 2.5,
            "num_levels": 4,
            "nx": 60,
            "field_step": 0.5,
        }));
        assert_eq!(s.levels, LevelRange::new(-2.0, 2.5, 4));
        assert_eq!(s.resolution, Resolution::new(60, 150));
        assert!((s.vectors.step - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn overrides_ignore_wrong_types_and_unknown_keys() {
        let mut s = Scene::default();
        s.apply_overrides(&json!({"num_levels": "many", "colour": "red"}));
        assert_eq!(s, Scene::default());
    }

    #[test]
    fn validate_rejects_empty_charges() {
        let s = Scene {
            charges: Vec::new(),
            ..Scene::default()
        };
        assert!(matches!(s.validate(), Err(FieldError::EmptyCharges)));
    }

    #[test]
    fn validate_rejects_low_resolution() {
        let mut s = Scene::default();
        s.apply_overrides(&json!({"ny": 1}));
        assert!(matches!(
            s.validate(),
            Err(FieldError::InvalidResolution { nx: 150, ny: 1 })
        ));
    }

    #[test]
    fn grid_uses_scene_resolution() {
        let mut s = Scene::default();
        s.apply_overrides(&json!({"nx": 12, "ny": 8}));
        let grid = s.grid().unwrap();
        assert_eq!((grid.nx(), grid.ny()), (12, 8));
    }

    #[test]
    fn arrows_are_produced_for_default_scene() {
        assert!(!Scene::default().arrows().unwrap().is_empty());
    }
}
