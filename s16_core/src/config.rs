//! # Design Settings
//!
//! Default design parameters shared by every check: material, resistance
//! factor, bracing condition, LTB sweep, and the reference factored moment
//! used by the slender-web reduction. Settings serialize to JSON; any field
//! missing from a settings file takes its default.
//!
//! ## Example
//!
//! ```rust
//! use s16_core::config::DesignSettings;
//! use s16_core::calculations::flexure::LateralSupport;
//!
//! let settings: DesignSettings =
//!     serde_json::from_str(r#"{ "support": "Unsupported", "resistance_factor": 0.9 }"#).unwrap();
//! assert_eq!(settings.support, LateralSupport::Unsupported);
//! assert_eq!(settings.flange_edges, 2);
//! assert!(settings.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::flexure::{LateralSupport, UnbracedLengthSweep};
use crate::errors::{require_positive, CalcError, CalcResult};
use crate::materials::SteelMaterial;

/// Resistance factor for structural steel, φ
pub const DEFAULT_RESISTANCE_FACTOR: f64 = 0.9;

/// Equivalent uniform moment factor, ω2
pub const DEFAULT_OMEGA: f64 = 1.0;

/// Reference factored moment Mf used by the Class 3 flange / Class 4 web
/// reduction (N·mm). A fixed demand value, not a computed load effect.
pub const DEFAULT_REFERENCE_MOMENT_NMM: f64 = 140.0e6;

/// Design parameters applied to a capacity check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignSettings {
    /// Steel properties
    pub material: SteelMaterial,

    /// Resistance factor φ (0 < φ ≤ 1)
    pub resistance_factor: f64,

    /// Equivalent moment factor ω for LTB
    pub omega: f64,

    /// Number of supported edges of a Class 4 flange element (1 or 2)
    pub flange_edges: u8,

    /// Reference factored moment Mf (N·mm)
    pub reference_moment_nmm: f64,

    /// Lateral support condition
    pub support: LateralSupport,

    /// Unbraced lengths sampled when laterally unsupported
    pub sweep: UnbracedLengthSweep,
}

impl Default for DesignSettings {
    fn default() -> Self {
        DesignSettings {
            material: SteelMaterial::default(),
            resistance_factor: DEFAULT_RESISTANCE_FACTOR,
            omega: DEFAULT_OMEGA,
            flange_edges: 2,
            reference_moment_nmm: DEFAULT_REFERENCE_MOMENT_NMM,
            support: LateralSupport::Supported,
            sweep: UnbracedLengthSweep::default(),
        }
    }
}

impl DesignSettings {
    /// Read settings from a JSON file.
    pub fn load(path: &str) -> CalcResult<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| CalcError::file_error("read", path, e.to_string()))?;
        let settings = Self::from_json(&contents)?;
        debug!(path, "loaded design settings");
        Ok(settings)
    }

    /// Parse settings from JSON text.
    pub fn from_json(json: &str) -> CalcResult<Self> {
        serde_json::from_str(json).map_err(|e| CalcError::serialization(e.to_string()))
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> CalcResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| CalcError::serialization(e.to_string()))
    }

    /// Validate every parameter.
    pub fn validate(&self) -> CalcResult<()> {
        self.material.validate()?;
        validate_resistance_factor(self.resistance_factor)?;
        require_positive("omega", self.omega)?;
        validate_flange_edges(self.flange_edges)?;
        require_positive("reference_moment_nmm", self.reference_moment_nmm)?;
        if self.support == LateralSupport::Unsupported {
            self.sweep.validate()?;
        }
        Ok(())
    }
}

pub(crate) fn validate_resistance_factor(phi: f64) -> CalcResult<()> {
    if phi.is_finite() && phi > 0.0 && phi <= 1.0 {
        Ok(())
    } else {
        Err(CalcError::invalid_input(
            "resistance_factor",
            phi.to_string(),
            "Resistance factor must be in (0, 1]",
        ))
    }
}

pub(crate) fn validate_flange_edges(edges: u8) -> CalcResult<()> {
    if matches!(edges, 1 | 2) {
        Ok(())
    } else {
        Err(CalcError::invalid_input(
            "flange_edges",
            edges.to_string(),
            "Flange edge support count must be 1 or 2",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = DesignSettings::default();
        assert_eq!(settings.resistance_factor, 0.9);
        assert_eq!(settings.omega, 1.0);
        assert_eq!(settings.reference_moment_nmm, 140.0e6);
        assert_eq!(settings.material.fy_mpa, 350.0);
        assert_eq!(settings.sweep.min_mm, 200.0);
        assert_eq!(settings.sweep.max_mm, 5000.0);
        assert_eq!(settings.sweep.step_mm, 100.0);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = DesignSettings::from_json(r#"{ "material": { "fy_mpa": 300.0, "e_mpa": 200000.0, "g_mpa": 77000.0 } }"#).unwrap();
        assert_eq!(settings.material.fy_mpa, 300.0);
        assert_eq!(settings.resistance_factor, 0.9);
        assert_eq!(settings.support, LateralSupport::Supported);
    }

    #[test]
    fn test_roundtrip() {
        let mut settings = DesignSettings::default();
        settings.flange_edges = 1;
        settings.support = LateralSupport::Unsupported;
        let json = settings.to_json().unwrap();
        assert_eq!(DesignSettings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_bad_json() {
        let err = DesignSettings::from_json("{ not json").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_validation() {
        let mut settings = DesignSettings::default();
        settings.resistance_factor = 1.2;
        assert!(settings.validate().is_err());

        let mut settings = DesignSettings::default();
        settings.flange_edges = 3;
        assert!(settings.validate().is_err());

        let mut settings = DesignSettings::default();
        settings.support = LateralSupport::Unsupported;
        settings.sweep.step_mm = 0.0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_sweep_ignored_when_supported() {
        let mut settings = DesignSettings::default();
        settings.sweep.step_mm = 0.0;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_load_missing_file() {
        let err = DesignSettings::load("/nonexistent/settings.json").unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }
}
