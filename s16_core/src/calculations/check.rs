//! # Beam Capacity Check
//!
//! Runs the classifier, the flexural evaluator and the shear evaluator on
//! one section and gathers the results. A class combination with no braced
//! clause is reported in the result instead of aborting the check, so the
//! shear resistance is still available.
//!
//! Also compares capacities computed from two sources of section
//! properties (catalog values against an independent section analysis).
//!
//! ## Example
//!
//! ```rust
//! use s16_core::calculations::check::{check, BeamCheckInput};
//! use s16_core::config::DesignSettings;
//! use s16_core::materials::builtin_w_shapes;
//!
//! let shape = builtin_w_shapes().lookup("W460X158").unwrap();
//! let input = BeamCheckInput::from_shape(shape, DesignSettings::default());
//! let result = check(&input).unwrap();
//!
//! assert_eq!(result.classes.flange.number(), 1);
//! assert!(result.flexure.is_ok());
//! assert!(result.shear.vr_n > 0.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::calculations::classification::{classify, SectionClassification};
use crate::calculations::flexure::{self, percent_difference, FlexuralResult, FlexureInput};
use crate::calculations::shear::{self, ShearInput, ShearResult};
use crate::config::DesignSettings;
use crate::errors::{CalcError, CalcResult};
use crate::materials::SteelShape;
use crate::section::{SectionGeometry, SectionProperties};

/// Section and settings for a combined check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamCheckInput {
    /// Section designation or user label
    pub label: String,
    pub geometry: SectionGeometry,
    pub properties: SectionProperties,
    #[serde(default)]
    pub settings: DesignSettings,
}

impl BeamCheckInput {
    /// Build a check for a catalog shape
    pub fn from_shape(shape: &SteelShape, settings: DesignSettings) -> Self {
        BeamCheckInput {
            label: shape.designation.clone(),
            geometry: shape.geometry(),
            properties: shape.properties(),
            settings,
        }
    }

    fn flexure_input(&self) -> FlexureInput {
        FlexureInput::new(self.label.clone(), self.geometry, self.properties, &self.settings)
    }

    fn shear_input(&self) -> ShearInput {
        ShearInput {
            label: self.label.clone(),
            geometry: self.geometry,
            fy_mpa: self.settings.material.fy_mpa,
            resistance_factor: self.settings.resistance_factor,
        }
    }
}

/// Combined result for one section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamCheckResult {
    pub label: String,
    pub classes: SectionClassification,
    /// Flexural capacity, or `NotCovered` for an unsupported class pair
    pub flexure: Result<FlexuralResult, CalcError>,
    pub shear: ShearResult,
}

impl BeamCheckResult {
    /// Governing moment resistance, if the flexural check is covered (N·mm)
    pub fn governing_mr_nmm(&self) -> Option<f64> {
        self.flexure.as_ref().ok().map(FlexuralResult::governing_mr_nmm)
    }
}

/// Classify the section and evaluate flexure and shear.
///
/// # Errors
///
/// `InvalidInput` for bad geometry, properties or settings. `NotCovered`
/// is captured in [`BeamCheckResult::flexure`], not returned.
pub fn check(input: &BeamCheckInput) -> CalcResult<BeamCheckResult> {
    input.settings.validate()?;

    let classes = classify(&input.geometry, input.settings.material.fy_mpa)?;
    let flexure = match flexure::calculate(&input.flexure_input()) {
        Err(err @ CalcError::NotCovered { .. }) => {
            warn!(label = %input.label, %err, "flexure not covered");
            Err(err)
        }
        other => Ok(other?),
    };
    let shear = shear::calculate(&input.shear_input())?;

    info!(
        label = %input.label,
        flange = %classes.flange,
        web = %classes.web,
        mr_nmm = flexure.as_ref().ok().map(FlexuralResult::governing_mr_nmm),
        vr_n = shear.vr_n,
        "beam check complete"
    );

    Ok(BeamCheckResult {
        label: input.label.clone(),
        classes,
        flexure,
        shear,
    })
}

/// Capacities of one section computed from two property sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyComparison {
    /// Governing Mr from the reference properties (N·mm)
    pub reference_mr_nmm: f64,
    /// Governing Mr from the alternate properties (N·mm)
    pub other_mr_nmm: f64,
    /// (other − reference)/reference × 100
    pub percent_difference: f64,
}

/// Compare governing flexural capacity for two sets of section properties.
///
/// Geometry and settings are shared, so the difference isolates the effect
/// of the property source.
pub fn compare_property_sources(
    label: &str,
    geometry: SectionGeometry,
    reference: SectionProperties,
    other: SectionProperties,
    settings: &DesignSettings,
) -> CalcResult<PropertyComparison> {
    let reference_mr = flexure::calculate(&FlexureInput::new(label, geometry, reference, settings))?
        .governing_mr_nmm();
    let other_mr = flexure::calculate(&FlexureInput::new(label, geometry, other, settings))?
        .governing_mr_nmm();
    let diff = percent_difference(reference_mr, other_mr)?;

    info!(label, reference_mr, other_mr, percent = diff, "property sources compared");

    Ok(PropertyComparison {
        reference_mr_nmm: reference_mr,
        other_mr_nmm: other_mr,
        percent_difference: diff,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::classification::SectionClass;
    use crate::calculations::flexure::LateralSupport;
    use crate::equations::registry::Equation;
    use crate::materials::{builtin_w_shapes, SteelMaterial};

    fn shape_check(designation: &str) -> BeamCheckInput {
        let shape = builtin_w_shapes().lookup(designation).unwrap();
        BeamCheckInput::from_shape(shape, DesignSettings::default())
    }

    #[test]
    fn test_compact_section_check() {
        let result = check(&shape_check("W460X158")).unwrap();
        assert_eq!(result.label, "W460X158");
        assert_eq!(result.classes.flange, SectionClass::Class1);
        assert_eq!(result.classes.web, SectionClass::Class1);

        let mr = result.governing_mr_nmm().unwrap();
        assert!((mr - 0.9 * 3770e3 * 350.0).abs() < 1e-6);

        assert_eq!(result.shear.equation, Equation::ShearYield);
        assert!((result.shear.vr_n - 1_481_287.5).abs() < 1e-6);
    }

    #[test]
    fn test_not_covered_keeps_shear() {
        let input = BeamCheckInput {
            label: "slender".to_string(),
            geometry: SectionGeometry {
                depth_mm: 1000.0,
                flange_width_mm: 220.0,
                flange_thickness_mm: 10.0,
                web_thickness_mm: 10.0,
            },
            properties: shape_check("W460X52").properties,
            settings: DesignSettings {
                material: SteelMaterial::with_fy(400.0),
                ..DesignSettings::default()
            },
        };
        let result = check(&input).unwrap();
        assert_eq!(result.flexure.as_ref().unwrap_err().error_code(), "NOT_COVERED");
        assert!(result.governing_mr_nmm().is_none());
        assert_eq!(result.shear.equation, Equation::ShearElasticBuckling);
    }

    #[test]
    fn test_invalid_input_propagates() {
        let mut input = shape_check("W460X52");
        input.settings.resistance_factor = 1.5;
        assert_eq!(check(&input).unwrap_err().error_code(), "INVALID_INPUT");

        let mut input = shape_check("W460X52");
        input.properties.zx_mm3 = 0.0;
        assert!(check(&input).is_err());
    }

    #[test]
    fn test_unbraced_check() {
        let mut input = shape_check("W460X52");
        input.settings.support = LateralSupport::Unsupported;
        let result = check(&input).unwrap();
        match &result.flexure {
            Ok(FlexuralResult::Unbraced(curve)) => assert_eq!(curve.points.len(), 49),
            other => panic!("expected LTB curve, got {:?}", other),
        }
    }

    #[test]
    fn test_result_json() {
        let result = check(&shape_check("W410X46")).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        let back: BeamCheckResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn test_compare_property_sources() {
        let shape = builtin_w_shapes().lookup("W460X158").unwrap();
        let reference = shape.properties();
        let mut analysed = reference;
        analysed.zx_mm3 *= 1.02;

        let cmp = compare_property_sources(
            "W460X158",
            shape.geometry(),
            reference,
            analysed,
            &DesignSettings::default(),
        )
        .unwrap();
        assert!((cmp.percent_difference - 2.0).abs() < 1e-9);
        assert!(cmp.other_mr_nmm > cmp.reference_mr_nmm);
    }
}
