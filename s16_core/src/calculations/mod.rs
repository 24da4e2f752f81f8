//! # Capacity Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input) -> Result<*Result, CalcError>` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`classification`] - Flange and web class (CSA S16-19 Table 2)
//! - [`flexure`] - Factored moment resistance, braced or swept over unbraced length
//! - [`shear`] - Factored shear resistance of an unstiffened web
//! - [`check`] - All three on one section

pub mod check;
pub mod classification;
pub mod flexure;
pub mod shear;

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;

// Re-export commonly used types
pub use check::{BeamCheckInput, BeamCheckResult, PropertyComparison};
pub use classification::{SectionClass, SectionClassification};
pub use flexure::{FlexuralResult, FlexureInput, LateralSupport, LtbCurve, UnbracedLengthSweep};
pub use shear::{ShearInput, ShearResult};

/// Enum wrapper for all calculation types.
///
/// Lets a batch file mix calculation kinds in one JSON array:
///
/// ```json
/// [
///   { "type": "Shear", "label": "B-1", "geometry": { ... }, "fy_mpa": 350.0, "resistance_factor": 0.9 },
///   { "type": "Check", "label": "W460X52", "geometry": { ... }, "properties": { ... } }
/// ]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    /// Moment resistance only
    Flexure(FlexureInput),
    /// Shear resistance only
    Shear(ShearInput),
    /// Classification, flexure and shear
    Check(BeamCheckInput),
}

/// Output matching a [`CalculationItem`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationOutput {
    Flexure(FlexuralResult),
    Shear(ShearResult),
    Check(BeamCheckResult),
}

impl CalculationItem {
    /// Get the user-provided label for this calculation
    pub fn label(&self) -> &str {
        match self {
            CalculationItem::Flexure(f) => &f.label,
            CalculationItem::Shear(s) => &s.label,
            CalculationItem::Check(c) => &c.label,
        }
    }

    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationItem::Flexure(_) => "Flexure",
            CalculationItem::Shear(_) => "Shear",
            CalculationItem::Check(_) => "Check",
        }
    }

    /// Run the calculation
    pub fn run(&self) -> CalcResult<CalculationOutput> {
        match self {
            CalculationItem::Flexure(input) => flexure::calculate(input).map(CalculationOutput::Flexure),
            CalculationItem::Shear(input) => shear::calculate(input).map(CalculationOutput::Shear),
            CalculationItem::Check(input) => check::check(input).map(CalculationOutput::Check),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DesignSettings;
    use crate::materials::builtin_w_shapes;

    #[test]
    fn test_item_dispatch() {
        let shape = builtin_w_shapes().lookup("W460X52").unwrap();
        let item = CalculationItem::Check(BeamCheckInput::from_shape(shape, DesignSettings::default()));
        assert_eq!(item.label(), "W460X52");
        assert_eq!(item.calc_type(), "Check");
        assert!(matches!(item.run().unwrap(), CalculationOutput::Check(_)));
    }

    #[test]
    fn test_item_json_tag() {
        let shape = builtin_w_shapes().lookup("W460X52").unwrap();
        let item = CalculationItem::Shear(ShearInput {
            label: "V-1".to_string(),
            geometry: shape.geometry(),
            fy_mpa: 350.0,
            resistance_factor: 0.9,
        });
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.starts_with("{\"type\":\"Shear\""));

        let back: CalculationItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back.label(), "V-1");
        assert!(matches!(back.run().unwrap(), CalculationOutput::Shear(_)));
    }
}
