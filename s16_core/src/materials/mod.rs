//! # Materials Database
//!
//! Structural steel material properties and the metric W-shape catalog.
//!
//! ## Example
//!
//! ```rust
//! use s16_core::materials::{SteelGrade, SteelMaterial};
//!
//! let steel = SteelMaterial::from_grade(SteelGrade::G350W);
//! assert_eq!(steel.fy_mpa, 350.0);
//! assert_eq!(steel.e_mpa, 200_000.0);
//! ```

pub mod steel;

pub use steel::{builtin_w_shapes, SteelShape, SteelShapeDb};

use serde::{Deserialize, Serialize};

use crate::errors::{require_positive, CalcError, CalcResult};

/// Elastic modulus of structural steel (MPa)
pub const STEEL_E_MPA: f64 = 200_000.0;

/// Shear modulus of structural steel (MPa)
pub const STEEL_G_MPA: f64 = 77_000.0;

/// CSA G40.21 structural steel grades commonly used for rolled shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SteelGrade {
    /// 300W
    #[serde(rename = "300W")]
    G300W,
    /// 345WM (ASTM A992 equivalent)
    #[serde(rename = "345WM")]
    G345WM,
    /// 350W
    #[serde(rename = "350W")]
    G350W,
}

impl SteelGrade {
    /// All grades for selection lists
    pub const ALL: [SteelGrade; 3] = [SteelGrade::G300W, SteelGrade::G345WM, SteelGrade::G350W];

    /// Specified minimum yield stress Fy (MPa)
    pub fn fy_mpa(&self) -> f64 {
        match self {
            SteelGrade::G300W => 300.0,
            SteelGrade::G345WM => 345.0,
            SteelGrade::G350W => 350.0,
        }
    }

    /// Grade designation as printed on mill certificates
    pub fn code(&self) -> &'static str {
        match self {
            SteelGrade::G300W => "300W",
            SteelGrade::G345WM => "345WM",
            SteelGrade::G350W => "350W",
        }
    }

    /// Parse from a designation such as "350W" or "g40.21-350w"
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        let upper = s.trim().to_uppercase();
        let code = upper.rsplit('-').next().unwrap_or(upper.as_str());
        SteelGrade::ALL
            .into_iter()
            .find(|g| g.code() == code)
            .ok_or_else(|| CalcError::invalid_input("grade", s, "Unknown steel grade (expected 300W, 345WM or 350W)"))
    }
}

impl std::fmt::Display for SteelGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Mechanical properties of the steel used by every evaluator.
///
/// ## JSON Example
///
/// ```json
/// { "fy_mpa": 350.0, "e_mpa": 200000.0, "g_mpa": 77000.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SteelMaterial {
    /// Yield strength Fy (MPa)
    pub fy_mpa: f64,
    /// Elastic modulus E (MPa)
    pub e_mpa: f64,
    /// Shear modulus G (MPa)
    pub g_mpa: f64,
}

impl SteelMaterial {
    /// Steel with the given yield strength and standard moduli
    pub fn with_fy(fy_mpa: f64) -> Self {
        Self {
            fy_mpa,
            e_mpa: STEEL_E_MPA,
            g_mpa: STEEL_G_MPA,
        }
    }

    /// Steel for a G40.21 grade
    pub fn from_grade(grade: SteelGrade) -> Self {
        Self::with_fy(grade.fy_mpa())
    }

    /// Validate that all moduli are positive
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("fy_mpa", self.fy_mpa)?;
        require_positive("e_mpa", self.e_mpa)?;
        require_positive("g_mpa", self.g_mpa)?;
        Ok(())
    }
}

impl Default for SteelMaterial {
    fn default() -> Self {
        Self::from_grade(SteelGrade::G350W)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_material() {
        let steel = SteelMaterial::default();
        assert_eq!(steel.fy_mpa, 350.0);
        assert_eq!(steel.g_mpa, 77_000.0);
        assert!(steel.validate().is_ok());
    }

    #[test]
    fn test_grade_parsing() {
        assert_eq!(SteelGrade::from_str_flexible("350w").unwrap(), SteelGrade::G350W);
        assert_eq!(SteelGrade::from_str_flexible("G40.21-300W").unwrap(), SteelGrade::G300W);
        assert_eq!(SteelGrade::from_str_flexible("345WM").unwrap(), SteelGrade::G345WM);
        assert!(SteelGrade::from_str_flexible("A36").is_err());
    }

    #[test]
    fn test_grade_serialization() {
        let json = serde_json::to_string(&SteelGrade::G345WM).unwrap();
        assert_eq!(json, "\"345WM\"");
    }

    #[test]
    fn test_invalid_material() {
        let steel = SteelMaterial::with_fy(0.0);
        assert!(steel.validate().is_err());
    }
}
