//! # I-Section Inputs
//!
//! Geometry and section properties of a doubly-symmetric I-section. Values
//! come from a catalog ([`crate::materials::steel`]) or from an external
//! finite-element section analysis and are passed through unmodified.
//!
//! ## Example
//!
//! ```rust
//! use s16_core::section::SectionGeometry;
//!
//! let w460x158 = SectionGeometry {
//!     depth_mm: 475.0,
//!     flange_width_mm: 284.0,
//!     flange_thickness_mm: 23.9,
//!     web_thickness_mm: 15.0,
//! };
//! assert!(w460x158.validate().is_ok());
//! assert!((w460x158.web_height_mm() - 427.2).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::section as eq;
use crate::errors::{require_positive, CalcError, CalcResult};

/// Plate dimensions of an I-section (mm).
///
/// ## JSON Example
///
/// ```json
/// {
///   "depth_mm": 450.0,
///   "flange_width_mm": 152.0,
///   "flange_thickness_mm": 10.8,
///   "web_thickness_mm": 7.62
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionGeometry {
    /// Overall depth d
    pub depth_mm: f64,
    /// Flange width b
    pub flange_width_mm: f64,
    /// Flange thickness t
    pub flange_thickness_mm: f64,
    /// Web thickness w
    pub web_thickness_mm: f64,
}

impl SectionGeometry {
    /// Validate that every dimension is positive and the web has height.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("depth_mm", self.depth_mm)?;
        require_positive("flange_width_mm", self.flange_width_mm)?;
        require_positive("flange_thickness_mm", self.flange_thickness_mm)?;
        require_positive("web_thickness_mm", self.web_thickness_mm)?;
        if self.web_height_mm() <= 0.0 {
            return Err(CalcError::invalid_input(
                "depth_mm",
                self.depth_mm.to_string(),
                format!(
                    "Depth must exceed twice the flange thickness ({} mm)",
                    2.0 * self.flange_thickness_mm
                ),
            ));
        }
        Ok(())
    }

    /// Clear web height h = d − 2t
    pub fn web_height_mm(&self) -> f64 {
        eq::web_height(self.depth_mm, self.flange_thickness_mm)
    }

    /// Web area Aw = d·w
    pub fn web_area_mm2(&self) -> f64 {
        eq::web_area(self.depth_mm, self.web_thickness_mm)
    }

    /// Flange area Af = 2·b·t
    pub fn flange_area_mm2(&self) -> f64 {
        eq::flange_area(self.flange_width_mm, self.flange_thickness_mm)
    }

    /// Flange outstand ratio (b/2)/t
    pub fn flange_slenderness(&self) -> f64 {
        eq::flange_slenderness(self.flange_width_mm, self.flange_thickness_mm)
    }

    /// Web ratio h/w
    pub fn web_slenderness(&self) -> f64 {
        eq::web_slenderness(self.depth_mm, self.flange_thickness_mm, self.web_thickness_mm)
    }
}

/// Elastic, plastic and torsional properties of the section.
///
/// Major axis is x, minor axis is y.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionProperties {
    /// Elastic section modulus Sx (mm³)
    pub sx_mm3: f64,
    /// Elastic section modulus Sy (mm³)
    pub sy_mm3: f64,
    /// Plastic section modulus Zx (mm³)
    pub zx_mm3: f64,
    /// Plastic section modulus Zy (mm³)
    pub zy_mm3: f64,
    /// Minor-axis moment of inertia Iy (mm⁴)
    pub iy_mm4: f64,
    /// St. Venant torsional constant J (mm⁴)
    pub j_mm4: f64,
    /// Warping constant Cw (mm⁶)
    pub cw_mm6: f64,
}

impl SectionProperties {
    /// Validate that every property is positive.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("sx_mm3", self.sx_mm3)?;
        require_positive("sy_mm3", self.sy_mm3)?;
        require_positive("zx_mm3", self.zx_mm3)?;
        require_positive("zy_mm3", self.zy_mm3)?;
        require_positive("iy_mm4", self.iy_mm4)?;
        require_positive("j_mm4", self.j_mm4)?;
        require_positive("cw_mm6", self.cw_mm6)?;
        Ok(())
    }

    /// Shape factor Zx/Sx
    pub fn shape_factor(&self) -> f64 {
        self.zx_mm3 / self.sx_mm3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w460x52() -> SectionGeometry {
        SectionGeometry {
            depth_mm: 450.0,
            flange_width_mm: 152.0,
            flange_thickness_mm: 10.8,
            web_thickness_mm: 7.62,
        }
    }

    #[test]
    fn test_derived_quantities() {
        let g = w460x52();
        assert!((g.web_height_mm() - 428.4).abs() < 1e-9);
        assert!((g.web_area_mm2() - 3429.0).abs() < 1e-9);
        assert!((g.flange_area_mm2() - 3283.2).abs() < 1e-9);
        assert!((g.flange_slenderness() - 7.037).abs() < 1e-3);
    }

    #[test]
    fn test_zero_web_height_rejected() {
        let mut g = w460x52();
        g.depth_mm = 21.6;
        let err = g.validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_zero_thickness_rejected() {
        let mut g = w460x52();
        g.web_thickness_mm = 0.0;
        assert!(g.validate().is_err());
    }

    #[test]
    fn test_properties_validation() {
        let mut p = SectionProperties {
            sx_mm3: 944e3,
            sy_mm3: 83.9e3,
            zx_mm3: 1090e3,
            zy_mm3: 132e3,
            iy_mm4: 6.37e6,
            j_mm4: 211e3,
            cw_mm6: 306e9,
        };
        assert!(p.validate().is_ok());
        assert!((p.shape_factor() - 1.1547).abs() < 1e-3);

        p.cw_mm6 = -1.0;
        assert!(p.validate().is_err());
    }
}
