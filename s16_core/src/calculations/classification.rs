//! # Section Classification
//!
//! Width-to-thickness classification of I-section flanges and webs in
//! flexure per CSA S16-19 Table 2. The class decides whether a section may
//! reach its plastic moment (Class 1, 2), first yield (Class 3), or only a
//! reduced effective-section capacity (Class 4).
//!
//! Limits are inclusive on the lower class: a ratio exactly at 145/√Fy is
//! still Class 1.
//!
//! ## Example
//!
//! ```rust
//! use s16_core::calculations::classification::{flange_class, web_class, SectionClass};
//!
//! // W460X158, Fy = 350 MPa
//! assert_eq!(flange_class(284.0, 23.9, 350.0).unwrap(), SectionClass::Class1);
//! assert_eq!(web_class(475.0, 23.9, 15.0, 350.0).unwrap(), SectionClass::Class1);
//! ```

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::equations::section as eq;
use crate::errors::{require_positive, CalcError, CalcResult};
use crate::section::SectionGeometry;

/// Flange limits on (b/2)/t, multiplied by 1/√Fy
pub const FLANGE_LIMITS: [f64; 3] = [145.0, 170.0, 200.0];

/// Web limits on h/w, multiplied by 1/√Fy
pub const WEB_LIMITS: [f64; 3] = [1100.0, 1700.0, 1900.0];

/// Cross-section class of a plate element.
///
/// Serializes as the bare class number (1-4). Ordered from stockiest to
/// most slender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum SectionClass {
    /// Plastic design section
    Class1 = 1,
    /// Compact section
    Class2 = 2,
    /// Non-compact section
    Class3 = 3,
    /// Slender section
    Class4 = 4,
}

impl SectionClass {
    /// The class number 1-4
    pub fn number(self) -> u8 {
        self as u8
    }

    /// Class 1 or 2 (plastic moment attainable)
    pub fn is_compact(self) -> bool {
        matches!(self, SectionClass::Class1 | SectionClass::Class2)
    }
}

impl From<SectionClass> for u8 {
    fn from(class: SectionClass) -> Self {
        class.number()
    }
}

impl TryFrom<u8> for SectionClass {
    type Error = CalcError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(SectionClass::Class1),
            2 => Ok(SectionClass::Class2),
            3 => Ok(SectionClass::Class3),
            4 => Ok(SectionClass::Class4),
            _ => Err(CalcError::invalid_input(
                "section_class",
                value.to_string(),
                "Section class must be 1, 2, 3 or 4",
            )),
        }
    }
}

impl std::fmt::Display for SectionClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Class {}", self.number())
    }
}

/// Flange and web class of one section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionClassification {
    pub flange: SectionClass,
    pub web: SectionClass,
}

impl SectionClassification {
    /// The governing (most slender) class of the two elements
    pub fn governing(&self) -> SectionClass {
        self.flange.max(self.web)
    }
}

fn class_from_limits(ratio: f64, fy: f64, limits: [f64; 3]) -> SectionClass {
    let root_fy = fy.sqrt();
    if ratio <= limits[0] / root_fy {
        SectionClass::Class1
    } else if ratio <= limits[1] / root_fy {
        SectionClass::Class2
    } else if ratio <= limits[2] / root_fy {
        SectionClass::Class3
    } else {
        SectionClass::Class4
    }
}

/// Classify the flange from its width, thickness and yield strength.
///
/// # Errors
///
/// `InvalidInput` if any argument is not positive.
pub fn flange_class(flange_width: f64, flange_thickness: f64, fy: f64) -> CalcResult<SectionClass> {
    require_positive("flange_width_mm", flange_width)?;
    require_positive("flange_thickness_mm", flange_thickness)?;
    require_positive("fy_mpa", fy)?;

    let ratio = eq::flange_slenderness(flange_width, flange_thickness);
    let class = class_from_limits(ratio, fy, FLANGE_LIMITS);
    trace!(ratio, fy, %class, "flange classified");
    Ok(class)
}

/// Classify the web from depth, flange and web thickness and yield strength.
///
/// # Errors
///
/// `InvalidInput` if any argument is not positive or the web height
/// `depth − 2·flange_thickness` is not positive.
pub fn web_class(depth: f64, flange_thickness: f64, web_thickness: f64, fy: f64) -> CalcResult<SectionClass> {
    require_positive("depth_mm", depth)?;
    require_positive("flange_thickness_mm", flange_thickness)?;
    require_positive("web_thickness_mm", web_thickness)?;
    require_positive("fy_mpa", fy)?;

    let h = eq::web_height(depth, flange_thickness);
    if h <= 0.0 {
        return Err(CalcError::invalid_input(
            "depth_mm",
            depth.to_string(),
            "Web height d - 2t must be positive",
        ));
    }

    let ratio = h / web_thickness;
    let class = class_from_limits(ratio, fy, WEB_LIMITS);
    trace!(ratio, fy, %class, "web classified");
    Ok(class)
}

/// Classify both elements of a section.
pub fn classify(geometry: &SectionGeometry, fy: f64) -> CalcResult<SectionClassification> {
    Ok(SectionClassification {
        flange: flange_class(geometry.flange_width_mm, geometry.flange_thickness_mm, fy)?,
        web: web_class(
            geometry.depth_mm,
            geometry.flange_thickness_mm,
            geometry.web_thickness_mm,
            fy,
        )?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_compact_w_section() {
        // depth 476, b 284, t 23.9, w 15.6 at 350 MPa
        assert_eq!(flange_class(284.0, 23.9, 350.0).unwrap(), SectionClass::Class1);
        assert_eq!(web_class(476.0, 23.9, 15.6, 350.0).unwrap(), SectionClass::Class1);
    }

    #[test]
    fn test_flange_each_class() {
        // Fy = 400 gives limits 7.25, 8.5, 10.0 on (b/2)/t
        assert_eq!(flange_class(140.0, 10.0, 400.0).unwrap(), SectionClass::Class1);
        assert_eq!(flange_class(160.0, 10.0, 400.0).unwrap(), SectionClass::Class2);
        assert_eq!(flange_class(190.0, 10.0, 400.0).unwrap(), SectionClass::Class3);
        assert_eq!(flange_class(210.0, 10.0, 400.0).unwrap(), SectionClass::Class4);
    }

    #[test]
    fn test_flange_limits_inclusive() {
        // Exactly at the limit stays in the lower class
        assert_eq!(flange_class(145.0, 10.0, 400.0).unwrap(), SectionClass::Class1);
        assert_eq!(flange_class(170.0, 10.0, 400.0).unwrap(), SectionClass::Class2);
        assert_eq!(flange_class(200.0, 10.0, 400.0).unwrap(), SectionClass::Class3);
    }

    #[test]
    fn test_web_each_class() {
        // Fy = 400 gives limits 55, 85, 95 on h/w; t = 10, w = 10
        assert_eq!(web_class(570.0, 10.0, 10.0, 400.0).unwrap(), SectionClass::Class1);
        assert_eq!(web_class(720.0, 10.0, 10.0, 400.0).unwrap(), SectionClass::Class2);
        assert_eq!(web_class(920.0, 10.0, 10.0, 400.0).unwrap(), SectionClass::Class3);
        assert_eq!(web_class(1000.0, 10.0, 10.0, 400.0).unwrap(), SectionClass::Class4);
    }

    #[test]
    fn test_web_limit_inclusive() {
        // h/w = 55 exactly
        assert_eq!(web_class(570.0, 10.0, 10.0, 400.0).unwrap(), SectionClass::Class1);
    }

    #[test]
    fn test_domain_errors() {
        assert!(flange_class(284.0, 23.9, 0.0).is_err());
        assert!(flange_class(284.0, 0.0, 350.0).is_err());
        assert!(web_class(476.0, 23.9, 15.6, -350.0).is_err());
        assert!(web_class(40.0, 23.9, 15.6, 350.0).is_err());
        assert!(web_class(476.0, 23.9, 0.0, 350.0).is_err());
    }

    #[test]
    fn test_classify_geometry() {
        let g = SectionGeometry {
            depth_mm: 356.0,
            flange_width_mm: 369.0,
            flange_thickness_mm: 18.0,
            web_thickness_mm: 11.2,
        };
        let classes = classify(&g, 350.0).unwrap();
        assert_eq!(classes.flange, SectionClass::Class3);
        assert_eq!(classes.web, SectionClass::Class1);
        assert_eq!(classes.governing(), SectionClass::Class3);
    }

    #[test]
    fn test_class_serializes_as_number() {
        let json = serde_json::to_string(&SectionClass::Class3).unwrap();
        assert_eq!(json, "3");
        let back: SectionClass = serde_json::from_str("2").unwrap();
        assert_eq!(back, SectionClass::Class2);
        assert!(serde_json::from_str::<SectionClass>("5").is_err());
    }

    proptest! {
        /// A more slender flange never lands in a stockier class.
        #[test]
        fn flange_class_is_monotonic(
            width in 50.0f64..600.0,
            extra in 0.0f64..300.0,
            thickness in 3.0f64..60.0,
            fy in 200.0f64..700.0
        ) {
            let narrow = flange_class(width, thickness, fy).unwrap();
            let wide = flange_class(width + extra, thickness, fy).unwrap();
            prop_assert!(wide >= narrow);
        }

        /// A deeper web (same plates) never lands in a stockier class.
        #[test]
        fn web_class_is_monotonic(
            depth in 100.0f64..1500.0,
            extra in 0.0f64..500.0,
            web in 3.0f64..30.0,
            fy in 200.0f64..700.0
        ) {
            let flange = 10.0;
            let shallow = web_class(depth, flange, web, fy).unwrap();
            let deep = web_class(depth + extra, flange, web, fy).unwrap();
            prop_assert!(deep >= shallow);
        }
    }
}
