//! Steel Shapes Catalog (metric W-shapes)
//!
//! Section properties for wide-flange shapes, keyed by metric designation
//! (e.g. "W460X52"). This is the section-properties provider consumed by the
//! capacity evaluators; nothing here is computed, only looked up.
//!
//! ## Data Source
//!
//! `load_from_csv` reads the metric export of the AISC Shapes Database, whose
//! table units are scaled on load:
//!
//! | Column | Table unit | Stored as |
//! |--------|-----------|-----------|
//! | Ix, Iy | 10⁶ mm⁴ | mm⁴ |
//! | Sx, Sy, Zx, Zy | 10³ mm³ | mm³ |
//! | J | 10³ mm⁴ | mm⁴ |
//! | Cw | 10⁹ mm⁶ | mm⁶ |
//!
//! ## Example
//!
//! ```rust
//! use s16_core::materials::steel::builtin_w_shapes;
//!
//! let db = builtin_w_shapes();
//! let shape = db.lookup("w460x52").unwrap();
//! assert_eq!(shape.depth_mm, 450.0);
//! assert_eq!(shape.zx_mm3, 1090e3);
//! ```

use std::collections::BTreeMap;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::{CalcError, CalcResult};
use crate::section::{SectionGeometry, SectionProperties};

/// Scale factor for Ix, Iy table values (10⁶ mm⁴)
const INERTIA_SCALE: f64 = 1.0e6;
/// Scale factor for S and Z table values (10³ mm³)
const MODULUS_SCALE: f64 = 1.0e3;
/// Scale factor for J table values (10³ mm⁴)
const TORSION_SCALE: f64 = 1.0e3;
/// Scale factor for Cw table values (10⁹ mm⁶)
const WARPING_SCALE: f64 = 1.0e9;

/// Wide-flange shape with all properties the capacity checks need.
///
/// All values in mm-based SI units (mm, mm², mm³, mm⁴, mm⁶).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SteelShape {
    /// Metric designation (e.g., "W460X52")
    pub designation: String,

    // === Dimensions ===
    /// Gross area (mm²)
    pub area_mm2: Option<f64>,
    /// Overall depth d (mm)
    pub depth_mm: f64,
    /// Flange width b (mm)
    pub flange_width_mm: f64,
    /// Flange thickness t (mm)
    pub flange_thickness_mm: f64,
    /// Web thickness w (mm)
    pub web_thickness_mm: f64,
    /// Distance from outer flange face to web toe of fillet (mm)
    pub kdes_mm: Option<f64>,

    // === Strong axis ===
    /// Moment of inertia Ix (mm⁴)
    pub ix_mm4: Option<f64>,
    /// Elastic section modulus Sx (mm³)
    pub sx_mm3: f64,
    /// Plastic section modulus Zx (mm³)
    pub zx_mm3: f64,

    // === Weak axis ===
    /// Moment of inertia Iy (mm⁴)
    pub iy_mm4: f64,
    /// Elastic section modulus Sy (mm³)
    pub sy_mm3: f64,
    /// Plastic section modulus Zy (mm³)
    pub zy_mm3: f64,

    // === Torsion ===
    /// Torsional constant J (mm⁴)
    pub j_mm4: f64,
    /// Warping constant Cw (mm⁶)
    pub cw_mm6: f64,
}

impl SteelShape {
    /// Plate dimensions for classification and shear
    pub fn geometry(&self) -> SectionGeometry {
        SectionGeometry {
            depth_mm: self.depth_mm,
            flange_width_mm: self.flange_width_mm,
            flange_thickness_mm: self.flange_thickness_mm,
            web_thickness_mm: self.web_thickness_mm,
        }
    }

    /// Section properties for flexure
    pub fn properties(&self) -> SectionProperties {
        SectionProperties {
            sx_mm3: self.sx_mm3,
            sy_mm3: self.sy_mm3,
            zx_mm3: self.zx_mm3,
            zy_mm3: self.zy_mm3,
            iy_mm4: self.iy_mm4,
            j_mm4: self.j_mm4,
            cw_mm6: self.cw_mm6,
        }
    }

    /// Root fillet radius implied by kdes, r = kdes − w/2 (as used when
    /// meshing the section for an FE property solver)
    pub fn fillet_radius_mm(&self) -> Option<f64> {
        self.kdes_mm.map(|k| k - self.web_thickness_mm / 2.0)
    }
}

impl std::fmt::Display for SteelShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (d={:.0} mm, b={:.0} mm, Zx={:.0}e3 mm³)",
            self.designation,
            self.depth_mm,
            self.flange_width_mm,
            self.zx_mm3 / 1.0e3
        )
    }
}

/// Steel shapes catalog.
///
/// Shapes are indexed by uppercase designation; iteration is in
/// designation order.
#[derive(Debug, Clone, Default)]
pub struct SteelShapeDb {
    shapes: BTreeMap<String, SteelShape>,

    /// Catalog source (file path or "builtin")
    pub source: Option<String>,
}

impl SteelShapeDb {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Load shapes from a metric AISC CSV export.
    pub fn load_from_csv(path: &str) -> CalcResult<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| CalcError::file_error("open", path, format!("Failed to read CSV: {}", e)))?;
        let mut db = Self::from_csv_str(&contents, path)?;
        db.source = Some(path.to_string());
        Ok(db)
    }

    /// Parse catalog rows from CSV text.
    ///
    /// `source` names the input in error messages. Rows with a missing or
    /// unparseable required value are skipped with a warning.
    pub fn from_csv_str(contents: &str, source: &str) -> CalcResult<Self> {
        let mut lines = contents.lines();

        let header_line = lines
            .next()
            .ok_or_else(|| CalcError::file_error("read", source, "CSV file is empty"))?;

        let headers: Vec<&str> = header_line.split(',').map(str::trim).collect();
        let col_index = |name: &str| -> Option<usize> { headers.iter().position(|h| *h == name) };
        let required = |name: &str| -> CalcResult<usize> {
            col_index(name)
                .ok_or_else(|| CalcError::file_error("parse", source, format!("Missing '{}' column", name)))
        };

        let section_idx = required("Section")?;
        let d_idx = required("d")?;
        let bf_idx = required("bf")?;
        let tf_idx = required("tf")?;
        let tw_idx = required("tw")?;
        let sx_idx = required("Sx")?;
        let sy_idx = required("Sy")?;
        let zx_idx = required("Zx")?;
        let zy_idx = required("Zy")?;
        let iy_idx = required("Iy")?;
        let j_idx = required("J")?;
        let cw_idx = required("Cw")?;

        let a_idx = col_index("A");
        let ix_idx = col_index("Ix");
        let kdes_idx = col_index("kdes");

        let mut db = SteelShapeDb::new();

        for (offset, line) in lines.enumerate() {
            let line_num = offset + 2;
            if line.trim().is_empty() {
                continue;
            }

            let fields: Vec<&str> = line.split(',').collect();
            let designation = fields.get(section_idx).map(|s| s.trim()).unwrap_or("");
            if designation.is_empty() {
                continue;
            }

            let get = |idx: usize| fields.get(idx).and_then(|v| parse_optional_f64(v));
            let get_opt = |idx: Option<usize>| idx.and_then(get);

            let parsed = (|| {
                Some(SteelShape {
                    designation: designation.to_uppercase(),
                    area_mm2: get_opt(a_idx),
                    depth_mm: get(d_idx)?,
                    flange_width_mm: get(bf_idx)?,
                    flange_thickness_mm: get(tf_idx)?,
                    web_thickness_mm: get(tw_idx)?,
                    kdes_mm: get_opt(kdes_idx),
                    ix_mm4: get_opt(ix_idx).map(|v| v * INERTIA_SCALE),
                    sx_mm3: get(sx_idx)? * MODULUS_SCALE,
                    zx_mm3: get(zx_idx)? * MODULUS_SCALE,
                    iy_mm4: get(iy_idx)? * INERTIA_SCALE,
                    sy_mm3: get(sy_idx)? * MODULUS_SCALE,
                    zy_mm3: get(zy_idx)? * MODULUS_SCALE,
                    j_mm4: get(j_idx)? * TORSION_SCALE,
                    cw_mm6: get(cw_idx)? * WARPING_SCALE,
                })
            })();

            match parsed {
                Some(shape) => db.insert(shape),
                None => warn!(source, line = line_num, designation, "skipping shape with missing properties"),
            }
        }

        debug!(source, shapes = db.len(), "loaded shape catalog");
        Ok(db)
    }

    /// Insert a shape into the catalog
    pub fn insert(&mut self, shape: SteelShape) {
        self.shapes.insert(shape.designation.to_uppercase(), shape);
    }

    /// Look up a shape by designation (case-insensitive).
    pub fn lookup(&self, designation: &str) -> CalcResult<&SteelShape> {
        let key = designation.trim().to_uppercase();
        self.shapes
            .get(&key)
            .ok_or_else(|| CalcError::section_not_found(designation))
    }

    /// Shapes whose designation starts with `prefix` (e.g. "W460")
    pub fn search(&self, prefix: &str) -> Vec<&SteelShape> {
        let prefix = prefix.trim().to_uppercase();
        self.shapes
            .iter()
            .filter(|(k, _)| k.starts_with(&prefix))
            .map(|(_, v)| v)
            .collect()
    }

    /// All shapes in designation order
    pub fn iter(&self) -> impl Iterator<Item = &SteelShape> {
        self.shapes.values()
    }

    /// Number of shapes in the catalog
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

/// Parse an optional f64 from a CSV field
///
/// Returns None for empty strings, dashes, or invalid numbers.
fn parse_optional_f64(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() || trimmed == "-" || trimmed == "—" {
        return None;
    }
    f64::from_str(trimmed).ok()
}

// ============================================================================
// Built-in Shapes (for use without a CSV file)
// ============================================================================

static BUILTIN: Lazy<SteelShapeDb> = Lazy::new(|| {
    let mut db = SteelShapeDb::new();

    // (designation, A, d, b, t, w, kdes, Ix, Sx, Zx, Iy, Sy, Zy, J, Cw), SI units
    let shapes = [
        ("W360X134", 17100.0, 356.0, 369.0, 18.0, 11.2, 33.3, 416e6, 2340e3, 2570e3, 151e6, 818e3, 1240e3, 1690e3, 4300e9),
        ("W410X46", 5890.0, 404.0, 140.0, 11.2, 6.99, 21.4, 156e6, 773e3, 885e3, 5.16e6, 73.6e3, 115e3, 192e3, 199e9),
        ("W460X52", 6650.0, 450.0, 152.0, 10.8, 7.62, 21.0, 212e6, 944e3, 1090e3, 6.37e6, 83.9e3, 132e3, 211e3, 306e9),
        ("W460X158", 20100.0, 475.0, 284.0, 23.9, 15.0, 38.9, 795e6, 3340e3, 3770e3, 91.6e6, 646e3, 991e3, 3110e3, 4460e9),
        ("W610X125", 15900.0, 612.0, 229.0, 19.6, 11.9, 32.3, 986e6, 3210e3, 3670e3, 39.3e6, 342e3, 534e3, 1540e3, 3570e9),
    ];

    for (designation, a, d, b, t, w, kdes, ix, sx, zx, iy, sy, zy, j, cw) in shapes {
        db.insert(SteelShape {
            designation: designation.to_string(),
            area_mm2: Some(a),
            depth_mm: d,
            flange_width_mm: b,
            flange_thickness_mm: t,
            web_thickness_mm: w,
            kdes_mm: Some(kdes),
            ix_mm4: Some(ix),
            sx_mm3: sx,
            zx_mm3: zx,
            iy_mm4: iy,
            sy_mm3: sy,
            zy_mm3: zy,
            j_mm4: j,
            cw_mm6: cw,
        });
    }

    db.source = Some("builtin".to_string());
    db
});

/// A small built-in catalog of common metric W-shapes.
///
/// Values are rounded conversions of the AISC tables, adequate for demos and
/// tests; load the full CSV for design work.
pub fn builtin_w_shapes() -> &'static SteelShapeDb {
    &BUILTIN
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CSV: &str = "\
Section,A,d,bf,tf,tw,kdes,Ix,Zx,Sx,Iy,Zy,Sy,J,Cw
W1100X390,49900,1100,400,31.2,20.1,51.6,10000,21100,18300,334,2550,1670,11900,97600
W460X52,6650,450,152,10.8,7.62,21.0,212,1090,944,6.37,132,83.9,211,306
W200X15,1910,200,100,5.2,4.3,,12.7,,127,0.87,,17.4,21.2,8.1
";

    #[test]
    fn test_csv_scaling() {
        let db = SteelShapeDb::from_csv_str(SAMPLE_CSV, "sample.csv").unwrap();

        let big = db.lookup("W1100X390").unwrap();
        assert_eq!(big.ix_mm4, Some(10_000_000_000.0));
        assert_eq!(big.zx_mm3, 21_100_000.0);
        assert_eq!(big.j_mm4, 11_900_000.0);
        assert_eq!(big.cw_mm6, 97_600.0e9);
    }

    #[test]
    fn test_csv_skips_incomplete_rows() {
        let db = SteelShapeDb::from_csv_str(SAMPLE_CSV, "sample.csv").unwrap();
        // W200X15 has no Zx
        assert_eq!(db.len(), 2);
        assert!(db.lookup("W200X15").is_err());
    }

    #[test]
    fn test_csv_missing_column() {
        let err = SteelShapeDb::from_csv_str("Section,d,bf\nW1,1,2\n", "bad.csv").unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
        assert!(err.to_string().contains("'tf'"));
    }

    #[test]
    fn test_csv_empty() {
        assert!(SteelShapeDb::from_csv_str("", "empty.csv").is_err());
    }

    #[test]
    fn test_csv_matches_builtin() {
        let from_csv = SteelShapeDb::from_csv_str(SAMPLE_CSV, "sample.csv").unwrap();
        let csv_shape = from_csv.lookup("W460X52").unwrap();
        let builtin = builtin_w_shapes().lookup("W460X52").unwrap();
        assert_eq!(csv_shape.geometry(), builtin.geometry());
        assert!((csv_shape.sx_mm3 - builtin.sx_mm3).abs() < 1e-6);
        assert!((csv_shape.cw_mm6 - builtin.cw_mm6).abs() < 1.0);
    }

    #[test]
    fn test_load_missing_file() {
        let err = SteelShapeDb::load_from_csv("/nonexistent/aisc_w_si.csv").unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_builtin_lookup() {
        let db = builtin_w_shapes();
        assert_eq!(db.len(), 5);

        let shape = db.lookup("W460X158").unwrap();
        assert_eq!(shape.zx_mm3, 3770e3);
        assert_eq!(shape.geometry().web_thickness_mm, 15.0);

        let lower = db.lookup(" w460x158 ").unwrap();
        assert_eq!(shape, lower);
    }

    #[test]
    fn test_not_found() {
        let err = builtin_w_shapes().lookup("W9999X1").unwrap_err();
        assert_eq!(err, CalcError::section_not_found("W9999X1"));
    }

    #[test]
    fn test_search() {
        let w460 = builtin_w_shapes().search("W460");
        assert_eq!(w460.len(), 2);
        assert!(w460.iter().all(|s| s.designation.starts_with("W460")));
    }

    #[test]
    fn test_fillet_radius() {
        let shape = builtin_w_shapes().lookup("W460X158").unwrap();
        let r = shape.fillet_radius_mm().unwrap();
        assert!((r - 31.4).abs() < 1e-9);
    }

    #[test]
    fn test_parse_optional_f64() {
        assert_eq!(parse_optional_f64("123.45"), Some(123.45));
        assert_eq!(parse_optional_f64("  456  "), Some(456.0));
        assert_eq!(parse_optional_f64(""), None);
        assert_eq!(parse_optional_f64("-"), None);
        assert_eq!(parse_optional_f64("not a number"), None);
    }
}
