//! # I-Section Geometry Formulas
//!
//! Derived quantities of a doubly-symmetric I-section that feed the
//! classification, flexure and shear clauses.
//!
//! ## Notation
//!
//! - `d` = Overall depth
//! - `b` = Flange width
//! - `t` = Flange thickness
//! - `w` = Web thickness
//! - `h` = Clear web height between flanges (d − 2t)
//!
//! ```text
//!     ┌───────────────┐  ┬ t
//!     └──────┬─┬──────┘  ┴
//!            │ │
//!          h │ │ w
//!            │ │
//!     ┌──────┴─┴──────┐
//!     └───────────────┘
//!             b
//! ```
//!
//! All functions are unchecked; callers validate positivity first.

/// Clear web height between flanges.
///
/// # Formula
/// h = d − 2t
///
/// # Example
/// ```rust
/// use s16_core::equations::section::web_height;
///
/// let h = web_height(475.0, 23.9);
/// assert!((h - 427.2).abs() < 1e-9);
/// ```
#[inline]
pub fn web_height(d: f64, t: f64) -> f64 {
    d - 2.0 * t
}

/// Web (shear) area taken over the full depth.
///
/// # Formula
/// Aw = d × w
#[inline]
pub fn web_area(d: f64, w: f64) -> f64 {
    d * w
}

/// Combined area of both flanges.
///
/// # Formula
/// Af = 2 × b × t
#[inline]
pub fn flange_area(b: f64, t: f64) -> f64 {
    2.0 * b * t
}

/// Flange width-to-thickness ratio using the outstand (half the flange).
///
/// # Formula
/// λf = (b/2) / t
#[inline]
pub fn flange_slenderness(b: f64, t: f64) -> f64 {
    (b / 2.0) / t
}

/// Web height-to-thickness ratio.
///
/// # Formula
/// λw = h / w
#[inline]
pub fn web_slenderness(d: f64, t: f64, w: f64) -> f64 {
    web_height(d, t) / w
}

/// Effective elastic section modulus for a Class 4 flange.
///
/// The coefficient depends on how many edges of the compression flange
/// element are supported: 670 for two edges, 200 for one.
///
/// # Formula
/// Se = k × t / √Fy
#[inline]
pub fn effective_section_modulus(t: f64, fy: f64, edges_supported: u8) -> f64 {
    let k = if edges_supported == 2 { 670.0 } else { 200.0 };
    k * t / fy.sqrt()
}
