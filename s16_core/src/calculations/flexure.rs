//! # Flexural Capacity
//!
//! Factored moment resistance Mr of an I-section bending about its major
//! axis, per CSA S16-19 Cl. 13.5 (laterally supported) and Cl. 13.6
//! (laterally unsupported).
//!
//! - **Supported**: one value, chosen by the flange/web class combination.
//! - **Unsupported**: the lateral-torsional buckling curve, Mr sampled over
//!   a sweep of unbraced lengths.
//!
//! Every result carries the [`Equation`] that produced it.
//!
//! ## Example
//!
//! ```rust
//! use s16_core::calculations::flexure::{calculate, FlexureInput};
//! use s16_core::config::DesignSettings;
//! use s16_core::materials::builtin_w_shapes;
//!
//! let shape = builtin_w_shapes().lookup("W460X158").unwrap();
//! let input = FlexureInput::new(
//!     "B-1",
//!     shape.geometry(),
//!     shape.properties(),
//!     &DesignSettings::default(),
//! );
//!
//! let result = calculate(&input).unwrap();
//! // Class 1 section, continuous lateral support: Mr = φ·Zx·Fy
//! assert!((result.governing_mr_nmm() - 0.9 * 3770e3 * 350.0).abs() < 1.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::calculations::classification::{classify, SectionClass, SectionClassification};
use crate::config::{validate_flange_edges, validate_resistance_factor, DesignSettings};
use crate::equations::ltb::{elastic_critical_moment, inelastic_ltb_moment, INELASTIC_THRESHOLD};
use crate::equations::registry::Equation;
use crate::equations::section::effective_section_modulus;
use crate::errors::{require_positive, CalcError, CalcResult};
use crate::materials::SteelMaterial;
use crate::section::{SectionGeometry, SectionProperties};

/// Upper bound on the number of sampled lengths in one sweep
pub const MAX_SWEEP_POINTS: usize = 10_000;

/// Slack on (max − min)/step before rounding up, so an exact multiple does
/// not gain a point from floating-point noise
const SWEEP_TOLERANCE: f64 = 1.0e-9;

/// Smallest step relative to the longest length that still gives strictly
/// ascending samples in f64
const MIN_RELATIVE_STEP: f64 = 1.0e-12;

/// Lateral support condition of the compression flange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LateralSupport {
    /// Continuously braced; no lateral-torsional buckling
    #[default]
    Supported,
    /// Unbraced over the lengths in the sweep
    Unsupported,
}

impl std::fmt::Display for LateralSupport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LateralSupport::Supported => write!(f, "Laterally supported"),
            LateralSupport::Unsupported => write!(f, "Laterally unsupported"),
        }
    }
}

/// Unbraced lengths sampled for the LTB curve (mm).
///
/// Samples are `min + i·step` for `i = 0..=⌈(max − min)/step⌉`. When the
/// range is not a whole number of steps the last sample lands past `max`
/// by less than one step.
///
/// ```rust
/// use s16_core::calculations::flexure::UnbracedLengthSweep;
///
/// let sweep = UnbracedLengthSweep::new(200.0, 1000.0, 300.0);
/// assert_eq!(sweep.lengths().unwrap(), vec![200.0, 500.0, 800.0, 1100.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnbracedLengthSweep {
    /// Shortest unbraced length (mm), > 0
    pub min_mm: f64,
    /// Longest unbraced length (mm), ≥ min
    pub max_mm: f64,
    /// Interval between samples (mm), > 0
    pub step_mm: f64,
}

impl Default for UnbracedLengthSweep {
    fn default() -> Self {
        UnbracedLengthSweep {
            min_mm: 200.0,
            max_mm: 5000.0,
            step_mm: 100.0,
        }
    }
}

impl UnbracedLengthSweep {
    pub fn new(min_mm: f64, max_mm: f64, step_mm: f64) -> Self {
        Self { min_mm, max_mm, step_mm }
    }

    /// A single unbraced length
    pub fn single(length_mm: f64) -> Self {
        Self::new(length_mm, length_mm, length_mm)
    }

    pub fn validate(&self) -> CalcResult<()> {
        require_positive("sweep.min_mm", self.min_mm)?;
        require_positive("sweep.max_mm", self.max_mm)?;
        require_positive("sweep.step_mm", self.step_mm)?;
        if self.max_mm < self.min_mm {
            return Err(CalcError::invalid_input(
                "sweep.max_mm",
                self.max_mm.to_string(),
                format!("Maximum length must not be less than minimum ({} mm)", self.min_mm),
            ));
        }
        if self.steps() + 1.0 > MAX_SWEEP_POINTS as f64 {
            return Err(CalcError::invalid_input(
                "sweep.step_mm",
                self.step_mm.to_string(),
                format!("Sweep exceeds {} points", MAX_SWEEP_POINTS),
            ));
        }
        if self.step_mm < self.max_mm * MIN_RELATIVE_STEP {
            return Err(CalcError::invalid_input(
                "sweep.step_mm",
                self.step_mm.to_string(),
                "Step is too small to separate successive lengths",
            ));
        }
        Ok(())
    }

    /// Whole steps between min and max, rounded up; may be infinite
    fn steps(&self) -> f64 {
        ((self.max_mm - self.min_mm) / self.step_mm - SWEEP_TOLERANCE).ceil().max(0.0)
    }

    /// Number of samples, ⌈(max − min)/step⌉ + 1, saturating at
    /// [`MAX_SWEEP_POINTS`] + 1 for sweeps that fail validation
    pub fn count(&self) -> usize {
        (self.steps().min(MAX_SWEEP_POINTS as f64) as usize).saturating_add(1)
    }

    /// Sampled lengths in ascending order.
    pub fn lengths(&self) -> CalcResult<Vec<f64>> {
        self.validate()?;
        Ok((0..self.count())
            .map(|i| self.min_mm + i as f64 * self.step_mm)
            .collect())
    }
}

/// Input parameters for a flexural capacity check.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "B-1",
///   "geometry": { "depth_mm": 450.0, "flange_width_mm": 152.0, "flange_thickness_mm": 10.8, "web_thickness_mm": 7.62 },
///   "properties": { "sx_mm3": 944000.0, "sy_mm3": 83900.0, "zx_mm3": 1090000.0, "zy_mm3": 132000.0,
///                   "iy_mm4": 6370000.0, "j_mm4": 211000.0, "cw_mm6": 306000000000.0 },
///   "material": { "fy_mpa": 350.0, "e_mpa": 200000.0, "g_mpa": 77000.0 },
///   "support": "Unsupported",
///   "resistance_factor": 0.9,
///   "flange_edges": 2,
///   "omega": 1.0,
///   "reference_moment_nmm": 140000000.0,
///   "sweep": { "min_mm": 200.0, "max_mm": 5000.0, "step_mm": 100.0 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlexureInput {
    /// User label (e.g., "B-1")
    pub label: String,

    pub geometry: SectionGeometry,

    pub properties: SectionProperties,

    pub material: SteelMaterial,

    pub support: LateralSupport,

    /// Resistance factor φ
    pub resistance_factor: f64,

    /// Supported edges of a Class 4 flange element (1 or 2)
    pub flange_edges: u8,

    /// Equivalent moment factor ω
    pub omega: f64,

    /// Reference factored moment Mf for the slender-web reduction (N·mm)
    pub reference_moment_nmm: f64,

    /// Lengths to sample when unsupported; ignored when supported
    pub sweep: UnbracedLengthSweep,
}

impl FlexureInput {
    /// Build an input from section data and design settings.
    pub fn new(
        label: impl Into<String>,
        geometry: SectionGeometry,
        properties: SectionProperties,
        settings: &DesignSettings,
    ) -> Self {
        FlexureInput {
            label: label.into(),
            geometry,
            properties,
            material: settings.material,
            support: settings.support,
            resistance_factor: settings.resistance_factor,
            flange_edges: settings.flange_edges,
            omega: settings.omega,
            reference_moment_nmm: settings.reference_moment_nmm,
            sweep: settings.sweep,
        }
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        self.geometry.validate()?;
        self.properties.validate()?;
        self.material.validate()?;
        validate_resistance_factor(self.resistance_factor)?;
        validate_flange_edges(self.flange_edges)?;
        require_positive("omega", self.omega)?;
        require_positive("reference_moment_nmm", self.reference_moment_nmm)?;
        if self.support == LateralSupport::Unsupported {
            self.sweep.validate()?;
        }
        Ok(())
    }

    fn moments(&self) -> FactoredMoments {
        let phi = self.resistance_factor;
        let fy = self.material.fy_mpa;
        let se = effective_section_modulus(self.geometry.flange_thickness_mm, fy, self.flange_edges);
        FactoredMoments {
            phi,
            my_nmm: phi * self.properties.sx_mm3 * fy,
            mp_nmm: phi * self.properties.zx_mm3 * fy,
            effective_modulus_mm3: se,
            effective_nmm: phi * se * fy,
        }
    }
}

/// Reference capacities shared by every branch.
#[derive(Debug, Clone, Copy, PartialEq)]
struct FactoredMoments {
    phi: f64,
    /// MyX = φ·Sx·Fy
    my_nmm: f64,
    /// MpX = φ·Zx·Fy
    mp_nmm: f64,
    effective_modulus_mm3: f64,
    /// φ·Se·Fy
    effective_nmm: f64,
}

/// Laterally supported result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BracedCapacity {
    pub flange_class: SectionClass,
    pub web_class: SectionClass,
    /// Clause that produced `mr_nmm`
    pub equation: Equation,
    /// True for a Class 3 flange with a Class 2 or 3 web, which is routed
    /// to the effective-width rule
    pub fallback: bool,
    /// Factored yield moment φ·Sx·Fy (N·mm)
    pub my_nmm: f64,
    /// Factored plastic moment φ·Zx·Fy (N·mm)
    pub mp_nmm: f64,
    /// Effective section modulus, when the effective-width rule applied (mm³)
    pub effective_modulus_mm3: Option<f64>,
    /// Factored moment resistance (N·mm)
    pub mr_nmm: f64,
}

/// One sample of the LTB curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LtbPoint {
    /// Unbraced length L (mm)
    pub length_mm: f64,
    /// Elastic critical moment Mu (N·mm)
    pub mu_nmm: f64,
    /// Factored moment resistance Mr (N·mm)
    pub mr_nmm: f64,
    /// Branch applied at this length
    pub equation: Equation,
}

/// Laterally unsupported result: Mr against unbraced length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LtbCurve {
    pub flange_class: SectionClass,
    pub web_class: SectionClass,
    /// Factored yield moment φ·Sx·Fy (N·mm)
    pub my_nmm: f64,
    /// Factored plastic moment φ·Zx·Fy (N·mm)
    pub mp_nmm: f64,
    /// Samples in ascending length order
    pub points: Vec<LtbPoint>,
}

impl LtbCurve {
    /// Unbraced lengths, index-aligned with [`Self::mr_nmm`]
    pub fn lengths_mm(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.length_mm).collect()
    }

    /// Moment resistances, index-aligned with [`Self::lengths_mm`]
    pub fn mr_nmm(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.mr_nmm).collect()
    }

    /// Sample with the lowest resistance
    pub fn governing(&self) -> Option<&LtbPoint> {
        self.points
            .iter()
            .min_by(|a, b| a.mr_nmm.total_cmp(&b.mr_nmm))
    }
}

/// Flexural result, tagged by support condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "support")]
pub enum FlexuralResult {
    #[serde(rename = "Supported")]
    Braced(BracedCapacity),
    #[serde(rename = "Unsupported")]
    Unbraced(LtbCurve),
}

impl FlexuralResult {
    /// Governing resistance: the braced value, or the minimum over the
    /// LTB curve (N·mm)
    pub fn governing_mr_nmm(&self) -> f64 {
        match self {
            FlexuralResult::Braced(b) => b.mr_nmm,
            // A validated sweep always has at least one sample
            FlexuralResult::Unbraced(curve) => curve.governing().map_or(f64::INFINITY, |p| p.mr_nmm),
        }
    }

    pub fn classification(&self) -> SectionClassification {
        match self {
            FlexuralResult::Braced(b) => SectionClassification { flange: b.flange_class, web: b.web_class },
            FlexuralResult::Unbraced(c) => SectionClassification { flange: c.flange_class, web: c.web_class },
        }
    }
}

/// Calculate the factored moment resistance.
///
/// # Errors
///
/// * `InvalidInput` - non-positive dimensions, properties, Fy, ω, Mf, a bad
///   sweep, φ outside (0, 1], or an edge count other than 1 or 2
/// * `NotCovered` - braced Class 4 flange with a Class 4 web
pub fn calculate(input: &FlexureInput) -> CalcResult<FlexuralResult> {
    input.validate()?;

    let classes = classify(&input.geometry, input.material.fy_mpa)?;
    debug!(
        label = %input.label,
        flange = %classes.flange,
        web = %classes.web,
        support = ?input.support,
        "flexure classified"
    );

    match input.support {
        LateralSupport::Supported => braced_capacity(input, classes).map(FlexuralResult::Braced),
        LateralSupport::Unsupported => ltb_capacity(input, classes).map(FlexuralResult::Unbraced),
    }
}

/// Laterally supported resistance per Cl. 13.5.
pub fn braced_capacity(input: &FlexureInput, classes: SectionClassification) -> CalcResult<BracedCapacity> {
    use SectionClass::*;

    let m = input.moments();
    let g = &input.geometry;
    let mut fallback = false;

    let (equation, mr_nmm) = match (classes.flange, classes.web) {
        (Class1 | Class2, _) => (Equation::PlasticMoment, m.mp_nmm),
        (Class3, Class1) => (Equation::YieldMoment, m.my_nmm),
        (Class3, Class4) => {
            let web_ratio = g.web_area_mm2() / g.flange_area_mm2();
            let mf_stress = input.reference_moment_nmm / (m.phi * input.properties.sx_mm3);
            let reduction = 1.0 - 0.0005 * web_ratio * g.web_slenderness() - 1900.0 / mf_stress.sqrt();
            (Equation::SlenderWebReduction, m.my_nmm * reduction)
        }
        (Class4, Class1 | Class2 | Class3) => (Equation::EffectiveWidth, m.effective_nmm),
        (Class3, Class2 | Class3) => {
            warn!(
                label = %input.label,
                web = %classes.web,
                "Class 3 flange with Class 2/3 web routed to effective-width rule"
            );
            fallback = true;
            (Equation::EffectiveWidth, m.effective_nmm)
        }
        (Class4, Class4) => {
            return Err(CalcError::not_covered(
                classes.flange.number(),
                classes.web.number(),
                "Mr shall be computed in accordance with CSA S136",
            ));
        }
    };

    if mr_nmm <= 0.0 {
        warn!(label = %input.label, mr_nmm, %equation, "non-positive moment resistance");
    }
    debug!(label = %input.label, mr_nmm, %equation, "braced capacity");

    Ok(BracedCapacity {
        flange_class: classes.flange,
        web_class: classes.web,
        equation,
        fallback,
        my_nmm: m.my_nmm,
        mp_nmm: m.mp_nmm,
        effective_modulus_mm3: (equation == Equation::EffectiveWidth).then_some(m.effective_modulus_mm3),
        mr_nmm,
    })
}

/// Laterally unsupported resistance per Cl. 13.6, sampled over the sweep.
pub fn ltb_capacity(input: &FlexureInput, classes: SectionClassification) -> CalcResult<LtbCurve> {
    let m = input.moments();
    let p = &input.properties;
    let mat = &input.material;

    let points: Vec<LtbPoint> = input
        .sweep
        .lengths()?
        .into_iter()
        .map(|length_mm| {
            let mu_nmm = elastic_critical_moment(
                input.omega,
                length_mm,
                mat.e_mpa,
                mat.g_mpa,
                p.iy_mm4,
                p.j_mm4,
                p.cw_mm6,
            );
            let (equation, mr_nmm) = ltb_resistance(classes, mu_nmm, &m);
            trace!(length_mm, mu_nmm, mr_nmm, %equation, "ltb sample");
            LtbPoint {
                length_mm,
                mu_nmm,
                mr_nmm,
                equation,
            }
        })
        .collect();

    debug!(label = %input.label, samples = points.len(), "ltb curve");

    Ok(LtbCurve {
        flange_class: classes.flange,
        web_class: classes.web,
        my_nmm: m.my_nmm,
        mp_nmm: m.mp_nmm,
        points,
    })
}

/// Resistance at one unbraced length for the given class combination.
fn ltb_resistance(classes: SectionClassification, mu: f64, m: &FactoredMoments) -> (Equation, f64) {
    use SectionClass::*;

    let phi = m.phi;
    match (classes.flange, classes.web) {
        (Class1 | Class2, Class1 | Class2) if mu > INELASTIC_THRESHOLD * m.mp_nmm => (
            Equation::InelasticLtbPlastic,
            inelastic_ltb_moment(phi, m.mp_nmm, mu).min(phi * m.mp_nmm),
        ),
        (Class1 | Class2, Class1 | Class2) => (Equation::ElasticLtb, phi * mu),
        (Class3, Class3) if mu > INELASTIC_THRESHOLD * m.my_nmm => (
            Equation::InelasticLtbYield,
            inelastic_ltb_moment(phi, m.my_nmm, mu).min(phi * m.my_nmm),
        ),
        (Class4, Class4) if mu > INELASTIC_THRESHOLD * m.my_nmm => (
            Equation::InelasticLtbEffective,
            inelastic_ltb_moment(phi, m.my_nmm, mu).min(m.effective_nmm),
        ),
        _ => (Equation::ElasticLtb, phi * mu),
    }
}

/// Percentage difference of `other` relative to `reference`.
///
/// Used to compare capacities computed from two sources of section
/// properties, e.g. catalog values against a finite-element analysis.
pub fn percent_difference(reference: f64, other: f64) -> CalcResult<f64> {
    if reference == 0.0 || !reference.is_finite() || !other.is_finite() {
        return Err(CalcError::invalid_input(
            "reference",
            reference.to_string(),
            "Reference capacity must be finite and non-zero",
        ));
    }
    Ok((other - reference) / reference * 100.0)
}
