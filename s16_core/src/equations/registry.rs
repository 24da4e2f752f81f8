//! # Equation Registry
//!
//! Central registry of the CSA S16-19 clauses implemented by the capacity
//! evaluators. Each capacity result carries the [`Equation`] that produced
//! it, so a report can cite the governing clause for every number.
//!
//! ## Usage
//!
//! ```rust
//! use s16_core::equations::registry::Equation;
//!
//! let meta = Equation::PlasticMoment.metadata();
//! assert_eq!(meta.reference.citation(), "CSA S16-19 Cl. 13.5(a)");
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// Code References
// ============================================================================

/// Reference to a design standard.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodeReference {
    /// CSA S16 - Design of steel structures
    CsaS16 {
        year: u16,
        clause: &'static str,
    },
    /// CSA S136 - North American specification for cold-formed steel members
    CsaS136,
    /// Fundamental mechanics (no specific code reference needed)
    Mechanics,
}

impl CodeReference {
    /// Format the reference for display in reports
    pub fn citation(&self) -> String {
        match self {
            CodeReference::CsaS16 { year, clause } => {
                format!("CSA S16-{} Cl. {}", year % 100, clause)
            }
            CodeReference::CsaS136 => "CSA S136".to_string(),
            CodeReference::Mechanics => "Fundamental Mechanics".to_string(),
        }
    }

    /// Short form for inline references
    pub fn short_form(&self) -> &'static str {
        match self {
            CodeReference::CsaS16 { .. } => "CSA S16",
            CodeReference::CsaS136 => "CSA S136",
            CodeReference::Mechanics => "Mechanics",
        }
    }
}

const fn s16(clause: &'static str) -> CodeReference {
    CodeReference::CsaS16 { year: 2019, clause }
}

// ============================================================================
// Equation Categories
// ============================================================================

/// Categories for grouping equations in the reference document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquationCategory {
    /// Width-to-thickness classification (Table 2)
    Classification,
    /// Laterally supported flexure (Cl. 13.5)
    SupportedFlexure,
    /// Laterally unsupported flexure (Cl. 13.6)
    UnsupportedFlexure,
    /// Shear in unstiffened webs (Cl. 13.4.1.1)
    Shear,
}

impl EquationCategory {
    /// Display name for the category
    pub fn display_name(&self) -> &'static str {
        match self {
            EquationCategory::Classification => "Section Classification",
            EquationCategory::SupportedFlexure => "Laterally Supported Members",
            EquationCategory::UnsupportedFlexure => "Laterally Unsupported Members",
            EquationCategory::Shear => "Shear",
        }
    }

    /// Sort order for the reference document (lower = earlier)
    pub fn sort_order(&self) -> u8 {
        match self {
            EquationCategory::Classification => 1,
            EquationCategory::SupportedFlexure => 2,
            EquationCategory::UnsupportedFlexure => 3,
            EquationCategory::Shear => 4,
        }
    }
}

// ============================================================================
// Variable Definition
// ============================================================================

/// Definition of a variable used in an equation.
#[derive(Debug, Clone)]
pub struct Variable {
    /// Symbol (e.g., "Zx", "Fy")
    pub symbol: &'static str,
    /// Description
    pub description: &'static str,
    /// Units (e.g., "mm³", "MPa")
    pub units: &'static str,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str, units: &'static str) -> Self {
        Self { symbol, description, units }
    }
}

// ============================================================================
// Equation Metadata
// ============================================================================

/// Complete metadata for one implemented clause.
#[derive(Debug, Clone)]
pub struct EquationMetadata {
    /// Human-readable name
    pub name: &'static str,
    /// Brief description of what this equation calculates
    pub description: &'static str,
    /// The formula in plain text
    pub formula_plain: &'static str,
    /// Code/standard reference
    pub reference: CodeReference,
    /// Variable definitions
    pub variables: Vec<Variable>,
    /// Assumptions or limitations
    pub assumptions: Vec<&'static str>,
    /// Category for grouping
    pub category: EquationCategory,
    /// Function name implementing the equation
    pub source_function: &'static str,
}

// ============================================================================
// Equation Enum
// ============================================================================

/// Every formula branch the evaluators can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Equation {
    // -------------------------------------------------------------------------
    // Classification
    // -------------------------------------------------------------------------
    /// (b/2)/t against 145, 170, 200 over √Fy
    FlangeClassification,
    /// h/w against 1100, 1700, 1900 over √Fy
    WebClassification,

    // -------------------------------------------------------------------------
    // Laterally supported
    // -------------------------------------------------------------------------
    /// Mr = φ·Zx·Fy
    PlasticMoment,
    /// Mr = φ·Sx·Fy
    YieldMoment,
    /// Mr = My·(1 − 0.0005·(Aw/Af)·(h/w) − 1900/√(Mf/(φ·Sx)))
    SlenderWebReduction,
    /// Mr = φ·Se·Fy
    EffectiveWidth,

    // -------------------------------------------------------------------------
    // Laterally unsupported
    // -------------------------------------------------------------------------
    /// Mu = (ω·π)/(1.2·L)·√(E·Iy·G·J + (π·E/L)²·Iy·Cw)
    ElasticCriticalMoment,
    /// Mr = min(1.15·φ·Mp·(1 − 0.28·Mp/Mu), φ·Mp)
    InelasticLtbPlastic,
    /// Mr = min(1.15·φ·My·(1 − 0.28·My/Mu), φ·My)
    InelasticLtbYield,
    /// Mr = min(1.15·φ·My·(1 − 0.28·My/Mu), φ·Se·Fy)
    InelasticLtbEffective,
    /// Mr = φ·Mu
    ElasticLtb,

    // -------------------------------------------------------------------------
    // Shear
    // -------------------------------------------------------------------------
    /// Fs = 0.66·Fy
    ShearYield,
    /// Fs = 670·√Fy/(h/w)
    ShearInelasticBuckling,
    /// Fs = 961200/(h/w)²
    ShearElasticBuckling,
}

impl Equation {
    /// Get the full metadata for this equation
    pub fn metadata(&self) -> EquationMetadata {
        match self {
            Equation::FlangeClassification => EquationMetadata {
                name: "Flange Classification",
                description: "Class of the compression flange outstand of an I-section in flexure",
                formula_plain: "b/2t <= 145/sqrt(Fy): 1, <= 170/sqrt(Fy): 2, <= 200/sqrt(Fy): 3, else 4",
                reference: s16("11.2, Table 2"),
                variables: vec![
                    Variable::new("b", "Flange width", "mm"),
                    Variable::new("t", "Flange thickness", "mm"),
                    Variable::new("Fy", "Specified minimum yield stress", "MPa"),
                ],
                assumptions: vec!["Bending about the major axis", "Limits inclusive on the lower class"],
                category: EquationCategory::Classification,
                source_function: "flange_class",
            },

            Equation::WebClassification => EquationMetadata {
                name: "Web Classification",
                description: "Class of the web of an I-section in flexure",
                formula_plain: "h/w <= 1100/sqrt(Fy): 1, <= 1700/sqrt(Fy): 2, <= 1900/sqrt(Fy): 3, else 4",
                reference: s16("11.2, Table 2"),
                variables: vec![
                    Variable::new("h", "Clear web height d - 2t", "mm"),
                    Variable::new("w", "Web thickness", "mm"),
                    Variable::new("Fy", "Specified minimum yield stress", "MPa"),
                ],
                assumptions: vec!["No axial compression in the web"],
                category: EquationCategory::Classification,
                source_function: "web_class",
            },

            Equation::PlasticMoment => EquationMetadata {
                name: "Plastic Moment Resistance",
                description: "Class 1 and 2 sections reach the full plastic moment",
                formula_plain: "Mr = phi * Zx * Fy",
                reference: s16("13.5(a)"),
                variables: vec![
                    Variable::new("phi", "Resistance factor", "-"),
                    Variable::new("Zx", "Plastic section modulus", "mm³"),
                    Variable::new("Fy", "Yield stress", "MPa"),
                ],
                assumptions: vec!["Continuous lateral support"],
                category: EquationCategory::SupportedFlexure,
                source_function: "braced_capacity",
            },

            Equation::YieldMoment => EquationMetadata {
                name: "Yield Moment Resistance",
                description: "Class 3 flange with a Class 1 web is limited to first yield",
                formula_plain: "Mr = phi * Sx * Fy",
                reference: s16("13.5(b)"),
                variables: vec![
                    Variable::new("Sx", "Elastic section modulus", "mm³"),
                ],
                assumptions: vec!["Continuous lateral support"],
                category: EquationCategory::SupportedFlexure,
                source_function: "braced_capacity",
            },

            Equation::SlenderWebReduction => EquationMetadata {
                name: "Slender Web Reduction",
                description: "Class 3 flange with a Class 4 web; yield moment reduced for web slenderness",
                formula_plain: "Mr = My * (1 - 0.0005 * (Aw/Af) * (h/w) - 1900/sqrt(Mf/(phi*Sx)))",
                reference: s16("13.5(c)(ii), 14.3.4"),
                variables: vec![
                    Variable::new("Aw", "Web area d*w", "mm²"),
                    Variable::new("Af", "Flange area 2*b*t", "mm²"),
                    Variable::new("Mf", "Reference factored moment", "N·mm"),
                ],
                assumptions: vec!["Mf is a configured constant, not a computed load effect"],
                category: EquationCategory::SupportedFlexure,
                source_function: "braced_capacity",
            },

            Equation::EffectiveWidth => EquationMetadata {
                name: "Effective Section Modulus",
                description: "Class 4 flange; resistance based on an effective section modulus",
                formula_plain: "Se = 670*t/sqrt(Fy) (two edges) or 200*t/sqrt(Fy) (one edge); Mr = phi * Se * Fy",
                reference: s16("13.5(c)(iii)"),
                variables: vec![
                    Variable::new("Se", "Effective section modulus", "mm³"),
                    Variable::new("t", "Flange thickness", "mm"),
                ],
                assumptions: vec!["Web Class 3 or better"],
                category: EquationCategory::SupportedFlexure,
                source_function: "braced_capacity",
            },

            Equation::ElasticCriticalMoment => EquationMetadata {
                name: "Elastic Critical Moment",
                description: "Elastic lateral-torsional buckling moment of an unbraced segment",
                formula_plain: "Mu = (omega*pi)/(1.2*L) * sqrt(E*Iy*G*J + (pi*E/L)^2 * Iy * Cw)",
                reference: s16("13.6(a)"),
                variables: vec![
                    Variable::new("omega", "Equivalent moment factor", "-"),
                    Variable::new("L", "Unbraced length", "mm"),
                    Variable::new("E", "Elastic modulus", "MPa"),
                    Variable::new("G", "Shear modulus", "MPa"),
                    Variable::new("Iy", "Minor-axis moment of inertia", "mm⁴"),
                    Variable::new("J", "Torsional constant", "mm⁴"),
                    Variable::new("Cw", "Warping constant", "mm⁶"),
                ],
                assumptions: vec!["Doubly-symmetric section"],
                category: EquationCategory::UnsupportedFlexure,
                source_function: "elastic_critical_moment",
            },

            Equation::InelasticLtbPlastic => EquationMetadata {
                name: "Inelastic LTB (Class 1/2)",
                description: "Mu > 0.67 Mp for a Class 1 or 2 flange and web",
                formula_plain: "Mr = min(1.15*phi*Mp*(1 - 0.28*Mp/Mu), phi*Mp)",
                reference: s16("13.6(a)(i)"),
                variables: vec![Variable::new("Mp", "Factored plastic moment phi*Zx*Fy", "N·mm")],
                assumptions: vec![],
                category: EquationCategory::UnsupportedFlexure,
                source_function: "ltb_capacity",
            },

            Equation::InelasticLtbYield => EquationMetadata {
                name: "Inelastic LTB (Class 3)",
                description: "Mu > 0.67 My for a Class 3 flange and web",
                formula_plain: "Mr = min(1.15*phi*My*(1 - 0.28*My/Mu), phi*My)",
                reference: s16("13.6(b)(i)"),
                variables: vec![Variable::new("My", "Factored yield moment phi*Sx*Fy", "N·mm")],
                assumptions: vec![],
                category: EquationCategory::UnsupportedFlexure,
                source_function: "ltb_capacity",
            },

            Equation::InelasticLtbEffective => EquationMetadata {
                name: "Inelastic LTB (Class 4)",
                description: "Mu > 0.67 My for a Class 4 flange and web, capped by the effective modulus",
                formula_plain: "Mr = min(1.15*phi*My*(1 - 0.28*My/Mu), phi*Se*Fy)",
                reference: s16("13.6(c)"),
                variables: vec![Variable::new("Se", "Effective section modulus", "mm³")],
                assumptions: vec![],
                category: EquationCategory::UnsupportedFlexure,
                source_function: "ltb_capacity",
            },

            Equation::ElasticLtb => EquationMetadata {
                name: "Elastic LTB",
                description: "Resistance governed by elastic buckling",
                formula_plain: "Mr = phi * Mu",
                reference: s16("13.6(a)(ii)"),
                variables: vec![],
                assumptions: vec![],
                category: EquationCategory::UnsupportedFlexure,
                source_function: "ltb_capacity",
            },

            Equation::ShearYield => EquationMetadata {
                name: "Shear Yielding",
                description: "Stocky web; shear stress reaches 0.66 Fy",
                formula_plain: "h/w <= 1014/sqrt(Fy): Fs = 0.66*Fy; Vr = phi*Aw*Fs",
                reference: s16("13.4.1.1(a)"),
                variables: vec![
                    Variable::new("Aw", "Shear area d*w", "mm²"),
                    Variable::new("Fs", "Ultimate shear stress", "MPa"),
                ],
                assumptions: vec!["Unstiffened web"],
                category: EquationCategory::Shear,
                source_function: "shear_stress",
            },

            Equation::ShearInelasticBuckling => EquationMetadata {
                name: "Inelastic Web Shear Buckling",
                description: "Intermediate web slenderness",
                formula_plain: "1014/sqrt(Fy) < h/w <= 1435/sqrt(Fy): Fs = 670*sqrt(Fy)/(h/w)",
                reference: s16("13.4.1.1(b)"),
                variables: vec![],
                assumptions: vec!["Unstiffened web"],
                category: EquationCategory::Shear,
                source_function: "shear_stress",
            },

            Equation::ShearElasticBuckling => EquationMetadata {
                name: "Elastic Web Shear Buckling",
                description: "Slender web",
                formula_plain: "h/w > 1435/sqrt(Fy): Fs = 961200/(h/w)^2",
                reference: s16("13.4.1.1(c)"),
                variables: vec![],
                assumptions: vec!["Unstiffened web"],
                category: EquationCategory::Shear,
                source_function: "shear_stress",
            },
        }
    }

    /// Get all equations in a given category
    pub fn in_category(category: EquationCategory) -> Vec<Equation> {
        ALL_EQUATIONS
            .iter()
            .filter(|eq| eq.metadata().category == category)
            .copied()
            .collect()
    }

    /// Get all categories in document order
    pub fn all_categories() -> Vec<EquationCategory> {
        use EquationCategory::*;
        let mut cats = vec![Classification, SupportedFlexure, UnsupportedFlexure, Shear];
        cats.sort_by_key(|c| c.sort_order());
        cats
    }
}

impl std::fmt::Display for Equation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let meta = self.metadata();
        write!(f, "{} ({})", meta.name, meta.reference.citation())
    }
}

/// All equations in the registry (for iteration)
pub static ALL_EQUATIONS: &[Equation] = &[
    Equation::FlangeClassification,
    Equation::WebClassification,
    Equation::PlasticMoment,
    Equation::YieldMoment,
    Equation::SlenderWebReduction,
    Equation::EffectiveWidth,
    Equation::ElasticCriticalMoment,
    Equation::InelasticLtbPlastic,
    Equation::InelasticLtbYield,
    Equation::InelasticLtbEffective,
    Equation::ElasticLtb,
    Equation::ShearYield,
    Equation::ShearInelasticBuckling,
    Equation::ShearElasticBuckling,
];

/// Generate a markdown reference of every implemented clause.
///
/// # Example
///
/// ```rust
/// use s16_core::equations::registry::generate_equations_markdown;
///
/// let markdown = generate_equations_markdown();
/// assert!(markdown.contains("Laterally Unsupported Members"));
/// ```
pub fn generate_equations_markdown() -> String {
    let mut output = String::with_capacity(8_000);

    output.push_str("# S16 Capacity Equations Reference\n\n");
    output.push_str("Units: N, mm, MPa. Moments in N·mm.\n\n---\n\n");

    let categories = Equation::all_categories();

    for category in &categories {
        let equations = Equation::in_category(*category);
        if equations.is_empty() {
            continue;
        }

        output.push_str(&format!("## {}\n\n", category.display_name()));

        for equation in equations {
            let meta = equation.metadata();

            output.push_str(&format!("### {}\n\n", meta.name));
            output.push_str(&format!("{}\n\n", meta.description));
            output.push_str(&format!("**Formula:** `{}`\n\n", meta.formula_plain));

            if !meta.variables.is_empty() {
                output.push_str("| Symbol | Description | Units |\n");
                output.push_str("|--------|-------------|-------|\n");
                for var in &meta.variables {
                    output.push_str(&format!("| {} | {} | {} |\n", var.symbol, var.description, var.units));
                }
                output.push('\n');
            }

            output.push_str(&format!("**Reference:** {}\n\n", meta.reference.citation()));
            output.push_str(&format!("**Source:** `{}`\n\n", meta.source_function));

            if !meta.assumptions.is_empty() {
                output.push_str("**Assumptions:**\n");
                for assumption in &meta.assumptions {
                    output.push_str(&format!("- {}\n", assumption));
                }
                output.push('\n');
            }

            output.push_str("---\n\n");
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_equations_have_metadata() {
        assert_eq!(ALL_EQUATIONS.len(), 14);

        for eq in ALL_EQUATIONS {
            let meta = eq.metadata();
            assert!(!meta.name.is_empty(), "Equation {:?} has no name", eq);
            assert!(!meta.formula_plain.is_empty(), "Equation {:?} has no formula", eq);
            assert!(!meta.source_function.is_empty());
        }
    }

    #[test]
    fn test_every_category_is_populated() {
        for category in Equation::all_categories() {
            assert!(!Equation::in_category(category).is_empty(), "{:?} is empty", category);
        }
    }

    #[test]
    fn test_citations() {
        assert_eq!(Equation::ShearYield.metadata().reference.citation(), "CSA S16-19 Cl. 13.4.1.1(a)");
        assert_eq!(CodeReference::CsaS136.citation(), "CSA S136");
    }

    #[test]
    fn test_display() {
        let shown = Equation::ElasticLtb.to_string();
        assert!(shown.starts_with("Elastic LTB"));
        assert!(shown.contains("13.6"));
    }

    #[test]
    fn test_markdown_lists_every_equation() {
        let markdown = generate_equations_markdown();
        for eq in ALL_EQUATIONS {
            assert!(markdown.contains(eq.metadata().name));
        }
    }
}
