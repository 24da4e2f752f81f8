//! # Structural Engineering Equations
//!
//! The closed-form expressions behind the S16 capacity checks, kept apart
//! from the branching clause logic in [`crate::calculations`] so each can be
//! verified against hand calculations on its own.
//!
//! ## Modules
//!
//! - [`section`] - I-section derived quantities (h, Aw, Af, slenderness, Se)
//! - [`ltb`] - Lateral-torsional buckling moments
//! - [`registry`] - Clause metadata carried by every capacity result
//!
//! ## References
//!
//! - CSA S16-19: Design of steel structures
//! - CISC Handbook of Steel Construction, 12th Edition

pub mod ltb;
pub mod registry;
pub mod section;

pub use ltb::{elastic_critical_moment, inelastic_ltb_moment, INELASTIC_THRESHOLD};

pub use section::{
    effective_section_modulus,
    flange_area,
    flange_slenderness,
    web_area,
    web_height,
    web_slenderness,
};

pub use registry::{
    CodeReference,
    Equation,
    EquationCategory,
    EquationMetadata,
    Variable,
    ALL_EQUATIONS,
    generate_equations_markdown,
};
