//! # s16_core - Steel I-Section Capacity Engine
//!
//! `s16_core` classifies doubly-symmetric steel I-sections and computes
//! their factored moment and shear resistance per CSA S16-19. All inputs
//! and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Traceable**: Every capacity names the clause that produced it
//!
//! ## Quick Start
//!
//! ```rust
//! use s16_core::calculations::check::{check, BeamCheckInput};
//! use s16_core::config::DesignSettings;
//! use s16_core::materials::builtin_w_shapes;
//!
//! let shape = builtin_w_shapes().lookup("W460X52").unwrap();
//! let result = check(&BeamCheckInput::from_shape(shape, DesignSettings::default())).unwrap();
//!
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! assert!(json.contains("W460X52"));
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Classification, flexure, shear and the combined check
//! - [`config`] - Design settings (φ, ω, bracing, sweep)
//! - [`equations`] - Formula functions and the clause registry
//! - [`materials`] - Steel grades and the W-shape catalog
//! - [`section`] - Section geometry and properties
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod config;
pub mod equations;
pub mod errors;
pub mod materials;
pub mod section;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{
    BeamCheckInput, BeamCheckResult, FlexuralResult, FlexureInput, LateralSupport, SectionClass,
    ShearInput, ShearResult, UnbracedLengthSweep,
};
pub use config::DesignSettings;
pub use errors::{CalcError, CalcResult};
pub use materials::{SteelMaterial, SteelShape, SteelShapeDb};
pub use section::{SectionGeometry, SectionProperties};
