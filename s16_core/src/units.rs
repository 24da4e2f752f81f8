//! # Unit Types
//!
//! Force and moment newtypes for reporting. The capacity formulas run in
//! N and N·mm; reports use kN and kN·m. Values serialize as bare numbers.
//!
//! ## Example
//!
//! ```rust
//! use s16_core::units::{KilonewtonMeters, NewtonMillimeters};
//!
//! let mr = NewtonMillimeters(1_187.55e6);
//! let mr_knm: KilonewtonMeters = mr.into();
//! assert!((mr_knm.0 - 1187.55).abs() < 1e-9);
//! assert_eq!(KilonewtonMeters(250.0).to_string(), "250.0 kN·m");
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// Force Units
// ============================================================================

/// Force in newtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Newtons(pub f64);

/// Force in kilonewtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilonewtons(pub f64);

impl From<Newtons> for Kilonewtons {
    fn from(n: Newtons) -> Self {
        Kilonewtons(n.0 / 1000.0)
    }
}

impl From<Kilonewtons> for Newtons {
    fn from(kn: Kilonewtons) -> Self {
        Newtons(kn.0 * 1000.0)
    }
}

impl std::fmt::Display for Kilonewtons {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1} kN", self.0)
    }
}

// ============================================================================
// Moment Units
// ============================================================================

/// Moment in newton-millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewtonMillimeters(pub f64);

/// Moment in kilonewton-metres (1 kN·m = 1e6 N·mm)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KilonewtonMeters(pub f64);

impl From<NewtonMillimeters> for KilonewtonMeters {
    fn from(nmm: NewtonMillimeters) -> Self {
        KilonewtonMeters(nmm.0 / 1.0e6)
    }
}

impl From<KilonewtonMeters> for NewtonMillimeters {
    fn from(knm: KilonewtonMeters) -> Self {
        NewtonMillimeters(knm.0 * 1.0e6)
    }
}

impl std::fmt::Display for KilonewtonMeters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1} kN·m", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moment_conversion() {
        let knm: KilonewtonMeters = NewtonMillimeters(250.0e6).into();
        assert_eq!(knm.0, 250.0);

        let back: NewtonMillimeters = knm.into();
        assert_eq!(back.0, 250.0e6);
    }

    #[test]
    fn test_newtons_to_kilonewtons() {
        let kn: Kilonewtons = Newtons(1_481_287.5).into();
        assert!((kn.0 - 1481.2875).abs() < 1e-9);
        assert!((Newtons::from(kn).0 - 1_481_287.5).abs() < 1e-6);
    }

    #[test]
    fn test_display() {
        assert_eq!(KilonewtonMeters(309.015).to_string(), "309.0 kN·m");
        assert_eq!(Kilonewtons(1481.2875).to_string(), "1481.3 kN");
    }

    #[test]
    fn test_serialization() {
        let mr = KilonewtonMeters(343.35);
        let json = serde_json::to_string(&mr).unwrap();
        assert_eq!(json, "343.35");

        let roundtrip: KilonewtonMeters = serde_json::from_str(&json).unwrap();
        assert_eq!(mr, roundtrip);
    }
}
