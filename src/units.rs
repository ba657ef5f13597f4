//! Unit systems and unit-dependent physical constants.
//!
//! All hydraulic formulas in this crate are written in terms of two
//! constants that change together with the unit system:
//!
//! - `g`  — gravitational acceleration (m/s² or ft/s²)
//! - `kn` — the Manning equation conversion constant (1.0 SI, 1.486 English)
//!
//! The two are never meaningful independently, so they are only obtainable
//! as a pair derived from a [`UnitSystem`].

use std::fmt;

/// Unit system for a creation run.
///
/// Defaults to English units, matching the conveyance models this engine
/// was built for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnitSystem {
    /// Metric: meters, m³/s, g = 9.81 m/s², kn = 1.0.
    Si,
    /// US customary: feet, cfs, g = 32.2 ft/s², kn = 1.486.
    #[default]
    English,
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Si => write!(f, "SI"),
            Self::English => write!(f, "English"),
        }
    }
}

/// Gravity and Manning conversion constant for one unit system.
///
/// Always derived atomically from a [`UnitSystem`]; there is no way to set
/// `g` without also setting `kn`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnitConstants {
    /// Gravitational acceleration.
    pub g: f64,
    /// Manning equation conversion constant.
    pub kn: f64,
}

impl UnitConstants {
    /// Derive the constant pair for a unit system.
    ///
    /// Deriving twice from the same system yields identical values.
    #[inline]
    pub fn for_system(units: UnitSystem) -> Self {
        match units {
            UnitSystem::Si => Self { g: 9.81, kn: 1.0 },
            UnitSystem::English => Self { g: 32.2, kn: 1.486 },
        }
    }
}

impl From<UnitSystem> for UnitConstants {
    #[inline]
    fn from(units: UnitSystem) -> Self {
        Self::for_system(units)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    #[test]
    fn test_si_constants() {
        let c = UnitConstants::for_system(UnitSystem::Si);
        assert!((c.g - 9.81).abs() < TOL);
        assert!((c.kn - 1.0).abs() < TOL);
    }

    #[test]
    fn test_english_constants() {
        let c = UnitConstants::for_system(UnitSystem::English);
        assert!((c.g - 32.2).abs() < TOL);
        assert!((c.kn - 1.486).abs() < TOL);
    }

    #[test]
    fn test_derivation_is_idempotent() {
        let a = UnitConstants::for_system(UnitSystem::Si);
        let b = UnitConstants::for_system(UnitSystem::Si);
        assert_eq!(a, b);
    }

    #[test]
    fn test_default_is_english() {
        assert_eq!(UnitSystem::default(), UnitSystem::English);
    }
}
