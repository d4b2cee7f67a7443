//! # Unit Types
//!
//! The domain model is unit-consistent (force/length in whatever system the
//! caller chose) and the adapter does not convert those. Angles are the one
//! exception: the domain stores radians, the external application takes
//! degrees. These newtypes make that conversion explicit at the call site.
//!
//! ## Example
//!
//! ```rust
//! use bridge_core::units::{Degrees, Radians};
//!
//! let angle = Radians(std::f64::consts::FRAC_PI_2);
//! let degrees: Degrees = angle.into();
//! assert!((degrees.0 - 90.0).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// Angle Units
// ============================================================================

/// Angle in radians (domain model convention)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Radians(pub f64);

/// Angle in degrees (external application convention)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Degrees(pub f64);

impl From<Radians> for Degrees {
    fn from(rad: Radians) -> Self {
        Degrees(rad.0 * 180.0 / std::f64::consts::PI)
    }
}

impl From<Degrees> for Radians {
    fn from(deg: Degrees) -> Self {
        Radians(deg.0 * std::f64::consts::PI / 180.0)
    }
}

macro_rules! impl_angle {
    ($type:ty) => {
        impl $type {
            pub fn new(value: f64) -> Self {
                Self(value)
            }

            pub fn value(self) -> f64 {
                self.0
            }

            pub fn is_zero(self) -> bool {
                self.0 == 0.0
            }
        }
    };
}

impl_angle!(Radians);
impl_angle!(Degrees);
