//! Numeric tolerances shared by every geometric predicate.
//!
//! Intersection, point equality and clipping must agree on how close is "the same", otherwise a
//! vertex produced by one predicate can be rejected by the next. All of them read their epsilon
//! from a single [`Tolerance`] value owned by the diagram.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, VoronoiError};

/// Tolerances used by the geometry kernel.
///
/// # Example
///
/// ```rust
/// use fortune_voronoi::Tolerance;
///
/// let tolerance = Tolerance::new(1e-4, 1e-12).unwrap();
/// assert_eq!(tolerance.point, 1e-4);
///
/// assert!(Tolerance::new(-1.0, 1e-12).is_err());
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    /// Maximum per-coordinate difference for two points to be considered the same point.
    ///
    /// Also used for "point on segment" and for the boundary's "point on border" tests.
    pub point: f64,

    /// Two line equations whose determinant is smaller than this are parallel.
    pub parallel: f64,
}

impl Tolerance {
    pub const DEFAULT_POINT: f64 = 1e-6;
    pub const DEFAULT_PARALLEL: f64 = 1e-10;

    /// Create a tolerance, validating that both values are finite and positive.
    pub fn new(point: f64, parallel: f64) -> Result<Self> {
        let tolerance = Self { point, parallel };
        tolerance.validate()?;
        Ok(tolerance)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("point", self.point), ("parallel", self.parallel)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(VoronoiError::InvalidTolerance { name, value });
            }
        }
        Ok(())
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            point: Self::DEFAULT_POINT,
            parallel: Self::DEFAULT_PARALLEL,
        }
    }
}
