//! Voronoi diagrams and their dual Delaunay graphs, clipped to a convex boundary.
//!
//! The diagram is computed with Fortune's sweep-line algorithm, as formulated in Steven Fortune's
//! `sweep2` C code: a beachline of half-edges ordered by a half-plane predicate, and a priority
//! queue of circle events keyed by the *-mapped y coordinate of the candidate vertex.
//!
//! ```
//! use fortune_voronoi::{Point, Rect, Voronoi};
//!
//! let sites = [Point::new(1.0, 1.0), Point::new(6.0, 1.0), Point::new(3.0, 6.0)];
//! let voronoi = Voronoi::new(&sites, Rect::new(0.0, 0.0, 10.0, 10.0)).unwrap();
//!
//! assert_eq!(voronoi.delaunay_lines().len(), 3);
//! assert!(voronoi.cell(Point::new(3.0, 6.0)).is_some());
//! ```
//!
//! References:
//! - S.J. Fortune, A sweepline algorithm for Voronoi diagrams, Algorithmica 2 (1987), 153–174.

use std::cmp::Ordering;

mod beachline;
pub mod boundary;
mod cell;
pub mod config;
pub mod error;
mod event_queue;
pub mod geometry;
pub mod graph;
mod heap;
pub mod site;
mod sweep;
mod voronoi;


pub use boundary::{Boundary, ConvexPolygon, Rect};
pub use config::Tolerance;
pub use error::{Result, VoronoiError};
pub use geometry::{Line, LineEquation, Node, Segment};
pub use graph::{Edge, EdgeIdx, Side};
pub use site::{Site, SiteIdx};
pub use voronoi::Voronoi;

/// A point in 2D space. It is ordered in sweep order: by y, then by x.
///
/// Equality and hashing are exact (with `-0.0` and `0.0` treated as the same value), so `==` is
/// deliberately not tolerant: it identifies sites. [`Point::approx_eq`] is the tolerance equality,
/// and geometric code that must absorb rounding uses it instead.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}
impl std::ops::Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}
impl std::ops::Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}
impl std::ops::Mul<f64> for Point {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}
impl Point {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// The z component of the 3D cross product of `self` and `other`.
    pub fn perp_dot(&self, other: Self) -> f64 {
        self.x * other.y - self.y * other.x
    }

    pub fn dot(&self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn length(&self) -> f64 {
        self.dot(*self).sqrt()
    }

    pub fn distance(&self, other: Self) -> f64 {
        (*self - other).length()
    }

    /// The unit vector with the same direction, or the zero vector if `self` has no length.
    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len == 0.0 || !len.is_finite() {
            return Self::ZERO;
        }
        Self::new(self.x / len, self.y / len)
    }

    /// Check if both coordinates differ by less than `eps`.
    pub fn approx_eq(&self, other: Self, eps: f64) -> bool {
        (self.x - other.x).abs() < eps && (self.y - other.y).abs() < eps
    }

    /// Return if `self` comes before `other` in the sweep, by y and then by x.
    pub fn precedes(&self, other: Self) -> bool {
        self.cmp(&other) == Ordering::Less
    }

    fn bits(&self) -> (u64, u64) {
        // adding zero turns -0.0 into 0.0, so both hash the same as they compare the same.
        ((self.x + 0.0).to_bits(), (self.y + 0.0).to_bits())
    }
}
impl std::fmt::Debug for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Point")
            .field(&self.x)
            .field(&self.y)
            .finish()
    }
}
impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.bits() == other.bits()
    }
}
impl std::hash::Hash for Point {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.bits().hash(state);
    }
}
impl Eq for Point {}
impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Point {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.y + 0.0)
            .total_cmp(&(other.y + 0.0))
            .then_with(|| (self.x + 0.0).total_cmp(&(other.x + 0.0)))
    }
}
