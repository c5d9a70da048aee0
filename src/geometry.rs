//! Geometric primitives: bisector line equations, segments and their predicates.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Point;

/// A line in the form `ax + by = c`.
///
/// Constructed as the perpendicular bisector of two points and normalized so that the coefficient
/// of the dominant axis is exactly 1: if `|dx| > |dy|` then `a == 1`, otherwise `b == 1`. The
/// sweep and the clipping code branch on which of the two it is, so the value must be exact.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineEquation {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}
impl LineEquation {
    /// The perpendicular bisector of `p0` and `p1`. The points must not coincide.
    pub fn bisector(p0: Point, p1: Point) -> Self {
        let dx = p1.x - p0.x;
        let dy = p1.y - p0.y;

        let c = p0.x * dx + p0.y * dy + (dx * dx + dy * dy) / 2.0;
        if dx.abs() > dy.abs() {
            Self {
                a: 1.0,
                b: dy / dx,
                c: c / dx,
            }
        } else {
            Self {
                a: dx / dy,
                b: 1.0,
                c: c / dy,
            }
        }
    }

    /// Return if the equation was normalized on the x coefficient, `x + by = c`.
    ///
    /// When both coefficients are 1 this is true, which selects the x-normalized formulas.
    pub fn is_x_unit(&self) -> bool {
        self.a == 1.0
    }

    pub fn determinant(&self, other: &LineEquation) -> f64 {
        self.a * other.b - self.b * other.a
    }

    pub fn is_parallel(&self, other: &LineEquation, eps: f64) -> bool {
        self.determinant(other).abs() < eps
    }

    /// The intersection point of the two lines, by Cramer's rule, or `None` if they are parallel.
    pub fn intersection(&self, other: &LineEquation, eps: f64) -> Option<Point> {
        if self.is_parallel(other, eps) {
            return None;
        }
        let det = self.determinant(other);
        let x = (self.c * other.b - other.c * self.b) / det;
        let y = (other.c * self.a - self.c * other.a) / det;
        Some(Point::new(x, y))
    }
}

/// A segment between two points. The order of the points is significant: it is part of equality,
/// and polygons are built from lines chained `p0 -> p1` in counter-clockwise order.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Line {
    pub p0: Point,
    pub p1: Point,
}
impl Line {
    pub const fn new(p0: Point, p1: Point) -> Self {
        Self { p0, p1 }
    }

    /// The direction vector `p1 - p0`.
    pub fn vector(&self) -> Point {
        self.p1 - self.p0
    }

    pub fn length(&self) -> f64 {
        self.vector().length()
    }

    pub fn reversed(&self) -> Self {
        Self::new(self.p1, self.p0)
    }

    pub fn approx_eq(&self, other: &Line, eps: f64) -> bool {
        self.p0.approx_eq(other.p0, eps) && self.p1.approx_eq(other.p1, eps)
    }

    /// Return if both endpoints are the same point, within `eps`.
    pub fn is_degenerate(&self, eps: f64) -> bool {
        self.p0.approx_eq(self.p1, eps)
    }

    /// Return if the two segments share at least one point. Touching endpoints and overlapping
    /// colinear segments count as intersecting.
    pub fn intersects(&self, other: &Line) -> bool {
        let c = other.p0 - self.p0;
        let r = self.vector();
        let s = other.vector();

        let cxr = c.perp_dot(r);
        let cxs = c.perp_dot(s);
        let rxs = r.perp_dot(s);

        if rxs == 0.0 {
            if cxr != 0.0 {
                // parallel
                return false;
            }

            // colinear: project `other` on `self` and check if the intervals overlap.
            let rr = r.dot(r);
            if rr == 0.0 {
                return other.contains_point_exact(self.p0);
            }
            let t0 = c.dot(r) / rr;
            let t1 = t0 + s.dot(r) / rr;
            let (lo, hi) = if t0 < t1 { (t0, t1) } else { (t1, t0) };
            return lo <= 1.0 && hi >= 0.0;
        }

        let t = cxs / rxs;
        let u = cxr / rxs;

        (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u)
    }

    /// Return if the segments cross at a single point strictly inside both of them. Touching at
    /// an endpoint (within `eps`) or running parallel does not count.
    pub fn crosses(&self, other: &Line, eps: f64) -> bool {
        let c = other.p0 - self.p0;
        let r = self.vector();
        let s = other.vector();

        let rxs = r.perp_dot(s);
        let (rl, sl) = (r.length(), s.length());
        if rl < eps || sl < eps || rxs.abs() <= eps * rl * sl {
            return false;
        }

        let t = c.perp_dot(s) / rxs;
        let u = c.perp_dot(r) / rxs;

        let (et, eu) = (eps / rl, eps / sl);
        t > et && t < 1.0 - et && u > eu && u < 1.0 - eu
    }

    /// The parameter `t` of the projection of `point` on the line, where `p0 + t * vector()` is
    /// the projected point.
    pub fn param_of(&self, point: Point) -> f64 {
        let v = self.vector();
        let len2 = v.dot(v);
        if len2 == 0.0 {
            return 0.0;
        }
        (point - self.p0).dot(v) / len2
    }

    /// The point at parameter `t`.
    pub fn at(&self, t: f64) -> Point {
        self.p0 + self.vector() * t
    }

    fn contains_point_exact(&self, point: Point) -> bool {
        let v = self.vector();
        let w = point - self.p0;
        if v.perp_dot(w) != 0.0 {
            return false;
        }
        let t = self.param_of(point);
        (0.0..=1.0).contains(&t) || (v == Point::ZERO && point == self.p0)
    }
}

/// Return if `point` lies on the segment `line`, within distance `eps` of it.
///
/// Colinearity is measured by the cross product relative to the segment length, and the
/// projection parameter must fall within the segment extended by `eps` on both sides.
pub fn on_segment(point: Point, line: &Line, eps: f64) -> bool {
    let v = line.vector();
    let len = v.length();
    if len < eps {
        return point.approx_eq(line.p0, eps) || point.approx_eq(line.p1, eps);
    }

    let distance = v.perp_dot(point - line.p0).abs() / len;
    if distance >= eps {
        return false;
    }

    let t = line.param_of(point);
    let slack = eps / len;
    t >= -slack && t <= 1.0 + slack
}

/// A segment of a line equation whose endpoints may not be known yet. An absent endpoint means
/// the segment extends to infinity in that direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub p0: Option<Point>,
    pub p1: Option<Point>,
    pub equation: LineEquation,
}
impl Segment {
    pub fn new(p0: Option<Point>, p1: Option<Point>, equation: LineEquation) -> Self {
        Self { p0, p1, equation }
    }
}

/// A Delaunay edge together with its dual Voronoi edge, if that edge is visible inside the
/// boundary.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Node {
    pub delaunay: Line,
    pub voronoi: Option<Line>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f64 = 1e-10;

    #[test]
    fn bisector_x_dominant() {
        let p0 = Point::new(0.0, 0.0);
        let p1 = Point::new(10.0, 0.0);
        let eq = LineEquation::bisector(p0, p1);

        assert_eq!(eq.a, 1.0);
        assert_eq!(eq.b, 0.0);
        assert_eq!(eq.c, 5.0);
        assert!(eq.is_x_unit());
    }

    #[test]
    fn bisector_y_dominant() {
        let p0 = Point::new(0.0, 0.0);
        let p1 = Point::new(0.0, 10.0);
        let eq = LineEquation::bisector(p0, p1);

        assert_eq!(eq.a, 0.0);
        assert_eq!(eq.b, 1.0);
        assert_eq!(eq.c, 5.0);
        assert!(!eq.is_x_unit());
    }

    #[test]
    fn parallel() {
        let eq0 = LineEquation::bisector(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        let eq1 = LineEquation::bisector(Point::new(0.0, 0.0), Point::new(0.0, 10.0));
        let shifted = LineEquation::bisector(Point::new(0.0, 1.0), Point::new(10.0, 1.0));

        assert!(!eq0.is_parallel(&eq1, EPS));
        assert!(eq0.is_parallel(&shifted, EPS));
        assert_eq!(eq0.intersection(&shifted, EPS), None);
        assert_eq!(eq0.intersection(&eq0, EPS), None);
    }

    #[test]
    fn intersection() {
        let line1 = LineEquation::bisector(Point::new(0.0, 0.0), Point::new(6.0, 6.0));
        let line2 = LineEquation::bisector(Point::new(0.0, 6.0), Point::new(6.0, 0.0));

        assert_eq!(line1.intersection(&line2, EPS), Some(Point::new(3.0, 3.0)));
    }

    proptest! {
        #[test]
        fn bisector_is_equidistant(a: (i8, i8), b: (i8, i8), t in -10.0..10.0f64) {
            let p = Point::new(a.0 as f64, a.1 as f64);
            let q = Point::new(b.0 as f64, b.1 as f64);
            prop_assume!(p != q);

            let eq = LineEquation::bisector(p, q);
            prop_assert!(eq.a == 1.0 || eq.b == 1.0);

            // walk along the line
            let point = if eq.is_x_unit() {
                Point::new(eq.c - eq.b * t, t)
            } else {
                Point::new(t, eq.c - eq.a * t)
            };

            let dp = point.distance(p);
            let dq = point.distance(q);
            prop_assert!((dp - dq).abs() <= 1e-9 * (dp + dq).max(1.0));
        }
    }

    #[test]
    fn line_intersects() {
        let p0 = Point::new(0.0, 10.0);
        let p1 = Point::new(10.0, 10.0);
        let p2 = Point::new(0.0, 5.0);
        let p3 = Point::new(10.0, 0.0);
        let l0 = Line::new(Point::ZERO, p0);

        let parallel = Line::new(p0 + Point::new(2.0, 2.0), p1 + Point::new(2.0, 2.0));
        assert!(!l0.intersects(&parallel));

        let apart = Line::new(p1, p1 * 2.0);
        assert!(!l0.intersects(&apart));

        let first = Line::new(Point::ZERO, p2);
        assert!(!first.intersects(&Line::new(Point::new(0.0, 6.0), p0)));
        assert!(first.intersects(&Line::new(Point::new(0.0, 4.0), p0)));
        // `other` covers `self` entirely.
        assert!(first.intersects(&Line::new(Point::new(0.0, -1.0), p0)));

        assert!(Line::new(Point::ZERO, p1).intersects(&Line::new(p0, p3)));
    }

    #[test]
    fn line_crosses() {
        let diagonal = Line::new(Point::ZERO, Point::new(10.0, 10.0));
        let other = Line::new(Point::new(0.0, 10.0), Point::new(10.0, 0.0));
        assert!(diagonal.crosses(&other, 1e-6));

        // touching at an endpoint is not crossing
        let touching = Line::new(Point::new(5.0, 5.0), Point::new(10.0, 0.0));
        assert!(diagonal.intersects(&touching));
        assert!(!diagonal.crosses(&touching, 1e-6));
    }

    proptest! {
        #[test]
        fn crossing_segments_intersect(
            a: (i8, i8), b: (i8, i8), c: (i8, i8), d: (i8, i8)
        ) {
            let point = |(x, y): (i8, i8)| Point::new(x as f64, y as f64);
            let l0 = Line::new(point(a), point(b));
            let l1 = Line::new(point(c), point(d));
            if l0.crosses(&l1, 1e-6) {
                prop_assert!(l0.intersects(&l1));
            }
        }
    }

    #[test]
    fn line_equality_is_ordered() {
        let l0 = Line::new(Point::ZERO, Point::new(0.0, 10.0));
        assert_eq!(l0, Line::new(Point::ZERO, Point::new(0.0, 10.0)));
        assert_ne!(l0, l0.reversed());
        assert_eq!(l0.vector(), Point::new(0.0, 10.0));
    }

    #[test]
    fn point_on_segment() {
        let line = Line::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0));

        assert!(on_segment(Point::new(5.0, 0.0), &line, 1e-6));
        assert!(on_segment(Point::new(10.0, 5e-7), &line, 1e-6));
        assert!(!on_segment(Point::new(5.0, 1e-3), &line, 1e-6));
        assert!(!on_segment(Point::new(11.0, 0.0), &line, 1e-6));
        assert!(!on_segment(Point::new(-1.0, 0.0), &line, 1e-6));
    }

    #[test]
    fn normalize_degenerate() {
        assert_eq!(Point::ZERO.normalize(), Point::ZERO);
        assert_eq!(Point::new(3.0, 4.0).normalize(), Point::new(0.6, 0.8));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_roundtrip() {
        let delaunay = Line::new(Point::new(1.0, 1.0), Point::new(6.0, 1.0));
        let voronoi = Line::new(Point::new(3.5, 0.0), Point::new(3.5, 2.875));

        let json = serde_json::to_string(&delaunay).unwrap();
        let restored: Line = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, delaunay);

        for node in [
            Node {
                delaunay,
                voronoi: Some(voronoi),
            },
            Node {
                delaunay,
                voronoi: None,
            },
        ] {
            let json = serde_json::to_string(&node).unwrap();
            let restored: Node = serde_json::from_str(&json).unwrap();
            assert_eq!(restored, node);
        }
    }
}
