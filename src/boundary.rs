//! Convex regions the diagram is clipped to.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::Tolerance;
use crate::geometry::{on_segment, Line, Segment};
use crate::Point;

/// A convex region of the plane.
pub trait Boundary {
    /// The borders of the region, in counter-clockwise order, each one starting where the
    /// previous one ends.
    fn borders(&self) -> Vec<Line>;

    /// Return if `point` is strictly inside the region.
    ///
    /// Points on a border, within the point tolerance, are outside: a site on the border would
    /// have a cell of zero area on one side.
    fn contains(&self, point: Point, tolerance: &Tolerance) -> bool;

    /// The part of `segment` inside the region, or `None` if no part of it is.
    fn clip(&self, segment: &Segment, tolerance: &Tolerance) -> Option<Line>;

    /// The index, in [`Boundary::borders`], of the first border that `point` lies on.
    fn border_of(&self, point: Point, tolerance: &Tolerance) -> Option<usize> {
        self.borders()
            .iter()
            .position(|border| on_segment(point, border, tolerance.point))
    }
}

/// An axis aligned rectangle.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}
impl Rect {
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self {
            min: Point::new(xmin.min(xmax), ymin.min(ymax)),
            max: Point::new(xmin.max(xmax), ymin.max(ymax)),
        }
    }

    /// The smallest rectangle containing every point, or `None` if there are no points.
    pub fn bounding(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(Rect::new(first.x, first.y, first.x, first.y), |r, p| {
            Rect::new(
                r.min.x.min(p.x),
                r.min.y.min(p.y),
                r.max.x.max(p.x),
                r.max.y.max(p.y),
            )
        }))
    }

    pub fn bottom_left(&self) -> Point {
        self.min
    }

    pub fn bottom_right(&self) -> Point {
        Point::new(self.max.x, self.min.y)
    }

    pub fn top_right(&self) -> Point {
        self.max
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.min.x, self.max.y)
    }
}
impl Boundary for Rect {
    fn borders(&self) -> Vec<Line> {
        vec![
            Line::new(self.bottom_left(), self.bottom_right()),
            Line::new(self.bottom_right(), self.top_right()),
            Line::new(self.top_right(), self.top_left()),
            Line::new(self.top_left(), self.bottom_left()),
        ]
    }

    fn contains(&self, point: Point, tolerance: &Tolerance) -> bool {
        let eps = tolerance.point;
        point.x >= self.min.x + eps
            && point.x <= self.max.x - eps
            && point.y >= self.min.y + eps
            && point.y <= self.max.y - eps
    }

    /// Clip the segment by walking the equation along its dominant axis: `y` for `x + by = c`,
    /// `x` for `ax + y = c`. Missing endpoints extend to the rectangle.
    fn clip(&self, segment: &Segment, _tolerance: &Tolerance) -> Option<Line> {
        let (xmin, ymin) = (self.min.x, self.min.y);
        let (xmax, ymax) = (self.max.x, self.max.y);
        let eq = segment.equation;

        if eq.is_x_unit() {
            // x = c - by
            let mut y0 = segment.p0.map_or(ymin, |p| p.y.max(ymin));
            if y0 > ymax {
                return None;
            }
            let mut x0 = eq.c - eq.b * y0;

            let mut y1 = segment.p1.map_or(ymax, |p| p.y.min(ymax));
            if y1 < ymin {
                return None;
            }
            let mut x1 = eq.c - eq.b * y1;

            if (x0 > xmax && x1 > xmax) || (x0 < xmin && x1 < xmin) {
                return None;
            }

            // x is constant when b = 0, and then it is already inside.
            if x0 > xmax {
                x0 = xmax;
                y0 = (eq.c - x0) / eq.b;
            } else if x0 < xmin {
                x0 = xmin;
                y0 = (eq.c - x0) / eq.b;
            }

            if x1 > xmax {
                x1 = xmax;
                y1 = (eq.c - x1) / eq.b;
            } else if x1 < xmin {
                x1 = xmin;
                y1 = (eq.c - x1) / eq.b;
            }

            Some(Line::new(Point::new(x0, y0), Point::new(x1, y1)))
        } else {
            // y = c - ax
            let mut x0 = segment.p0.map_or(xmin, |p| p.x.max(xmin));
            if x0 > xmax {
                return None;
            }
            let mut y0 = eq.c - eq.a * x0;

            let mut x1 = segment.p1.map_or(xmax, |p| p.x.min(xmax));
            if x1 < xmin {
                return None;
            }
            let mut y1 = eq.c - eq.a * x1;

            if (y0 > ymax && y1 > ymax) || (y0 < ymin && y1 < ymin) {
                return None;
            }

            if y0 > ymax {
                y0 = ymax;
                x0 = (eq.c - y0) / eq.a;
            } else if y0 < ymin {
                y0 = ymin;
                x0 = (eq.c - y0) / eq.a;
            }

            if y1 > ymax {
                y1 = ymax;
                x1 = (eq.c - y1) / eq.a;
            } else if y1 < ymin {
                y1 = ymin;
                x1 = (eq.c - y1) / eq.a;
            }

            Some(Line::new(Point::new(x0, y0), Point::new(x1, y1)))
        }
    }
}

/// A convex polygon, given by its edges in counter-clockwise order.
///
/// Neither convexity nor orientation are checked. A polygon built from fewer than 3 edges or
/// vertices is empty: it has no borders and contains no point.
#[derive(Clone, Debug, PartialEq)]
pub struct ConvexPolygon {
    edges: Vec<Line>,
    bounds: Rect,
}
impl ConvexPolygon {
    pub fn from_rect(rect: Rect) -> Self {
        Self {
            edges: rect.borders(),
            bounds: rect,
        }
    }

    /// Build the polygon from its edges, where `lines[i].p1 == lines[i + 1].p0` and the last
    /// line ends at the start of the first.
    pub fn from_lines(lines: Vec<Line>) -> Self {
        if lines.len() < 3 {
            return Self::empty();
        }
        let bounds = Rect::bounding(lines.iter().flat_map(|l| [l.p0, l.p1]))
            .unwrap_or_else(|| Rect::new(0.0, 0.0, 0.0, 0.0));
        Self {
            edges: lines,
            bounds,
        }
    }

    /// Build the polygon from its vertices, joining each one to the next and the last to the
    /// first.
    pub fn from_vertices(vertices: &[Point]) -> Self {
        if vertices.len() < 3 {
            return Self::empty();
        }
        let n = vertices.len();
        let lines = (0..n)
            .map(|i| Line::new(vertices[i], vertices[(i + 1) % n]))
            .collect();
        Self::from_lines(lines)
    }

    fn empty() -> Self {
        Self {
            edges: Vec::new(),
            bounds: Rect::new(0.0, 0.0, 0.0, 0.0),
        }
    }

    pub fn edges(&self) -> &[Line] {
        &self.edges
    }

    pub fn vertices(&self) -> Vec<Point> {
        self.edges.iter().map(|e| e.p0).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// The axis aligned bounding box of the polygon.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// The area enclosed by the edges (shoelace formula), positive when the edges run
    /// counter-clockwise.
    pub fn signed_area(&self) -> f64 {
        self.edges.iter().map(|e| e.p0.perp_dot(e.p1)).sum::<f64>() / 2.0
    }

    pub fn is_ccw(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// Return if each edge starts where the previous one ends, within `eps`.
    pub fn is_closed(&self, eps: f64) -> bool {
        let n = self.edges.len();
        n >= 3
            && (0..n).all(|i| self.edges[i].p1.approx_eq(self.edges[(i + 1) % n].p0, eps))
    }

    /// Crossing number test: count how many edges a ray going to +x from `point` crosses.
    fn crossing_number(&self, point: Point) -> usize {
        self.edges
            .iter()
            .filter(|edge| {
                let upward = edge.p0.y <= point.y && edge.p1.y > point.y;
                let downward = edge.p0.y > point.y && edge.p1.y <= point.y;
                if !(upward || downward) {
                    return false;
                }
                let ray = (point.y - edge.p0.y) / (edge.p1.y - edge.p0.y);
                point.x < edge.p0.x + ray * (edge.p1.x - edge.p0.x)
            })
            .count()
    }
}
impl Boundary for ConvexPolygon {
    fn borders(&self) -> Vec<Line> {
        self.edges.clone()
    }

    fn contains(&self, point: Point, tolerance: &Tolerance) -> bool {
        if self.crossing_number(point) % 2 == 0 {
            return false;
        }
        !self
            .edges
            .iter()
            .any(|edge| on_segment(point, edge, tolerance.point))
    }

    /// Clip against the bounding box first, to get a finite segment, then clip that by the
    /// polygon edges, tracking the parameters where the segment enters (`te`) and leaves (`tl`)
    /// the polygon.
    fn clip(&self, segment: &Segment, tolerance: &Tolerance) -> Option<Line> {
        if self.is_empty() {
            return None;
        }

        let line = self.bounds.clip(segment, tolerance)?;
        if line.p0 == line.p1 {
            return None;
        }

        let mut te: f64 = 0.0;
        let mut tl: f64 = 1.0;
        let ds = line.vector();

        for edge in &self.edges {
            let e = edge.vector();
            let n = e.perp_dot(line.p0 - edge.p0);
            let d = -e.perp_dot(ds);

            if d.abs() < tolerance.parallel {
                if n < 0.0 {
                    // parallel to the edge, and outside of it.
                    return None;
                }
                continue;
            }

            let t = n / d;
            if d < 0.0 {
                // entering across this edge
                if t > te {
                    te = t;
                    if te > tl {
                        return None;
                    }
                }
            } else if t < tl {
                // leaving across this edge
                tl = t;
                if tl < te {
                    return None;
                }
            }
        }

        Some(Line::new(line.at(te), line.at(tl)))
    }
}
