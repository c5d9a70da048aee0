//! The persistent output graph: the edges of the diagram and the sites they separate.

use crate::boundary::Boundary;
use crate::config::Tolerance;
use crate::geometry::{Line, LineEquation, Node, Segment};
use crate::site::{Site, SiteIdx};
use crate::Point;

pub type EdgeIdx = u32;

/// Which side of an edge a half-edge traces, or which endpoint of an edge a vertex is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}
impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

/// An edge of the Voronoi diagram: a piece of the bisector between two sites.
///
/// The endpoints are discovered during the sweep. An absent endpoint means the edge extends to
/// infinity on that side. After the sweep the edge is clipped against the boundary, and
/// [`Edge::clipped`] holds the part of it that is visible, if any.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    /// The lower site, in sweep order, when the edge was created.
    pub left: SiteIdx,
    pub right: SiteIdx,
    pub equation: LineEquation,
    vertices: [Option<Point>; 2],
    clipped: Option<Line>,
}
impl Edge {
    /// Create the edge separating `left` and `right`. The caller is responsible for registering
    /// the edge on both sites.
    pub fn new(sites: &[Site], left: SiteIdx, right: SiteIdx) -> Self {
        let equation =
            LineEquation::bisector(sites[left as usize].point, sites[right as usize].point);
        Self {
            left,
            right,
            equation,
            vertices: [None; 2],
            clipped: None,
        }
    }

    pub fn site(&self, side: Side) -> SiteIdx {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn vertex(&self, side: Side) -> Option<Point> {
        self.vertices[side.index()]
    }

    pub fn set_vertex(&mut self, side: Side, vertex: Point) {
        self.vertices[side.index()] = Some(vertex);
    }

    /// The segment of the bisector between the known vertices, ordered along the direction the
    /// clipping code walks the equation.
    ///
    /// For `x + by = c` with `b >= 0` the right vertex is the one with the lower y, so the
    /// vertices are swapped.
    pub fn segment(&self) -> Segment {
        let (p0, p1) = if self.equation.is_x_unit() && self.equation.b >= 0.0 {
            (self.vertex(Side::Right), self.vertex(Side::Left))
        } else {
            (self.vertex(Side::Left), self.vertex(Side::Right))
        };
        Segment::new(p0, p1, self.equation)
    }

    /// Clip the edge against `boundary`, replacing any previous clipping.
    pub fn clip<B: Boundary + ?Sized>(&mut self, boundary: &B, tolerance: &Tolerance) {
        self.clipped = boundary.clip(&self.segment(), tolerance);
    }

    /// The visible part of the edge after clipping, including degenerate (single point) results.
    pub fn clipped(&self) -> Option<Line> {
        self.clipped
    }

    /// The visible part of the edge, if it has one with non-coincident endpoints.
    pub fn voronoi_edge(&self, tolerance: &Tolerance) -> Option<Line> {
        self.clipped.filter(|line| !line.is_degenerate(tolerance.point))
    }

    pub fn is_visible(&self, tolerance: &Tolerance) -> bool {
        self.voronoi_edge(tolerance).is_some()
    }

    /// The Delaunay edge dual to this edge, from the left site to the right site.
    pub fn delaunay_line(&self, sites: &[Site]) -> Line {
        Line::new(sites[self.left as usize].point, sites[self.right as usize].point)
    }

    pub fn dual(&self, sites: &[Site], tolerance: &Tolerance) -> Node {
        Node {
            delaunay: self.delaunay_line(sites),
            voronoi: self.voronoi_edge(tolerance),
        }
    }
}
