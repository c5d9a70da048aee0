use std::collections::HashSet;

use tracing::debug;

use crate::boundary::{Boundary, ConvexPolygon};
use crate::cell::cell;
use crate::config::Tolerance;
use crate::error::Result;
use crate::geometry::{Line, Node};
use crate::graph::Edge;
use crate::site::{Site, SiteList};
use crate::sweep::Sweep;
use crate::Point;

/// The Voronoi diagram of a set of sites, clipped to a boundary, and its dual Delaunay graph.
///
/// The diagram is computed on construction and never changes afterwards.
#[derive(Clone, Debug)]
pub struct Voronoi<B> {
    sites: SiteList,
    edges: Vec<Edge>,
    boundary: B,
    tolerance: Tolerance,
}
impl<B: Boundary> Voronoi<B> {
    /// Compute the diagram of `points`, with the default [`Tolerance`].
    ///
    /// Only points strictly inside the boundary become sites. Repeated points are merged.
    pub fn new(points: &[Point], boundary: B) -> Result<Self> {
        Self::with_tolerance(points, boundary, Tolerance::default())
    }

    pub fn with_tolerance(points: &[Point], boundary: B, tolerance: Tolerance) -> Result<Self> {
        tolerance.validate()?;

        let inside: Vec<Point> = points
            .iter()
            .copied()
            .filter(|&p| p.is_finite() && boundary.contains(p, &tolerance))
            .collect();
        if inside.len() < points.len() {
            debug!(
                "ignoring {} points not inside the boundary",
                points.len() - inside.len()
            );
        }

        let sites = SiteList::new(&inside);
        let (sites, edges) = match Sweep::new(sites, tolerance) {
            Some(sweep) => sweep.run(&boundary)?,
            None => (SiteList::new(&[]), Vec::new()),
        };

        Ok(Self {
            sites,
            edges,
            boundary,
            tolerance,
        })
    }

    /// Every Delaunay edge, paired with its dual Voronoi edge if that is visible.
    pub fn dual_graph(&self) -> Vec<Node> {
        self.edges
            .iter()
            .map(|e| e.dual(self.sites.as_slice(), &self.tolerance))
            .collect()
    }

    /// The visible, non-degenerate Voronoi edges.
    pub fn voronoi_edges(&self) -> Vec<Line> {
        self.edges
            .iter()
            .filter_map(|e| e.voronoi_edge(&self.tolerance))
            .collect()
    }

    pub fn delaunay_lines(&self) -> Vec<Line> {
        self.edges
            .iter()
            .map(|e| e.delaunay_line(self.sites.as_slice()))
            .collect()
    }

    /// The endpoints of the visible part of every edge of the site at `point`. Empty if there is
    /// no site at exactly `point`.
    pub fn region(&self, point: Point) -> HashSet<Point> {
        let Some(site) = self.sites.site_at(point) else {
            return HashSet::new();
        };
        self.sites[site]
            .edges
            .iter()
            .filter_map(|&e| self.edges[e as usize].clipped())
            .flat_map(|line| [line.p0, line.p1])
            .collect()
    }

    /// The cell of the site at `point`, including the parts of the boundary around it.
    ///
    /// Returns `None` if `point` is not inside the boundary, or is not exactly a site.
    pub fn cell(&self, point: Point) -> Option<ConvexPolygon> {
        if !self.boundary.contains(point, &self.tolerance) {
            return None;
        }
        let site = self.sites.site_at(point)?;
        Some(self.cell_of(&self.sites[site]))
    }

    /// The cell of every site, in the order of [`Voronoi::sites`].
    pub fn cells(&self) -> Vec<ConvexPolygon> {
        self.sites
            .as_slice()
            .iter()
            .map(|site| self.cell_of(site))
            .collect()
    }

    fn cell_of(&self, site: &Site) -> ConvexPolygon {
        let edges = site
            .edges
            .iter()
            .filter_map(|&e| self.edges[e as usize].voronoi_edge(&self.tolerance))
            .collect();
        cell(site.point, edges, &self.boundary, &self.tolerance)
    }

    /// The sites of the diagram, in sweep order.
    pub fn sites(&self) -> &[Site] {
        self.sites.as_slice()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn boundary(&self) -> &B {
        &self.boundary
    }

    pub fn tolerance(&self) -> &Tolerance {
        &self.tolerance
    }

    pub fn into_parts(self) -> (Vec<Site>, Vec<Edge>) {
        (self.sites.into_sites(), self.edges)
    }
}
