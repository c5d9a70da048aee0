//! Fortune's sweep, from the sorted sites to the edges of the diagram.

use tracing::{debug, trace};

use crate::beachline::{Beachline, HalfedgeIdx};
use crate::boundary::Boundary;
use crate::config::Tolerance;
use crate::error::{Result, VoronoiError};
use crate::event_queue::{EventQueue, TransformedVertex};
use crate::graph::{Edge, EdgeIdx, Side};
use crate::site::{SiteIdx, SiteList};
use crate::Point;

/// The state of a running sweep. Consumed by [`Sweep::run`].
pub struct Sweep {
    sites: SiteList,
    edges: Vec<Edge>,
    beachline: Beachline,
    queue: EventQueue,
    /// The first site in sweep order. It generates the arcs at both ends of the beachline.
    bottom_site: SiteIdx,
    tolerance: Tolerance,
}
impl Sweep {
    /// Start a sweep over `sites`, or return `None` if there are no sites.
    pub fn new(mut sites: SiteList, tolerance: Tolerance) -> Option<Self> {
        let bottom_site = sites.pop()?;
        Some(Self {
            sites,
            edges: Vec::new(),
            beachline: Beachline::new(),
            queue: EventQueue::new(),
            bottom_site,
            tolerance,
        })
    }

    /// Process every event, then clip the resulting edges against `boundary`.
    pub fn run<B: Boundary + ?Sized>(mut self, boundary: &B) -> Result<(SiteList, Vec<Edge>)> {
        let mut site_events = 0usize;
        let mut circle_events = 0usize;

        loop {
            let next_site = self.sites.peek().map(|s| self.sites.point(s));
            let next_circle = self.queue.min_sweep_point();

            match (next_site, next_circle) {
                (Some(site), Some(circle)) if site.precedes(circle) => {
                    self.site_event()?;
                    site_events += 1;
                }
                (Some(_), None) => {
                    self.site_event()?;
                    site_events += 1;
                }
                (_, Some(_)) => {
                    self.circle_event()?;
                    circle_events += 1;
                }
                (None, None) => break,
            }
        }
        debug_assert!(self.queue.is_empty());

        for edge in &mut self.edges {
            edge.clip(boundary, &self.tolerance);
        }

        debug!(
            "sweep done: {} sites, {} edges, {} site events, {} circle events",
            self.sites.len(),
            self.edges.len(),
            site_events,
            circle_events
        );

        Ok((self.sites, self.edges))
    }

    fn site_event(&mut self) -> Result<()> {
        let site = self
            .sites
            .pop()
            .ok_or(VoronoiError::Invariant("site event without a pending site"))?;
        let point = self.sites.point(site);
        trace!("site event {:?}", point);

        let lbnd = self
            .beachline
            .left_neighbor(point, &self.edges, self.sites.as_slice());
        let rbnd = self.beachline[lbnd]
            .right
            .ok_or(VoronoiError::Invariant("left neighbor is not linked"))?;

        let bottom = self.right_region(lbnd);
        let edge = self.new_edge(bottom, site);

        let left = self.beachline.new_halfedge(edge, Side::Left);
        self.beachline.insert(left, lbnd);
        if let Some(vertex) = self.intersects(lbnd, left) {
            trace!("left intersection {:?}", vertex);
            self.queue.remove(&mut self.beachline, lbnd);
            self.queue.insert(
                &mut self.beachline,
                lbnd,
                TransformedVertex::new(vertex, point),
            );
        }

        let right = self.beachline.new_halfedge(edge, Side::Right);
        self.beachline.insert(right, left);
        if let Some(vertex) = self.intersects(right, rbnd) {
            trace!("right intersection {:?}", vertex);
            self.queue.insert(
                &mut self.beachline,
                right,
                TransformedVertex::new(vertex, point),
            );
        }

        Ok(())
    }

    fn circle_event(&mut self) -> Result<()> {
        let (lbnd, vertex) = self
            .queue
            .pop(&mut self.beachline)
            .ok_or(VoronoiError::Invariant("circle event without a pending event"))?;
        let point = vertex.point;
        trace!("circle event {:?}", point);

        let llbnd = self.beachline[lbnd]
            .left
            .ok_or(VoronoiError::Invariant("circle event on an unlinked half-edge"))?;
        let rbnd = self.beachline[lbnd]
            .right
            .ok_or(VoronoiError::Invariant("circle event on an unlinked half-edge"))?;
        let rrbnd = self.beachline[rbnd]
            .right
            .ok_or(VoronoiError::Invariant("right neighbor is not linked"))?;

        let (l_edge, l_side) = self.beachline[lbnd]
            .edge
            .ok_or(VoronoiError::Invariant("circle event on a sentinel"))?;
        let (r_edge, r_side) = self.beachline[rbnd]
            .edge
            .ok_or(VoronoiError::Invariant("circle event next to a sentinel"))?;

        let mut bottom = self.left_region(lbnd);
        let mut top = self.right_region(rbnd);

        self.edges[l_edge as usize].set_vertex(l_side, point);
        self.edges[r_edge as usize].set_vertex(r_side, point);

        self.queue.remove(&mut self.beachline, rbnd);
        self.beachline.remove(lbnd);
        self.beachline.remove(rbnd);

        let mut side = Side::Left;
        if self.sites.point(bottom).y > self.sites.point(top).y {
            std::mem::swap(&mut bottom, &mut top);
            side = Side::Right;
        }

        let edge = self.new_edge(bottom, top);
        let bisector = self.beachline.new_halfedge(edge, side);
        self.beachline.insert(bisector, llbnd);
        self.edges[edge as usize].set_vertex(side.opposite(), point);

        let bottom_point = self.sites.point(bottom);
        if let Some(vertex) = self.intersects(llbnd, bisector) {
            trace!("left intersection {:?}", vertex);
            self.queue.remove(&mut self.beachline, llbnd);
            self.queue.insert(
                &mut self.beachline,
                llbnd,
                TransformedVertex::new(vertex, bottom_point),
            );
        }
        if let Some(vertex) = self.intersects(bisector, rrbnd) {
            trace!("right intersection {:?}", vertex);
            self.queue.insert(
                &mut self.beachline,
                bisector,
                TransformedVertex::new(vertex, bottom_point),
            );
        }

        Ok(())
    }

    /// Create the edge between `left` and `right`, and register it on both sites.
    fn new_edge(&mut self, left: SiteIdx, right: SiteIdx) -> EdgeIdx {
        let idx = self.edges.len() as EdgeIdx;
        self.edges
            .push(Edge::new(self.sites.as_slice(), left, right));
        self.sites.add_edge(left, idx);
        self.sites.add_edge(right, idx);
        trace!(
            "new edge {} between {:?} and {:?}",
            idx,
            self.sites.point(left),
            self.sites.point(right)
        );
        idx
    }

    /// The site whose arc is to the left of `halfedge`.
    fn left_region(&self, halfedge: HalfedgeIdx) -> SiteIdx {
        match self.beachline[halfedge].edge {
            Some((edge, side)) => self.edges[edge as usize].site(side),
            None => self.bottom_site,
        }
    }

    /// The site whose arc is to the right of `halfedge`.
    fn right_region(&self, halfedge: HalfedgeIdx) -> SiteIdx {
        match self.beachline[halfedge].edge {
            Some((edge, side)) => self.edges[edge as usize].site(side.opposite()),
            None => self.bottom_site,
        }
    }

    fn intersects(&self, a: HalfedgeIdx, b: HalfedgeIdx) -> Option<Point> {
        self.beachline.intersects(
            a,
            b,
            &self.edges,
            self.sites.as_slice(),
            self.tolerance.parallel,
        )
    }
}
