//! Input sites, deduplicated and sorted in sweep order.

use std::collections::HashMap;

use crate::graph::EdgeIdx;
use crate::Point;

pub type SiteIdx = u32;

/// A site of the diagram: an input point and the edges that border its cell.
///
/// Sites are identified by their index in the registry, never by their coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Site {
    pub point: Point,
    /// Every edge created with this site as one of its two sides, in creation order. Only ever
    /// appended to.
    pub edges: Vec<EdgeIdx>,
}
impl Site {
    pub fn new(point: Point) -> Self {
        Self {
            point,
            edges: Vec::new(),
        }
    }
}

/// The sites of a diagram, deduplicated by exact coordinate and sorted in sweep order (ascending
/// y, then ascending x). The sweep consumes them in order with [`SiteList::peek`] and
/// [`SiteList::pop`].
#[derive(Clone, Debug)]
pub struct SiteList {
    sites: Vec<Site>,
    locations: HashMap<Point, SiteIdx>,
    current: usize,
}
impl SiteList {
    pub fn new(points: &[Point]) -> Self {
        let mut unique = points.to_vec();
        unique.sort();
        unique.dedup();

        let sites: Vec<Site> = unique.into_iter().map(Site::new).collect();
        let locations = sites
            .iter()
            .enumerate()
            .map(|(i, s)| (s.point, i as SiteIdx))
            .collect();

        Self {
            sites,
            locations,
            current: 0,
        }
    }

    /// The next site of the sweep, without consuming it.
    pub fn peek(&self) -> Option<SiteIdx> {
        (self.current < self.sites.len()).then_some(self.current as SiteIdx)
    }

    pub fn pop(&mut self) -> Option<SiteIdx> {
        let next = self.peek()?;
        self.current += 1;
        Some(next)
    }

    /// The site at exactly `point`, if any.
    pub fn site_at(&self, point: Point) -> Option<SiteIdx> {
        self.locations.get(&point).copied()
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    pub fn point(&self, idx: SiteIdx) -> Point {
        self.sites[idx as usize].point
    }

    pub fn as_slice(&self) -> &[Site] {
        &self.sites
    }

    pub fn into_sites(self) -> Vec<Site> {
        self.sites
    }

    pub(crate) fn add_edge(&mut self, idx: SiteIdx, edge: EdgeIdx) {
        self.sites[idx as usize].edges.push(edge);
    }
}
impl std::ops::Index<SiteIdx> for SiteList {
    type Output = Site;

    fn index(&self, idx: SiteIdx) -> &Site {
        &self.sites[idx as usize]
    }
}
