//! The beachline: the half-edges crossing the sweep line, ordered from left to right.

use std::ops::{Index, IndexMut};

use crate::event_queue::TransformedVertex;
use crate::graph::{Edge, EdgeIdx, Side};
use crate::site::Site;
use crate::Point;

pub type HalfedgeIdx = u32;

/// The one-directional trace of an edge. The beachline has two of these for each growing edge,
/// one facing each way.
#[derive(Clone, Debug, PartialEq)]
pub struct Halfedge {
    /// The traced edge and the side of it this half-edge faces. `None` for the sentinels.
    pub edge: Option<(EdgeIdx, Side)>,
    pub left: Option<HalfedgeIdx>,
    pub right: Option<HalfedgeIdx>,
    /// Set exactly while the half-edge has a pending circle event.
    pub vertex: Option<TransformedVertex>,
}
impl Halfedge {
    fn sentinel() -> Self {
        Self {
            edge: None,
            left: None,
            right: None,
            vertex: None,
        }
    }

    #[cfg(test)]
    pub fn is_sentinel(&self) -> bool {
        self.edge.is_none()
    }
}

/// A doubly linked list of half-edges, stored in an arena.
///
/// The list always starts and ends with a sentinel half-edge that has no edge. Removed half-edges
/// stay in the arena, unlinked, so indices are never reused.
#[derive(Clone, Debug)]
pub struct Beachline {
    halfedges: Vec<Halfedge>,
}
impl Beachline {
    pub const LEFT_END: HalfedgeIdx = 0;
    pub const RIGHT_END: HalfedgeIdx = 1;

    pub fn new() -> Self {
        let mut left_end = Halfedge::sentinel();
        let mut right_end = Halfedge::sentinel();
        left_end.right = Some(Self::RIGHT_END);
        right_end.left = Some(Self::LEFT_END);
        Self {
            halfedges: vec![left_end, right_end],
        }
    }

    /// Allocate a half-edge, not yet linked into the beachline.
    pub fn new_halfedge(&mut self, edge: EdgeIdx, side: Side) -> HalfedgeIdx {
        let idx = self.halfedges.len() as HalfedgeIdx;
        self.halfedges.push(Halfedge {
            edge: Some((edge, side)),
            left: None,
            right: None,
            vertex: None,
        });
        idx
    }

    /// Link `halfedge` immediately to the right of `right_of`.
    pub fn insert(&mut self, halfedge: HalfedgeIdx, right_of: HalfedgeIdx) {
        let next = self[right_of].right;
        self[halfedge].left = Some(right_of);
        self[halfedge].right = next;
        if let Some(next) = next {
            self[next].left = Some(halfedge);
        }
        self[right_of].right = Some(halfedge);
    }

    /// Unlink `halfedge`, joining its neighbors.
    pub fn remove(&mut self, halfedge: HalfedgeIdx) {
        let left = self[halfedge].left.take();
        let right = self[halfedge].right.take();
        if let Some(left) = left {
            self[left].right = right;
        }
        if let Some(right) = right {
            self[right].left = left;
        }
    }

    /// The linked half-edges, from left to right, sentinels excluded.
    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = HalfedgeIdx> + '_ {
        std::iter::successors(self[Self::LEFT_END].right, move |&h| self[h].right)
            .take_while(|&h| h != Self::RIGHT_END)
    }

    /// The half-edge immediately to the left of `point`: the last one, scanning from the left end,
    /// that `point` is to the right of.
    pub fn left_neighbor(&self, point: Point, edges: &[Edge], sites: &[Site]) -> HalfedgeIdx {
        let mut current = Self::LEFT_END;
        while current != Self::RIGHT_END && self.is_left_of(current, point, edges, sites) {
            match self[current].right {
                Some(right) => current = right,
                None => break,
            }
        }
        self[current].left.unwrap_or(Self::LEFT_END)
    }

    /// Return if `halfedge` is to the left of `point`, that is, if `point` is in the region to the
    /// right of the parabolic arc the half-edge traces.
    ///
    /// Sentinels are to the left of every point.
    pub fn is_left_of(
        &self,
        halfedge: HalfedgeIdx,
        point: Point,
        edges: &[Edge],
        sites: &[Site],
    ) -> bool {
        let Some((edge, side)) = self[halfedge].edge else {
            return true;
        };
        let edge = &edges[edge as usize];
        let top = sites[edge.right as usize].point;
        let eq = edge.equation;

        let right_of_site = point.x > top.x;
        if right_of_site && side == Side::Left {
            return true;
        }
        if !right_of_site && side == Side::Right {
            return false;
        }

        let above = if eq.is_x_unit() {
            let dyp = point.y - top.y;
            let dxp = point.x - top.x;

            let mut fast = false;
            let mut above;
            if (!right_of_site && eq.b < 0.0) || (right_of_site && eq.b >= 0.0) {
                above = dyp >= eq.b * dxp;
                fast = above;
            } else {
                above = point.x + point.y * eq.b > eq.c;
                if eq.b < 0.0 {
                    above = !above;
                }
                if !above {
                    fast = true;
                }
            }

            if !fast {
                let dxs = top.x - sites[edge.left as usize].point.x;
                above = eq.b * (dxp * dxp - dyp * dyp)
                    < dxs * dyp * (1.0 + 2.0 * dxp / dxs + eq.b * eq.b);
                if eq.b < 0.0 {
                    above = !above;
                }
            }
            above
        } else {
            // y = c - ax
            let yl = eq.c - eq.a * point.x;
            let t1 = point.y - yl;
            let t2 = point.x - top.x;
            let t3 = yl - top.y;
            t1 * t1 > t2 * t2 + t3 * t3
        };

        match side {
            Side::Left => above,
            Side::Right => !above,
        }
    }

    /// The point where the edges of the two half-edges meet, if it is in the direction both of
    /// them grow.
    ///
    /// The direction is checked against the half-edge whose edge has the lower right site, in
    /// sweep order.
    pub fn intersects(
        &self,
        he0: HalfedgeIdx,
        he1: HalfedgeIdx,
        edges: &[Edge],
        sites: &[Site],
        parallel_eps: f64,
    ) -> Option<Point> {
        let (e0, side0) = self[he0].edge?;
        let (e1, side1) = self[he1].edge?;
        let (e0, e1) = (&edges[e0 as usize], &edges[e1 as usize]);

        if e0.right == e1.right {
            return None;
        }

        let intersection = e0.equation.intersection(&e1.equation, parallel_eps)?;

        let r0 = sites[e0.right as usize].point;
        let r1 = sites[e1.right as usize].point;
        let (reference, side) = if r1.precedes(r0) {
            (r1, side1)
        } else {
            (r0, side0)
        };

        let right_of_site = intersection.x >= reference.x;
        if (right_of_site && side == Side::Left) || (!right_of_site && side == Side::Right) {
            return None;
        }

        Some(intersection)
    }
}
impl Index<HalfedgeIdx> for Beachline {
    type Output = Halfedge;

    fn index(&self, idx: HalfedgeIdx) -> &Halfedge {
        &self.halfedges[idx as usize]
    }
}
impl IndexMut<HalfedgeIdx> for Beachline {
    fn index_mut(&mut self, idx: HalfedgeIdx) -> &mut Halfedge {
        &mut self.halfedges[idx as usize]
    }
}
