use std::cmp::Ordering;

use crate::beachline::{Beachline, HalfedgeIdx};
use crate::heap::Heap;
use crate::Point;

/// A candidate Voronoi vertex, together with its y coordinate mapped by `*`: the y of the top of
/// the circle through the vertex and its sites.
///
/// That is the sweep position at which the vertex is discovered, so circle events are ordered by
/// it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformedVertex {
    pub point: Point,
    pub y_star: f64,
}
impl TransformedVertex {
    /// Map `vertex` relative to `site`, one of the sites equidistant to it.
    pub fn new(vertex: Point, site: Point) -> Self {
        Self {
            point: vertex,
            y_star: vertex.y + vertex.distance(site),
        }
    }

    /// The vertex in the coordinates of the sweep: its x, and its mapped y.
    pub fn sweep_point(&self) -> Point {
        Point::new(self.point.x, self.y_star)
    }
}

#[derive(Clone, Copy, Debug)]
struct QueueEntry {
    halfedge: HalfedgeIdx,
    vertex: TransformedVertex,
}

fn cmp_entries(a: &QueueEntry, b: &QueueEntry) -> Ordering {
    a.vertex
        .y_star
        .total_cmp(&b.vertex.y_star)
        .then_with(|| a.vertex.point.x.total_cmp(&b.vertex.point.x))
}

/// The pending circle events, keyed by half-edge.
///
/// A half-edge is in the queue exactly when its `vertex` is set: inserting sets it, and both
/// removing and popping clear it.
#[derive(Debug)]
pub struct EventQueue {
    heap: Heap<QueueEntry, fn(&QueueEntry, &QueueEntry) -> Ordering>,
}
impl EventQueue {
    pub fn new() -> Self {
        Self {
            heap: Heap::new(cmp_entries as fn(&QueueEntry, &QueueEntry) -> Ordering),
        }
    }

    /// Schedule a circle event for `halfedge`, at the vertex where it meets a neighbor.
    pub fn insert(
        &mut self,
        beachline: &mut Beachline,
        halfedge: HalfedgeIdx,
        vertex: TransformedVertex,
    ) {
        debug_assert!(beachline[halfedge].vertex.is_none());
        beachline[halfedge].vertex = Some(vertex);
        self.heap.push(QueueEntry { halfedge, vertex });
    }

    /// Cancel the circle event of `halfedge`, if it has one.
    pub fn remove(&mut self, beachline: &mut Beachline, halfedge: HalfedgeIdx) {
        if beachline[halfedge].vertex.take().is_some() {
            self.heap.remove(|e| e.halfedge == halfedge);
        }
    }

    /// Remove the earliest circle event.
    pub fn pop(&mut self, beachline: &mut Beachline) -> Option<(HalfedgeIdx, TransformedVertex)> {
        let entry = self.heap.pop()?;
        beachline[entry.halfedge].vertex = None;
        Some((entry.halfedge, entry.vertex))
    }

    #[allow(dead_code)]
    pub fn peek(&self) -> Option<HalfedgeIdx> {
        self.heap.peek().map(|e| e.halfedge)
    }

    /// The actual location of the earliest vertex.
    #[allow(dead_code)]
    pub fn min_point(&self) -> Option<Point> {
        self.heap.peek().map(|e| e.vertex.point)
    }

    /// The earliest vertex in sweep coordinates, which is what is compared against the next site.
    pub fn min_sweep_point(&self) -> Option<Point> {
        self.heap.peek().map(|e| e.vertex.sweep_point())
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Side;
    use crate::site::Site;

    struct Fixture {
        beachline: Beachline,
        queue: EventQueue,
        left: HalfedgeIdx,
        right: HalfedgeIdx,
        sites: Vec<Site>,
    }

    /// Both half-edges of the edge between (0, 0) and (10, 10), and a circle event at (0, 10) for
    /// the left one.
    fn fixture() -> Fixture {
        let sites = vec![
            Site::new(Point::new(0.0, 0.0)),
            Site::new(Point::new(10.0, 10.0)),
        ];
        let mut beachline = Beachline::new();
        let left = beachline.new_halfedge(0, Side::Left);
        let right = beachline.new_halfedge(0, Side::Right);

        let mut queue = EventQueue::new();
        let vertex = TransformedVertex::new(Point::new(0.0, 10.0), sites[0].point);
        queue.insert(&mut beachline, left, vertex);

        Fixture {
            beachline,
            queue,
            left,
            right,
            sites,
        }
    }

    #[test]
    fn transformed_vertex() {
        let vertex = TransformedVertex::new(Point::new(0.0, 10.0), Point::new(0.0, 0.0));
        assert_eq!(vertex.y_star, 20.0);
        assert_eq!(vertex.sweep_point(), Point::new(0.0, 20.0));
        assert_eq!(vertex.point, Point::new(0.0, 10.0));
    }

    #[test]
    fn remove() {
        let mut f = fixture();
        assert!(f.beachline[f.left].vertex.is_some());

        f.queue.remove(&mut f.beachline, f.left);
        assert!(f.queue.is_empty());
        assert!(f.beachline[f.left].vertex.is_none());

        // removing again, or removing something never inserted, is a no-op.
        f.queue.remove(&mut f.beachline, f.left);
        f.queue.remove(&mut f.beachline, f.right);
        assert!(f.queue.is_empty());
    }

    #[test]
    fn pop_and_peek() {
        let mut f = fixture();

        assert_eq!(f.queue.peek(), Some(f.left));
        assert!(!f.queue.is_empty());

        let (popped, vertex) = f.queue.pop(&mut f.beachline).unwrap();
        assert_eq!(popped, f.left);
        assert_eq!(vertex.point, Point::new(0.0, 10.0));
        assert!(f.beachline[f.left].vertex.is_none());
        assert!(f.queue.is_empty());
        assert_eq!(f.queue.pop(&mut f.beachline), None);
    }

    #[test]
    fn order_on_inserts_and_removes() {
        let mut f = fixture();
        let first = f.beachline[f.left].vertex.unwrap();

        let vertex = TransformedVertex::new(Point::new(10.0, 6.0), f.sites[1].point);
        f.queue.insert(&mut f.beachline, f.right, vertex);
        assert_eq!(f.queue.len(), 2);

        assert_eq!(f.queue.min_sweep_point(), Some(vertex.sweep_point()));
        assert_eq!(f.queue.min_point(), Some(Point::new(10.0, 6.0)));

        f.queue.pop(&mut f.beachline);

        assert_eq!(f.queue.min_sweep_point(), Some(first.sweep_point()));
    }

    #[test]
    fn ties_break_on_x() {
        let mut f = fixture();
        f.queue.remove(&mut f.beachline, f.left);

        // both have y* = 10
        let a = TransformedVertex::new(Point::new(4.0, 5.0), Point::new(4.0, 0.0));
        let b = TransformedVertex::new(Point::new(2.0, 5.0), Point::new(2.0, 0.0));
        f.queue.insert(&mut f.beachline, f.left, a);
        f.queue.insert(&mut f.beachline, f.right, b);

        assert_eq!(f.queue.pop(&mut f.beachline).map(|(h, _)| h), Some(f.right));
        assert_eq!(f.queue.pop(&mut f.beachline).map(|(h, _)| h), Some(f.left));
    }
}
