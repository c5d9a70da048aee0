//! Rebuilding the polygon of a single cell from its clipped edges and the boundary.

use tracing::warn;

use crate::boundary::{Boundary, ConvexPolygon};
use crate::config::Tolerance;
use crate::geometry::Line;
use crate::Point;

type Chain = Vec<Line>;

/// The cell of the site at `site`, given the visible part of every edge of the site.
///
/// The edges are joined into chains by shared endpoints, each chain oriented counter-clockwise
/// around the site. A closed chain is the cell. Otherwise the chains are joined by walking the
/// boundary counter-clockwise from the end of one chain to the start of the next, adding the
/// corners in between.
pub fn cell<B: Boundary + ?Sized>(
    site: Point,
    edges: Vec<Line>,
    boundary: &B,
    tolerance: &Tolerance,
) -> ConvexPolygon {
    if edges.is_empty() {
        return ConvexPolygon::from_lines(boundary.borders());
    }

    let eps = tolerance.point;
    let voronoi_edges = edges.clone();

    let mut chains = chain(edges, eps);
    for chain in &mut chains {
        orient_ccw(chain, site);
    }

    if chains.len() == 1 && is_closed(&chains[0], eps) {
        return ConvexPolygon::from_lines(chains.remove(0));
    }

    let borders = boundary.borders();
    let lines = Stitcher {
        site,
        voronoi_edges: &voronoi_edges,
        borders: &borders,
        tolerance,
    }
    .stitch(chains);

    ConvexPolygon::from_lines(lines)
}

/// Join the lines into chains, where each line starts where the previous one ends. Lines are
/// reversed as needed.
fn chain(mut queue: Vec<Line>, eps: f64) -> Vec<Chain> {
    let mut chains = Vec::new();

    while let Some(first) = queue.pop() {
        let mut chain = vec![first];
        loop {
            let start = chain[0].p0;
            let end = chain[chain.len() - 1].p1;

            let Some(i) = queue.iter().position(|l| {
                l.p0.approx_eq(end, eps)
                    || l.p1.approx_eq(end, eps)
                    || l.p0.approx_eq(start, eps)
                    || l.p1.approx_eq(start, eps)
            }) else {
                break;
            };
            let line = queue.swap_remove(i);

            if line.p0.approx_eq(end, eps) {
                chain.push(line);
            } else if line.p1.approx_eq(end, eps) {
                chain.push(line.reversed());
            } else if line.p1.approx_eq(start, eps) {
                chain.insert(0, line);
            } else {
                chain.insert(0, line.reversed());
            }
        }
        chains.push(chain);
    }

    chains
}

/// Reverse `chain` if it turns clockwise around `site`.
fn orient_ccw(chain: &mut Chain, site: Point) {
    let winding: f64 = chain
        .iter()
        .map(|l| (l.p0 - site).perp_dot(l.p1 - site))
        .sum();
    if winding < 0.0 {
        chain.reverse();
        for line in chain.iter_mut() {
            *line = line.reversed();
        }
    }
}

fn is_closed(chain: &Chain, eps: f64) -> bool {
    chain.len() >= 3 && chain[chain.len() - 1].p1.approx_eq(chain[0].p0, eps)
}

struct Stitcher<'a> {
    site: Point,
    voronoi_edges: &'a [Line],
    borders: &'a [Line],
    tolerance: &'a Tolerance,
}
impl Stitcher<'_> {
    fn stitch(&self, mut chains: Vec<Chain>) -> Vec<Line> {
        let eps = self.tolerance.point;

        let mut lines = chains.remove(0);
        let first = lines[0].p0;
        let mut end = lines[lines.len() - 1].p1;

        let mut position = self.locate(end);
        let max_steps = 2 * (self.borders.len() + chains.len()) + 2;

        for _ in 0..max_steps {
            let Some((border, t)) = position else {
                // not on the boundary, so go straight to the closest start.
                match self.closest(end, first, &chains) {
                    Some(i) => {
                        let chain = chains.swap_remove(i);
                        push_line(&mut lines, end, chain[0].p0, eps);
                        end = chain[chain.len() - 1].p1;
                        lines.extend(chain);
                        position = self.locate(end);
                        continue;
                    }
                    None => {
                        push_line(&mut lines, end, first, eps);
                        return lines;
                    }
                }
            };

            match self.next_on_border(border, t, first, &chains) {
                Some(Next::First) => {
                    push_line(&mut lines, end, first, eps);
                    return lines;
                }
                Some(Next::Chain(i)) => {
                    let chain = chains.swap_remove(i);
                    push_line(&mut lines, end, chain[0].p0, eps);
                    end = chain[chain.len() - 1].p1;
                    lines.extend(chain);
                    position = self.locate(end);
                }
                None => {
                    let corner = self.borders[border].p1;
                    if self.sees(corner) {
                        push_line(&mut lines, end, corner, eps);
                        end = corner;
                        position = Some(((border + 1) % self.borders.len(), 0.0));
                    } else {
                        warn!(
                            "corner {:?} is hidden from site {:?}, closing the cell directly",
                            corner, self.site
                        );
                        position = None;
                    }
                }
            }
        }

        warn!("could not stitch the cell of {:?} to the boundary", self.site);
        push_line(&mut lines, end, first, eps);
        lines
    }

    /// The border `point` is on, and the parameter of `point` along it.
    fn locate(&self, point: Point) -> Option<(usize, f64)> {
        let eps = self.tolerance.point;
        self.borders
            .iter()
            .position(|b| crate::geometry::on_segment(point, b, eps))
            .map(|i| (i, self.borders[i].param_of(point)))
    }

    /// The first chain start, or the start of the cell, found going forward along `border` from
    /// the parameter `t`.
    fn next_on_border(&self, border: usize, t: f64, first: Point, chains: &[Chain]) -> Option<Next> {
        let eps = self.tolerance.point;
        let line = &self.borders[border];
        let slack = eps / line.length().max(eps);

        let ahead = |p: Point| -> Option<f64> {
            if !crate::geometry::on_segment(p, line, eps) {
                return None;
            }
            let s = line.param_of(p);
            (s >= t - slack).then_some(s)
        };

        let mut best: Option<(f64, Next)> = ahead(first).map(|s| (s, Next::First));
        for (i, chain) in chains.iter().enumerate() {
            if let Some(s) = ahead(chain[0].p0) {
                if best.as_ref().map_or(true, |&(b, _)| s < b) {
                    best = Some((s, Next::Chain(i)));
                }
            }
        }
        best.map(|(_, next)| next)
    }

    /// The index of the chain starting closest to `point`, or `None` if `first` is closer than
    /// all of them.
    fn closest(&self, point: Point, first: Point, chains: &[Chain]) -> Option<usize> {
        let mut best = point.distance(first);
        let mut found = None;
        for (i, chain) in chains.iter().enumerate() {
            let d = point.distance(chain[0].p0);
            if d < best {
                best = d;
                found = Some(i);
            }
        }
        found
    }

    /// Return if the line from the site to `corner` crosses none of the site's Voronoi edges.
    fn sees(&self, corner: Point) -> bool {
        let eps = self.tolerance.point;
        let sight = Line::new(self.site, corner);
        if sight.is_degenerate(eps) {
            return true;
        }
        !self
            .voronoi_edges
            .iter()
            .any(|e| e.intersects(&sight) && e.crosses(&sight, eps))
    }
}

enum Next {
    First,
    Chain(usize),
}

fn push_line(lines: &mut Vec<Line>, from: Point, to: Point, eps: f64) {
    let line = Line::new(from, to);
    if !line.is_degenerate(eps) {
        lines.push(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::Rect;

    fn line(a: (f64, f64), b: (f64, f64)) -> Line {
        Line::new(Point::new(a.0, a.1), Point::new(b.0, b.1))
    }

    fn assert_cell(polygon: &ConvexPolygon, expected: &[(f64, f64)]) {
        let vertices = polygon.vertices();
        assert_eq!(vertices.len(), expected.len(), "{:?}", vertices);

        // same cyclic sequence, from whichever vertex comes first
        let start = vertices
            .iter()
            .position(|v| v.approx_eq(Point::new(expected[0].0, expected[0].1), 1e-9))
            .expect("first vertex missing");
        for (i, &(x, y)) in expected.iter().enumerate() {
            let v = vertices[(start + i) % vertices.len()];
            assert!(v.approx_eq(Point::new(x, y), 1e-9), "{:?} != {:?}", v, (x, y));
        }
        assert!(polygon.is_ccw());
        assert!(polygon.is_closed(1e-9));
    }

    #[test]
    fn chains_reverse_lines() {
        let lines = vec![
            line((0.0, 0.0), (1.0, 0.0)),
            line((2.0, 1.0), (1.0, 0.0)),
            line((5.0, 5.0), (6.0, 6.0)),
        ];
        let mut chains = chain(lines, 1e-9);
        chains.sort_by_key(|c| c.len());

        assert_eq!(chains.len(), 2);
        assert_eq!(chains[0], vec![line((5.0, 5.0), (6.0, 6.0))]);
        assert_eq!(chains[1].len(), 2);
        assert_eq!(chains[1][0].p1, chains[1][1].p0);
    }

    #[test]
    fn orients_around_site() {
        let mut chain = vec![line((1.0, 1.0), (-1.0, 1.0)), line((-1.0, 1.0), (-1.0, -1.0))];
        orient_ccw(&mut chain, Point::ZERO);
        assert_eq!(chain[0], line((1.0, 1.0), (-1.0, 1.0)));

        orient_ccw(&mut chain, Point::new(0.0, 5.0));
        assert_eq!(
            chain,
            vec![line((-1.0, -1.0), (-1.0, 1.0)), line((-1.0, 1.0), (1.0, 1.0))]
        );
    }

    #[test]
    fn no_edges_is_whole_boundary() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let polygon = cell(Point::new(5.0, 5.0), vec![], &rect, &Tolerance::default());
        assert_eq!(polygon, ConvexPolygon::from_rect(rect));
    }

    #[test]
    fn half_plane() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let t = Tolerance::default();
        let edge = line((5.0, 0.0), (5.0, 10.0));

        let left = cell(Point::new(2.0, 5.0), vec![edge], &rect, &t);
        assert_cell(&left, &[(5.0, 10.0), (0.0, 10.0), (0.0, 0.0), (5.0, 0.0)]);

        let right = cell(Point::new(8.0, 5.0), vec![edge], &rect, &t);
        assert_cell(&right, &[(5.0, 0.0), (10.0, 0.0), (10.0, 10.0), (5.0, 10.0)]);
    }

    #[test]
    fn corner_cut() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let t = Tolerance::default();
        let edge = line((0.0, 5.0), (5.0, 0.0));

        // the small triangle, closed directly along the corner
        let corner = cell(Point::new(1.0, 1.0), vec![edge], &rect, &t);
        assert_cell(&corner, &[(0.0, 0.0), (5.0, 0.0), (0.0, 5.0)]);

        // everything else
        let rest = cell(Point::new(6.0, 6.0), vec![edge], &rect, &t);
        assert_cell(
            &rest,
            &[(5.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 5.0)],
        );
    }

    #[test]
    fn strip_between_two_chains() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let t = Tolerance::default();
        let edges = vec![line((3.0, 0.0), (3.0, 10.0)), line((7.0, 10.0), (7.0, 0.0))];

        let strip = cell(Point::new(5.0, 5.0), edges, &rect, &t);
        assert_cell(&strip, &[(3.0, 0.0), (7.0, 0.0), (7.0, 10.0), (3.0, 10.0)]);
    }

    #[test]
    fn closed_interior_chain() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let t = Tolerance::default();
        let edges = vec![
            line((4.0, 4.0), (6.0, 4.0)),
            line((5.0, 6.0), (6.0, 4.0)),
            line((4.0, 4.0), (5.0, 6.0)),
        ];

        let triangle = cell(Point::new(5.0, 5.0), edges, &rect, &t);
        assert_cell(&triangle, &[(4.0, 4.0), (6.0, 4.0), (5.0, 6.0)]);
    }
}
