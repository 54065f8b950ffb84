use std::collections::HashSet;

use crate::graph::{WallGraph, WallPointId};

/// Depth-first search for a simple cycle through eligible points.
///
/// Only walls and dividers are followed. The first cycle found wins; it is
/// not necessarily the smallest or the outer one, and which one is found
/// depends on edge insertion order.
struct LoopSearch<'a> {
    graph: &'a WallGraph,
    eligible: &'a HashSet<WallPointId>,
    start: WallPointId,
    /// Only accept cycles visiting every eligible point.
    covering: bool,
}

impl LoopSearch<'_> {
    fn run(&self) -> Option<Vec<WallPointId>> {
        let mut path = vec![self.start];
        self.extend(self.start, &mut path)
    }

    fn extend(&self, current: WallPointId, path: &mut Vec<WallPointId>) -> Option<Vec<WallPointId>> {
        let edges = self.graph.incident_edges(current).ok()?;
        for &e in edges {
            let Ok(edge) = self.graph.edge(e) else {
                continue;
            };
            if !edge.kind.bounds_rooms() {
                continue;
            }
            let Some(next) = edge.other(current) else {
                continue;
            };
            if next == self.start {
                if path.len() >= 3 && (!self.covering || path.len() == self.eligible.len()) {
                    return Some(path.clone());
                }
                continue;
            }
            if self.eligible.contains(&next) && !path.contains(&next) {
                path.push(next);
                if let Some(found) = self.extend(next, path) {
                    return Some(found);
                }
                path.pop();
            }
        }
        None
    }
}

/// Looks for any simple cycle of at least three points that starts and ends
/// at `start` and otherwise only visits points in `eligible`.
///
/// Returns the cycle as an ordered boundary walk beginning with `start`.
#[must_use]
pub fn attempt_loop(
    graph: &WallGraph,
    start: WallPointId,
    eligible: &HashSet<WallPointId>,
) -> Option<Vec<WallPointId>> {
    LoopSearch {
        graph,
        eligible,
        start,
        covering: false,
    }
    .run()
}

/// Like [`attempt_loop`], but only accepts a cycle through every point in
/// `eligible` (which must contain `start`).
#[must_use]
pub fn attempt_covering_loop(
    graph: &WallGraph,
    start: WallPointId,
    eligible: &HashSet<WallPointId>,
) -> Option<Vec<WallPointId>> {
    LoopSearch {
        graph,
        eligible,
        start,
        covering: true,
    }
    .run()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::graph::EdgeKind;
    use crate::math::Point2;

    fn ring(g: &mut WallGraph, n: usize) -> Vec<WallPointId> {
        let pts: Vec<_> = (0..n)
            .map(|i| {
                let a = std::f64::consts::TAU * i as f64 / n as f64;
                g.add_point(Point2::new(100.0 * a.cos(), 100.0 * a.sin()))
            })
            .collect();
        for i in 0..n {
            g.add_edge(pts[i], pts[(i + 1) % n], EdgeKind::wall(10.0))
                .unwrap();
        }
        pts
    }

    #[test]
    fn finds_full_ring() {
        for n in 3..8 {
            let mut g = WallGraph::new();
            let pts = ring(&mut g, n);
            let eligible: HashSet<_> = pts.iter().copied().collect();
            for &start in &pts {
                let found = attempt_loop(&g, start, &eligible).unwrap();
                assert_eq!(found.len(), n);
                assert_eq!(found[0], start);
                // Consecutive points are joined by edges.
                for i in 0..n {
                    assert!(g.edge_between(found[i], found[(i + 1) % n]).is_some());
                }
            }
        }
    }

    #[test]
    fn open_chain_has_no_loop() {
        let mut g = WallGraph::new();
        let a = g.add_point(Point2::new(0.0, 0.0));
        let b = g.add_point(Point2::new(100.0, 0.0));
        let c = g.add_point(Point2::new(100.0, 100.0));
        g.add_edge(a, b, EdgeKind::wall(10.0)).unwrap();
        g.add_edge(b, c, EdgeKind::wall(10.0)).unwrap();
        let eligible: HashSet<_> = [a, b, c].into_iter().collect();
        for start in [a, b, c] {
            assert!(attempt_loop(&g, start, &eligible).is_none());
        }
    }

    #[test]
    fn ineligible_points_block_the_cycle() {
        let mut g = WallGraph::new();
        let pts = ring(&mut g, 4);
        let eligible: HashSet<_> = pts[..3].iter().copied().collect();
        assert!(attempt_loop(&g, pts[0], &eligible).is_none());
    }

    #[test]
    fn measurements_are_not_followed() {
        let mut g = WallGraph::new();
        let a = g.add_point(Point2::new(0.0, 0.0));
        let b = g.add_point(Point2::new(100.0, 0.0));
        let c = g.add_point(Point2::new(100.0, 100.0));
        g.add_edge(a, b, EdgeKind::wall(10.0)).unwrap();
        g.add_edge(b, c, EdgeKind::Divider).unwrap();
        g.add_edge(c, a, EdgeKind::Measurement).unwrap();
        let eligible: HashSet<_> = [a, b, c].into_iter().collect();
        assert!(attempt_loop(&g, a, &eligible).is_none());
    }

    #[test]
    fn parallel_edges_are_not_a_cycle() {
        let mut g = WallGraph::new();
        let a = g.add_point(Point2::new(0.0, 0.0));
        let b = g.add_point(Point2::new(100.0, 0.0));
        g.add_edge(a, b, EdgeKind::wall(10.0)).unwrap();
        g.add_edge(b, a, EdgeKind::Divider).unwrap();
        let eligible: HashSet<_> = [a, b].into_iter().collect();
        assert!(attempt_loop(&g, a, &eligible).is_none());
    }

    #[test]
    fn covering_search_skips_short_cycles() {
        // Square a-b-c-d with a chord a-c; the chord is found first.
        let mut g = WallGraph::new();
        let a = g.add_point(Point2::new(0.0, 0.0));
        let b = g.add_point(Point2::new(100.0, 0.0));
        let c = g.add_point(Point2::new(100.0, 100.0));
        let d = g.add_point(Point2::new(0.0, 100.0));
        g.add_edge(a, c, EdgeKind::Divider).unwrap();
        g.add_edge(a, b, EdgeKind::wall(10.0)).unwrap();
        g.add_edge(b, c, EdgeKind::wall(10.0)).unwrap();
        g.add_edge(c, d, EdgeKind::wall(10.0)).unwrap();
        g.add_edge(d, a, EdgeKind::wall(10.0)).unwrap();
        let eligible: HashSet<_> = [a, b, c, d].into_iter().collect();

        let first = attempt_loop(&g, a, &eligible).unwrap();
        assert_eq!(first.len(), 3);
        let full = attempt_covering_loop(&g, a, &eligible).unwrap();
        assert_eq!(full.len(), 4);
    }
}
