use std::collections::BTreeSet;

use crate::graph::{EdgeId, WallGraph, WallPointId};

/// The wall or divider joining a selection of exactly two distinct points.
///
/// Returns `None` for any other selection, or if the two points are not
/// joined by a wall or divider.
#[must_use]
pub fn single_edge_between(graph: &WallGraph, selection: &[WallPointId]) -> Option<EdgeId> {
    let distinct: BTreeSet<_> = selection.iter().copied().collect();
    let mut it = distinct.into_iter();
    let (Some(a), Some(b), None) = (it.next(), it.next(), it.next()) else {
        return None;
    };
    graph
        .incident_edges(a)
        .ok()?
        .iter()
        .copied()
        .find(|&e| {
            graph
                .edge(e)
                .is_ok_and(|d| d.kind.bounds_rooms() && d.other(a) == Some(b))
        })
}
