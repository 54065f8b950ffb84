use std::collections::{HashMap, HashSet};

use crate::error::Result;
use crate::graph::{EdgeData, EdgeId, RoomData, RoomId, WallGraph, WallPartId, WallPointId};
use crate::math::Vector2;
use crate::operations::room::{attempt_covering_loop, RecomputeRoom};
use crate::operations::{Affected, Edit};

/// Old-to-new key maps produced by [`CopyFragment`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FragmentMap {
    pub points: HashMap<WallPointId, WallPointId>,
    pub edges: HashMap<EdgeId, EdgeId>,
    pub parts: HashMap<WallPartId, WallPartId>,
    pub rooms: HashMap<RoomId, RoomId>,
}

/// Duplicates a selection of the plan, translated by an offset.
///
/// Every copied reference is remapped to the copies. A selected edge brings
/// its endpoints along; a part is copied only with its wall, and a room only
/// when all its points are copied and the copied edges still close them
/// into one loop. Copied points left without an edge are discarded.
pub struct CopyFragment {
    points: Vec<WallPointId>,
    edges: Vec<EdgeId>,
    parts: Vec<WallPartId>,
    rooms: Vec<RoomId>,
    offset: Vector2,
}

impl CopyFragment {
    /// Creates a copy of nothing at offset `offset`.
    #[must_use]
    pub fn new(offset: Vector2) -> Self {
        Self {
            points: Vec::new(),
            edges: Vec::new(),
            parts: Vec::new(),
            rooms: Vec::new(),
            offset,
        }
    }

    #[must_use]
    pub fn with_points(mut self, points: impl IntoIterator<Item = WallPointId>) -> Self {
        self.points.extend(points);
        self
    }

    #[must_use]
    pub fn with_edges(mut self, edges: impl IntoIterator<Item = EdgeId>) -> Self {
        self.edges.extend(edges);
        self
    }

    #[must_use]
    pub fn with_parts(mut self, parts: impl IntoIterator<Item = WallPartId>) -> Self {
        self.parts.extend(parts);
        self
    }

    #[must_use]
    pub fn with_rooms(mut self, rooms: impl IntoIterator<Item = RoomId>) -> Self {
        self.rooms.extend(rooms);
        self
    }

    /// Executes the copy.
    ///
    /// # Errors
    ///
    /// Returns an error if any selected entity is missing. Nothing is copied
    /// in that case.
    pub fn execute(&self, graph: &mut WallGraph) -> Result<Edit<FragmentMap>> {
        // Resolve the selection before writing anything.
        let mut edges: Vec<(EdgeId, EdgeData)> = Vec::new();
        let mut edge_seen = HashSet::new();
        for &e in &self.edges {
            if edge_seen.insert(e) {
                edges.push((e, graph.edge(e)?.clone()));
            }
        }
        for &p in &self.parts {
            graph.part(p)?;
        }
        for &r in &self.rooms {
            graph.room(r)?;
        }

        // Only points that end up on a copied edge survive.
        let mut wanted: Vec<WallPointId> = Vec::new();
        let mut wanted_seen = HashSet::new();
        for &p in &self.points {
            graph.point(p)?;
        }
        for (_, data) in &edges {
            for p in [data.from, data.to] {
                if wanted_seen.insert(p) {
                    wanted.push(p);
                }
            }
        }

        let mut map = FragmentMap::default();
        let mut affected = Affected::new();
        for &old in &wanted {
            let location = graph.location(old)? + self.offset;
            let size = graph.point(old)?.size;
            let new = graph.add_point(location);
            graph.point_mut(new)?.size = size;
            map.points.insert(old, new);
            affected.point(new);
        }

        for (old, data) in &edges {
            let (Some(&from), Some(&to)) = (map.points.get(&data.from), map.points.get(&data.to))
            else {
                continue;
            };
            let new = graph.add_edge(from, to, data.kind.fresh_copy())?;
            map.edges.insert(*old, new);
            affected.edge(new);
        }

        let selected_parts: HashSet<_> = self.parts.iter().copied().collect();
        for (old_edge, data) in &edges {
            let Some(&new_edge) = map.edges.get(old_edge) else {
                continue;
            };
            for &old in data.parts() {
                if !selected_parts.contains(&old) || map.parts.contains_key(&old) {
                    continue;
                }
                let mut copy = graph.part(old)?.clone();
                copy.edge = Some(new_edge);
                copy.location += self.offset;
                let new = graph.add_part(copy);
                graph.wall_mut(new_edge)?.parts.push(new);
                map.parts.insert(old, new);
                affected.part(new);
            }
        }

        for &old in &self.rooms {
            if map.rooms.contains_key(&old) {
                continue;
            }
            let source = graph.room(old)?;
            let Some(mapped) = source
                .points
                .iter()
                .map(|p| map.points.get(p).copied())
                .collect::<Option<Vec<_>>>()
            else {
                continue;
            };
            let eligible: HashSet<WallPointId> = mapped.iter().copied().collect();
            let Some(points) = mapped
                .first()
                .and_then(|&start| attempt_covering_loop(graph, start, &eligible))
            else {
                tracing::debug!(room = ?old, "copied boundary does not close; room skipped");
                continue;
            };
            let source = graph.room(old)?;
            let mut copy = RoomData::new(points.clone(), source.fill.clone());
            copy.label = source.label.clone();
            let new = graph.add_room(copy);
            for p in points {
                graph.point_mut(p)?.link_room(new);
            }
            RecomputeRoom::new(new).execute(graph)?;
            map.rooms.insert(old, new);
            affected.room(new);
        }

        tracing::debug!(
            points = map.points.len(),
            edges = map.edges.len(),
            parts = map.parts.len(),
            rooms = map.rooms.len(),
            "copied fragment"
        );
        Ok(Edit::new(map, affected))
    }
}
