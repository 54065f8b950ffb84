use std::collections::BTreeSet;

use crate::graph::{EdgeId, RoomId, WallPartId, WallPointId};

/// Key of any entity in the wall graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntityKey {
    Point(WallPointId),
    Edge(EdgeId),
    Part(WallPartId),
    Room(RoomId),
}

/// Entities written by one operation.
///
/// Touched sets only ever hold live keys; anything deleted during the
/// operation moves to `removed`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Affected {
    pub points: BTreeSet<WallPointId>,
    pub edges: BTreeSet<EdgeId>,
    pub parts: BTreeSet<WallPartId>,
    pub rooms: BTreeSet<RoomId>,
    pub removed: BTreeSet<EntityKey>,
}

impl Affected {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn point(&mut self, id: WallPointId) -> &mut Self {
        self.points.insert(id);
        self
    }

    pub fn edge(&mut self, id: EdgeId) -> &mut Self {
        self.edges.insert(id);
        self
    }

    pub fn part(&mut self, id: WallPartId) -> &mut Self {
        self.parts.insert(id);
        self
    }

    pub fn room(&mut self, id: RoomId) -> &mut Self {
        self.rooms.insert(id);
        self
    }

    /// Records that an entity no longer exists.
    pub fn removed(&mut self, key: EntityKey) -> &mut Self {
        match key {
            EntityKey::Point(id) => {
                self.points.remove(&id);
            }
            EntityKey::Edge(id) => {
                self.edges.remove(&id);
            }
            EntityKey::Part(id) => {
                self.parts.remove(&id);
            }
            EntityKey::Room(id) => {
                self.rooms.remove(&id);
            }
        }
        self.removed.insert(key);
        self
    }

    /// Folds another set into this one. Removals win over touches.
    pub fn merge(&mut self, other: Affected) -> &mut Self {
        self.points.extend(other.points);
        self.edges.extend(other.edges);
        self.parts.extend(other.parts);
        self.rooms.extend(other.rooms);
        for key in other.removed {
            self.removed(key);
        }
        self
    }

    #[must_use]
    pub fn was_removed(&self, key: EntityKey) -> bool {
        self.removed.contains(&key)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
            && self.edges.is_empty()
            && self.parts.is_empty()
            && self.rooms.is_empty()
            && self.removed.is_empty()
    }
}

/// Result of a structural operation together with what it touched.
#[derive(Debug, Clone, PartialEq)]
pub struct Edit<T> {
    pub value: T,
    pub affected: Affected,
}

impl<T> Edit<T> {
    #[must_use]
    pub fn new(value: T, affected: Affected) -> Self {
        Self { value, affected }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[test]
    fn removal_overrides_touch() {
        let mut keys: SlotMap<WallPointId, ()> = SlotMap::with_key();
        let a = keys.insert(());
        let b = keys.insert(());

        let mut first = Affected::new();
        first.point(a).point(b);
        let mut second = Affected::new();
        second.removed(EntityKey::Point(a));

        first.merge(second);
        assert!(!first.points.contains(&a));
        assert!(first.points.contains(&b));
        assert!(first.was_removed(EntityKey::Point(a)));
    }

    #[test]
    fn empty_by_default() {
        assert!(Affected::new().is_empty());
    }
}
