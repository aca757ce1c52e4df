//! Entity Identities
//!
//! Entities are plain integer ids handed out in strictly increasing order.
//! Ids are never reused: a projectile fired long ago can't be confused with
//! an enemy that spawned later, so systems may compare ids freely and the
//! allocation order doubles as the stable iteration order for queries.

use std::fmt;

/// A unique identifier for a game entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Entity(u32);

impl Entity {
    /// Should only be called by EntityAllocator (and tests).
    pub(crate) fn new(id: u32) -> Self {
        Self(id)
    }

    /// Raw id; also the key order of component storages.
    pub fn id(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Allocates ids and tracks which entities are alive.
///
/// `alive` stays sorted by id (which is creation order): ids only ever grow
/// and removal preserves relative order. That makes liveness a binary
/// search, and freed entities leave nothing behind.
pub struct EntityAllocator {
    /// Next id to hand out
    next_id: u32,
    /// Alive entities in creation order
    alive: Vec<Entity>,
}

impl EntityAllocator {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            alive: Vec::new(),
        }
    }

    /// Allocate a new entity.
    pub fn allocate(&mut self) -> Entity {
        let entity = Entity::new(self.next_id);
        self.next_id += 1;
        self.alive.push(entity);
        entity
    }

    /// Free a batch of entities. Unknown or already freed ids are ignored.
    /// Returns how many entities were actually freed.
    pub fn free_all(&mut self, entities: &[Entity]) -> usize {
        let mut doomed: Vec<Entity> = entities.iter().copied().filter(|&e| self.is_alive(e)).collect();
        doomed.sort_unstable();
        doomed.dedup();
        if !doomed.is_empty() {
            self.alive.retain(|e| doomed.binary_search(e).is_err());
        }
        doomed.len()
    }

    /// Check if an entity is currently alive.
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.alive.binary_search(&entity).is_ok()
    }

    /// Alive entities in creation order.
    pub fn alive(&self) -> &[Entity] {
        &self.alive
    }

    /// Get the number of currently alive entities.
    pub fn alive_count(&self) -> usize {
        self.alive.len()
    }
}

impl Default for EntityAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_only_touches_listed() {
        let mut allocator = EntityAllocator::new();

        let player = allocator.allocate();
        let enemy = allocator.allocate();
        assert_eq!(allocator.alive_count(), 2);
        assert!(allocator.is_alive(player));
        assert!(allocator.is_alive(enemy));

        assert_eq!(allocator.free_all(&[player]), 1);
        assert_eq!(allocator.alive_count(), 1);
        assert!(!allocator.is_alive(player));
        assert!(allocator.is_alive(enemy));
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut allocator = EntityAllocator::new();

        let player = allocator.allocate();
        allocator.free_all(&[player]);
        let enemy = allocator.allocate();

        assert!(enemy.id() > player.id());
        assert!(!allocator.is_alive(player));
        assert_eq!(allocator.next_id, 2);
    }

    #[test]
    fn test_double_free_is_harmless() {
        let mut allocator = EntityAllocator::new();
        let player = allocator.allocate();

        assert_eq!(allocator.free_all(&[player, player]), 1);
        assert_eq!(allocator.free_all(&[player]), 0);
        assert_eq!(allocator.free_all(&[Entity::new(999)]), 0);
    }

    #[test]
    fn test_freed_entities_leave_nothing_behind() {
        let mut allocator = EntityAllocator::new();
        for _ in 0..100_000 {
            let shot = allocator.allocate();
            allocator.free_all(&[shot]);
        }

        assert_eq!(allocator.alive_count(), 0);
        assert_eq!(allocator.next_id, 100_000);
        assert!(allocator.alive.capacity() < 16);
    }

    #[test]
    fn test_alive_keeps_creation_order() {
        let mut allocator = EntityAllocator::new();
        let spawned: Vec<_> = (0..5).map(|_| allocator.allocate()).collect();

        allocator.free_all(&[spawned[3], spawned[1]]);

        assert_eq!(allocator.alive(), &[spawned[0], spawned[2], spawned[4]]);
    }
}
