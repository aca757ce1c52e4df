//! Component Storage
//!
//! One `ComponentStorage<T>` per component type, keyed by entity.
//! Ids are never reused, so storage is a map rather than a slot vector:
//! removing a component releases its entry and a long session doesn't
//! accumulate empty slots for every projectile ever fired.

use std::collections::BTreeMap;

use super::entity::Entity;

/// Components of one type, ordered by entity id.
pub struct ComponentStorage<T> {
    entries: BTreeMap<Entity, T>,
}

impl<T> ComponentStorage<T> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Attach `component` to `entity`, overwriting what was there.
    pub fn insert(&mut self, entity: Entity, component: T) {
        self.entries.insert(entity, component);
    }

    /// Detach and return the entity's component, if any.
    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        self.entries.remove(&entity)
    }

    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.entries.get(&entity)
    }

    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        self.entries.get_mut(&entity)
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.entries.contains_key(&entity)
    }

    /// Entries in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.entries.iter().map(|(&e, c)| (e, c))
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for ComponentStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}
