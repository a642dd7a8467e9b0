//! Entity stores
//!
//! Each store is the single owner of one entity kind. Entities are kept sorted
//! by id so iteration order is stable across runs.

use serde::Serialize;

/// Identifier shared by every entity kind (allocated from one counter)
pub type EntityId = u32;

/// Something a [`Store`] can hold
pub trait Entity {
    fn id(&self) -> EntityId;

    /// Whether `self` may not coexist with `other` in the same store
    fn conflicts_with(&self, _other: &Self) -> bool {
        false
    }
}

/// Rejected insertion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// Another live entity already claims the slot
    Occupied(EntityId),
}

/// Id-ordered collection of one entity kind
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Store<T> {
    items: Vec<T>,
}

impl<T> Default for Store<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Entity> Store<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entity, keeping id order
    ///
    /// Panics on a duplicate id: ids come from a single allocator, so a repeat
    /// means the state is already corrupt.
    pub fn add(&mut self, entity: T) -> Result<(), StoreError> {
        if let Some(existing) = self.items.iter().find(|e| entity.conflicts_with(e)) {
            return Err(StoreError::Occupied(existing.id()));
        }
        match self.items.binary_search_by_key(&entity.id(), |e| e.id()) {
            Ok(_) => panic!("duplicate entity id {}", entity.id()),
            Err(pos) => self.items.insert(pos, entity),
        }
        Ok(())
    }

    /// Insert an entity that must not conflict with anything already stored
    pub fn insert(&mut self, entity: T) {
        if let Err(StoreError::Occupied(other)) = self.add(entity) {
            panic!("entity conflicts with live entity {other}");
        }
    }

    /// Remove every entity matching the predicate, returning the removed ones
    pub fn remove_where(&mut self, mut predicate: impl FnMut(&T) -> bool) -> Vec<T> {
        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(self.items.len());
        for item in self.items.drain(..) {
            if predicate(&item) {
                removed.push(item);
            } else {
                kept.push(item);
            }
        }
        self.items = kept;
        removed
    }

    /// Remove one entity by id
    pub fn remove(&mut self, id: EntityId) -> Option<T> {
        let pos = self.items.binary_search_by_key(&id, |e| e.id()).ok()?;
        Some(self.items.remove(pos))
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        let pos = self.items.binary_search_by_key(&id, |e| e.id()).ok()?;
        self.items.get(pos)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        let pos = self.items.binary_search_by_key(&id, |e| e.id()).ok()?;
        self.items.get_mut(pos)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<'a, T: Entity> IntoIterator for &'a Store<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
