//! Entity pools with tombstone compaction
//!
//! Entities are appended during a tick and flagged dead in place. Removal
//! happens only through [`Pool::reap`] or [`Pool::advance_and_reap`], which
//! keep survivors in their original relative order.

use serde::{Deserialize, Serialize};

/// Anything that can be flagged dead and later compacted out of a pool
pub trait Mortal {
    fn is_alive(&self) -> bool;
}

/// Ordered collection of one entity kind
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pool<T> {
    items: Vec<T>,
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Mortal> Pool<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entity
    pub fn spawn(&mut self, item: T) {
        self.items.push(item);
    }

    /// Append an entity, evicting the oldest entries once `cap` is reached.
    /// A cap of zero drops the entity.
    pub fn spawn_capped(&mut self, item: T, cap: usize) {
        if cap == 0 {
            return;
        }
        if self.items.len() >= cap {
            let excess = self.items.len() + 1 - cap;
            self.items.drain(..excess);
        }
        self.items.push(item);
    }

    /// Remove every dead entity, returning how many were removed
    pub fn reap(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(Mortal::is_alive);
        before - self.items.len()
    }

    /// Run `update` on every entity, then compact
    pub fn advance_and_reap(&mut self, mut update: impl FnMut(&mut T)) -> usize {
        for item in &mut self.items {
            update(item);
        }
        self.reap()
    }

    /// Living entities only
    pub fn alive(&self) -> impl Iterator<Item = &T> {
        self.items.iter().filter(|e| e.is_alive())
    }

    pub fn alive_count(&self) -> usize {
        self.alive().count()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
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
