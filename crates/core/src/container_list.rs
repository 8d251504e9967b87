//! Typed containment list.
//!
//! An `EntityContainerList<T>` owns its items. Being inside the list *is* the
//! containment relationship, so an entity can only ever have one container at a
//! time; the list keeps each item's container back-reference in sync with its
//! owner id.

use crate::entity::Entity;
use crate::error::{DomainError, DomainResult};
use crate::id::EntityId;

/// Ordered, duplicate-free collection of contained entities.
///
/// Not synchronized: every mutator takes `&mut self`.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityContainerList<T> {
    owner: EntityId,
    items: Vec<T>,
}

impl<T: Entity> EntityContainerList<T> {
    pub fn new(owner: EntityId) -> Self {
        Self {
            owner,
            items: Vec::new(),
        }
    }

    pub fn owner(&self) -> EntityId {
        self.owner
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn ids(&self) -> Vec<EntityId> {
        self.items.iter().map(Entity::id).collect()
    }

    pub fn contains_id(&self, id: EntityId) -> bool {
        self.items.iter().any(|e| e.id() == id)
    }

    pub fn find(&self, id: EntityId) -> Option<&T> {
        self.items.iter().find(|e| e.id() == id)
    }

    pub fn find_mut(&mut self, id: EntityId) -> Option<&mut T> {
        self.items.iter_mut().find(|e| e.id() == id)
    }

    pub fn get(&self, index: usize) -> DomainResult<&T> {
        let len = self.items.len();
        self.items
            .get(index)
            .ok_or_else(|| out_of_range(index, len))
    }

    pub fn get_mut(&mut self, index: usize) -> DomainResult<&mut T> {
        let len = self.items.len();
        self.items
            .get_mut(index)
            .ok_or_else(|| out_of_range(index, len))
    }

    /// Insert an entity, taking ownership and pointing its container at this
    /// list's owner.
    pub fn add(&mut self, mut entity: T) -> DomainResult<()> {
        let id = entity.id();
        if self.contains_id(id) {
            return Err(duplicate(id, self.owner));
        }
        entity.set_container(Some(self.owner));
        self.items.push(entity);
        Ok(())
    }

    /// Insert a batch atomically.
    ///
    /// Every candidate is checked against the current content and against the
    /// rest of the batch first; on conflict nothing is inserted.
    pub fn add_range(&mut self, entities: impl IntoIterator<Item = T>) -> DomainResult<()> {
        let batch: Vec<T> = entities.into_iter().collect();

        for (idx, candidate) in batch.iter().enumerate() {
            let id = candidate.id();
            if self.contains_id(id) || batch[..idx].iter().any(|e| e.id() == id) {
                return Err(duplicate(id, self.owner));
            }
        }

        self.items.reserve(batch.len());
        for mut entity in batch {
            entity.set_container(Some(self.owner));
            self.items.push(entity);
        }
        Ok(())
    }

    /// Overwrite the slot at `index`, returning the replaced entity (detached).
    pub fn set(&mut self, index: usize, mut entity: T) -> DomainResult<T> {
        let len = self.items.len();
        if index >= len {
            return Err(out_of_range(index, len));
        }

        let id = entity.id();
        let clash = self
            .items
            .iter()
            .enumerate()
            .any(|(i, e)| i != index && e.id() == id);
        if clash {
            return Err(duplicate(id, self.owner));
        }

        entity.set_container(Some(self.owner));
        let previous = core::mem::replace(&mut self.items[index], entity);
        Ok(self.detach(previous))
    }

    pub fn remove(&mut self, index: usize) -> DomainResult<T> {
        let len = self.items.len();
        if index >= len {
            return Err(out_of_range(index, len));
        }
        let removed = self.items.remove(index);
        Ok(self.detach(removed))
    }

    pub fn remove_by_id(&mut self, id: EntityId) -> Option<T> {
        let index = self.items.iter().position(|e| e.id() == id)?;
        let removed = self.items.remove(index);
        Some(self.detach(removed))
    }

    /// Remove every item, handing them back detached.
    pub fn clear(&mut self) -> Vec<T> {
        let removed: Vec<T> = self.items.drain(..).collect();
        removed.into_iter().map(|e| self.detach(e)).collect()
    }

    fn detach(&self, mut entity: T) -> T {
        entity.set_container(None);
        tracing::trace!(
            entity_id = %entity.id(),
            kind = %entity.kind(),
            owner = %self.owner,
            "entity detached from container"
        );
        entity
    }
}

impl<'a, T> IntoIterator for &'a EntityContainerList<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> core::ops::Index<usize> for EntityContainerList<T> {
    type Output = T;

    /// Panics when out of range, like slice indexing. Use [`EntityContainerList::get`]
    /// for the fallible form.
    fn index(&self, index: usize) -> &Self::Output {
        &self.items[index]
    }
}

fn duplicate(id: EntityId, owner: EntityId) -> DomainError {
    DomainError::invariant(format!(
        "entity {id} is already contained in the list owned by {owner}"
    ))
}

fn out_of_range(index: usize, len: usize) -> DomainError {
    DomainError::invariant(format!("index {index} out of range (len {len})"))
}
