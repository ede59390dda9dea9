//! Insertion-ordered entity collection keyed by identifier.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use thiserror::Error;

/// An entity stored in a [`Collection`].
pub trait Entity {
    /// Identifier type used as the collection key.
    type Id: Copy + Eq + fmt::Display;

    /// Returns the identifier of this entity.
    fn entity_id(&self) -> Self::Id;
}

/// Two records in a stored collection share one identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("duplicate entity id {0}")]
pub struct DuplicateEntityId(pub String);

/// Mapping from entity identifier to entity that preserves insertion order.
///
/// Serialized as a plain JSON array so the persisted document keeps one
/// array per collection. Loading an array that repeats an identifier fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Entity> Collection<T> {
    /// Creates an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Returns the number of stored entities.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` when the collection holds no entities.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates entities in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Iterates entities mutably in insertion order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    /// Returns the entity with the given identifier.
    #[must_use]
    pub fn get(&self, id: T::Id) -> Option<&T> {
        self.items.iter().find(|item| item.entity_id() == id)
    }

    /// Returns the entity with the given identifier mutably.
    pub fn get_mut(&mut self, id: T::Id) -> Option<&mut T> {
        self.items.iter_mut().find(|item| item.entity_id() == id)
    }

    /// Returns `true` when an entity with the identifier exists.
    #[must_use]
    pub fn contains(&self, id: T::Id) -> bool {
        self.get(id).is_some()
    }

    /// Inserts an entity, replacing any entity with the same identifier in
    /// place. Returns the replaced entity.
    pub fn insert(&mut self, item: T) -> Option<T> {
        let id = item.entity_id();
        match self.get_mut(id) {
            Some(existing) => Some(std::mem::replace(existing, item)),
            None => {
                self.items.push(item);
                None
            }
        }
    }

    /// Removes the entity with the given identifier.
    pub fn remove(&mut self, id: T::Id) -> Option<T> {
        let position = self.items.iter().position(|item| item.entity_id() == id)?;
        Some(self.items.remove(position))
    }

    /// Keeps only entities matching the predicate and returns how many were
    /// removed.
    pub fn retain(&mut self, predicate: impl FnMut(&T) -> bool) -> usize {
        let before = self.items.len();
        self.items.retain(predicate);
        before.saturating_sub(self.items.len())
    }
}

impl<T: Entity> FromIterator<T> for Collection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut collection = Self::new();
        for item in iter {
            collection.insert(item);
        }
        collection
    }
}

impl<T: Entity> TryFrom<Vec<T>> for Collection<T> {
    type Error = DuplicateEntityId;

    fn try_from(items: Vec<T>) -> Result<Self, Self::Error> {
        let mut collection = Self::new();
        for item in items {
            if let Some(existing) = collection.insert(item) {
                return Err(DuplicateEntityId(existing.entity_id().to_string()));
            }
        }
        Ok(collection)
    }
}

impl<'de, T> Deserialize<'de> for Collection<T>
where
    T: Entity + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items = Vec::<T>::deserialize(deserializer)?;
        Self::try_from(items).map_err(serde::de::Error::custom)
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
