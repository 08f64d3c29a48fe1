//! Generic name-to-item registry
//!
//! A [`Catalogue`] maps string names to registered items of a single type.
//! It backs the plugin surfaces of the crate: parameter kinds, desirability
//! strategies, and aggregation strategies are all looked up by name through a
//! catalogue. Registration is explicit — an existing name is never silently
//! overwritten — and removal is explicit too.
//!
//! Item-type safety is the generic bound: a `Catalogue<T>` can only ever hold
//! `T`s, so the runtime subclass/instance checks of dynamically typed
//! registries become compile-time guarantees here.

use std::collections::BTreeMap;
use thiserror::Error;

/// Errors that can occur when working with a catalogue
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogueError {
    #[error("Item '{0}' already exists")]
    Duplicate(String),

    #[error("Item '{0}' does not exist")]
    NotFound(String),
}

/// A registry of named items.
///
/// # Examples
///
/// ```
/// use scorekit::catalogue::Catalogue;
///
/// let mut catalogue: Catalogue<u32> = Catalogue::new();
/// catalogue.register("answer", 42).unwrap();
/// assert_eq!(*catalogue.get("answer").unwrap(), 42);
/// assert!(catalogue.register("answer", 7).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Catalogue<T> {
    items: BTreeMap<String, T>,
}

impl<T> Catalogue<T> {
    /// Create an empty catalogue.
    pub fn new() -> Self {
        Self {
            items: BTreeMap::new(),
        }
    }

    /// Register an item under the given name.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError::Duplicate`] if the name is already taken.
    pub fn register(&mut self, name: &str, item: T) -> Result<(), CatalogueError> {
        if self.items.contains_key(name) {
            return Err(CatalogueError::Duplicate(name.to_string()));
        }
        self.items.insert(name.to_string(), item);
        Ok(())
    }

    /// Remove an item by name.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError::NotFound`] if no item is registered under the
    /// name.
    pub fn remove(&mut self, name: &str) -> Result<T, CatalogueError> {
        self.items
            .remove(name)
            .ok_or_else(|| CatalogueError::NotFound(name.to_string()))
    }

    /// Retrieve an item by name.
    ///
    /// The item is returned by reference; callers that registered a factory
    /// are expected to invoke it themselves.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError::NotFound`] if no item is registered under the
    /// name.
    pub fn get(&self, name: &str) -> Result<&T, CatalogueError> {
        self.items
            .get(name)
            .ok_or_else(|| CatalogueError::NotFound(name.to_string()))
    }

    /// All registered names, in lexicographic order.
    pub fn list_items(&self) -> Vec<&str> {
        self.items.keys().map(String::as_str).collect()
    }

    /// Whether a name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.items.contains_key(name)
    }

    /// Number of registered items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalogue is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Construct a catalogue from `(name, item)` pairs.
///
/// Duplicate names resolve to the last occurrence, as with any map collected
/// from an iterator. Runtime registration keeps its duplicate protection; this
/// path exists for populating catalogues from a literal entry list, where the
/// names are distinct by construction.
impl<'a, T> FromIterator<(&'a str, T)> for Catalogue<T> {
    fn from_iter<I: IntoIterator<Item = (&'a str, T)>>(entries: I) -> Self {
        Self {
            items: entries
                .into_iter()
                .map(|(name, item)| (name.to_string(), item))
                .collect(),
        }
    }
}
