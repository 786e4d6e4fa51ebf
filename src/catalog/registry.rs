//! Lazily populated registry of collections.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use super::Catalog;
use crate::error::Result;
use crate::model::Collection;

/// Parent id used by the device for trashed entries.
pub const TRASH_ID: &str = "trash";

/// Collections keyed by id, loaded from the catalog on first use.
///
/// Documents refer to their parent by id only; names and ancestor chains are
/// resolved through the registry.
#[derive(Debug, Default)]
pub struct CollectionRegistry {
    collections: HashMap<String, Collection>,
}

impl CollectionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a collection, replacing any entry with the same id.
    pub fn insert(&mut self, collection: Collection) {
        self.collections.insert(collection.id.clone(), collection);
    }

    /// Get an already resolved collection.
    pub fn get(&self, id: &str) -> Option<&Collection> {
        self.collections.get(id)
    }

    /// Number of resolved collections.
    pub fn len(&self) -> usize {
        self.collections.len()
    }

    /// Check if nothing has been resolved yet.
    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    /// Get a collection, loading its metadata on first access.
    pub fn resolve(&mut self, catalog: &Catalog, id: &str) -> Result<&mut Collection> {
        match self.collections.entry(id.to_string()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let collection = if id == TRASH_ID {
                    Collection::new(id, TRASH_ID, None)
                } else {
                    let metadata = catalog.read_metadata(id)?;
                    Collection::new(
                        id,
                        metadata.visible_name.clone(),
                        metadata.parent_id().map(str::to_string),
                    )
                };
                log::debug!("Resolved collection {} ({})", collection.name, id);
                Ok(entry.insert(collection))
            }
        }
    }

    /// Record `child` under the collection `parent`, resolving it if needed.
    pub fn register_child(&mut self, catalog: &Catalog, parent: &str, child: &str) -> Result<()> {
        self.resolve(catalog, parent)?.add_child(child);
        Ok(())
    }

    /// Names of the collections above an entry, outermost first.
    pub fn ancestors(&mut self, catalog: &Catalog, parent: Option<&str>) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let mut seen = HashSet::new();
        let mut next = parent.map(str::to_string);

        while let Some(id) = next {
            if !seen.insert(id.clone()) {
                log::warn!("Collection cycle detected at {}", id);
                break;
            }
            let collection = self.resolve(catalog, &id)?;
            names.push(collection.name.clone());
            next = collection.parent.clone();
        }

        names.reverse();
        Ok(names)
    }
}
