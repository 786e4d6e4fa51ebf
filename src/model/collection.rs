//! Collections (folders) that can contain documents.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A folder-like grouping entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    /// Collection id
    pub id: String,

    /// Visible name
    pub name: String,

    /// Parent collection id, `None` at the root
    pub parent: Option<String>,

    /// Ids of the entries registered as children so far
    pub children: BTreeSet<String>,
}

impl Collection {
    /// Create a collection without children.
    pub fn new(id: impl Into<String>, name: impl Into<String>, parent: Option<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent,
            children: BTreeSet::new(),
        }
    }

    /// Record a child id. Returns `false` if it was already known.
    pub fn add_child(&mut self, id: impl Into<String>) -> bool {
        self.children.insert(id.into())
    }
}
