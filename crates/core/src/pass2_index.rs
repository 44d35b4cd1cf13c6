//! Pass 2: variable indexing -- build a lookup from variable id to its
//! owning collection and definition, for alias resolution.

use std::collections::HashMap;
use tokenbake_interchange::{Variable, VariablesExport};

/// Where a variable lives.
#[derive(Debug, Clone, Copy)]
pub struct IndexEntry<'a> {
    pub collection: &'a str,
    pub variable: &'a Variable,
}

/// Read-only lookup index over every variable in the document.
///
/// Duplicate ids are not an error: the last definition in document order
/// wins.
#[derive(Debug, Default)]
pub struct VariableIndex<'a> {
    entries: HashMap<&'a str, IndexEntry<'a>>,
}

impl<'a> VariableIndex<'a> {
    pub fn get(&self, id: &str) -> Option<&IndexEntry<'a>> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn build_index(doc: &VariablesExport) -> VariableIndex<'_> {
    let mut idx = VariableIndex::default();

    for col in &doc.collections {
        for var in &col.variables {
            let entry = IndexEntry {
                collection: &col.name,
                variable: var,
            };
            if let Some(prev) = idx.entries.insert(&var.id, entry) {
                tracing::debug!(
                    id = %var.id,
                    previous = prev.collection,
                    current = %col.name,
                    "duplicate variable id; keeping the later definition"
                );
            }
        }
    }

    idx
}
