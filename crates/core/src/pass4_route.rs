//! Pass 4: routing -- resolve every routed (collection, mode, variable)
//! triple and insert the value into its bucket.

use crate::bucket::{Bucket, TokenTree};
use crate::normalize::to_path;
use crate::pass2_index::VariableIndex;
use crate::pass3_resolve::{resolve_chain, ResolvedValue, Unresolved};
use crate::routing::{Route, RoutingTable};
use indexmap::IndexMap;
use serde::Serialize;
use tokenbake_interchange::{Collection, VariablesExport};

/// Per-reason counts of (variable, mode) pairs left out of the output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SkipCounts {
    pub missing_mode_value: usize,
    pub dangling_alias: usize,
    pub cyclic_alias: usize,
    pub unsupported_value: usize,
}

impl SkipCounts {
    pub fn record(&mut self, reason: Unresolved) {
        match reason {
            Unresolved::MissingModeValue => self.missing_mode_value += 1,
            Unresolved::DanglingAlias => self.dangling_alias += 1,
            Unresolved::CyclicAlias => self.cyclic_alias += 1,
            Unresolved::UnsupportedValue => self.unsupported_value += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.missing_mode_value + self.dangling_alias + self.cyclic_alias + self.unsupported_value
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RouteStats {
    /// Values inserted into a bucket.
    pub resolved: usize,
    /// Existing nodes replaced by later inserts, including leaves displaced
    /// by a deeper path.
    pub overwritten: usize,
    pub skipped: SkipCounts,
    pub routed_collections: Vec<String>,
    pub unrouted_collections: Vec<String>,
}

/// Mutable state of one run: the buckets under construction and the
/// routing statistics. Owned by the caller and passed through the passes.
#[derive(Debug, Default)]
pub struct BuildContext {
    buckets: IndexMap<String, TokenTree>,
    pub stats: RouteStats,
}

impl BuildContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route every variable of `collection` according to `table`.
    pub fn route_collection(
        &mut self,
        table: &RoutingTable,
        index: &VariableIndex<'_>,
        collection: &Collection,
    ) {
        let routes = table.routes(collection);
        if routes.is_empty() {
            tracing::debug!(collection = %collection.name, "collection not routed");
            self.stats
                .unrouted_collections
                .push(collection.name.clone());
            return;
        }
        self.stats.routed_collections.push(collection.name.clone());

        for route in &routes {
            self.route_mode(index, collection, route);
        }
    }

    fn route_mode(&mut self, index: &VariableIndex<'_>, collection: &Collection, route: &Route<'_>) {
        let mode_id = route.mode.mode_id.as_str();
        for var in &collection.variables {
            let res = resolve_chain(index, var, mode_id);
            match res.value {
                Ok(value) => {
                    let mut path = route.prefix.clone();
                    path.extend(to_path(&var.name));
                    self.insert(&route.bucket, &path, value);
                }
                Err(reason) => {
                    tracing::debug!(
                        collection = %collection.name,
                        mode = %route.mode.name,
                        variable = %var.name,
                        chain = ?res.chain,
                        %reason,
                        "skipping unresolved variable"
                    );
                    self.stats.skipped.record(reason);
                }
            }
        }
    }

    /// Insert a value, creating the bucket on first use. Last write wins.
    pub fn insert(&mut self, bucket: &str, path: &[String], value: ResolvedValue) {
        let tree = self.buckets.entry(bucket.to_string()).or_default();
        let replaced = tree.insert(path, value);
        if replaced > 0 {
            tracing::debug!(bucket, path = %path.join("."), replaced, "overwrote existing token");
            self.stats.overwritten += replaced;
        }
        self.stats.resolved += 1;
    }

    pub fn bucket(&self, name: &str) -> Option<&TokenTree> {
        self.buckets.get(name)
    }

    /// Bucket names in first-creation order.
    pub fn bucket_names(&self) -> impl Iterator<Item = &str> {
        self.buckets.keys().map(String::as_str)
    }

    pub fn into_buckets(self) -> (Vec<Bucket>, RouteStats) {
        let buckets = self
            .buckets
            .into_iter()
            .map(|(name, tree)| Bucket { name, tree })
            .collect();
        (buckets, self.stats)
    }
}

/// Route every collection of the document, in document order.
pub fn route_all(
    doc: &VariablesExport,
    index: &VariableIndex<'_>,
    table: &RoutingTable,
) -> BuildContext {
    let mut ctx = BuildContext::new();
    for collection in &doc.collections {
        ctx.route_collection(table, index, collection);
    }
    ctx
}
