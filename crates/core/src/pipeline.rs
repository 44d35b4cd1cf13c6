//! Pipeline: export document -> per-bucket token files.
//!
//! Thin orchestrator that calls each pass module in order.

use crate::bucket::Bucket;
use crate::error::{BuildError, WriteFailure};
use crate::pass1_load;
use crate::pass2_index;
use crate::pass4_route::{self, RouteStats};
use crate::pass5_write::{self, WrittenBucket};
use crate::routing::RoutingTable;
use crate::source::{DirectorySink, FileSystemProvider, SourceProvider, TokenSink};
use serde_json::json;
use std::path::Path;
use tokenbake_interchange::VariablesExport;

/// Everything a run would produce, before any I/O.
#[derive(Debug)]
pub struct BuildPlan {
    pub buckets: Vec<Bucket>,
    pub stats: RouteStats,
    pub variables: usize,
}

impl BuildPlan {
    pub fn to_json_value(&self) -> serde_json::Value {
        let buckets: Vec<_> = self
            .buckets
            .iter()
            .map(|b| json!({"bucket": b.name, "file": b.file_name(), "tokens": b.tree.leaf_count()}))
            .collect();
        json!({
            "buckets":   buckets,
            "stats":     self.stats,
            "variables": self.variables,
        })
    }
}

/// Outcome of a full run.
#[derive(Debug)]
pub struct BuildReport {
    pub written: Vec<WrittenBucket>,
    pub failures: Vec<WriteFailure>,
    pub stats: RouteStats,
}

impl BuildReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn to_json_value(&self) -> serde_json::Value {
        let failures: Vec<_> = self.failures.iter().map(WriteFailure::to_json_value).collect();
        let written: Vec<_> = self
            .written
            .iter()
            .map(|w| json!({"bucket": w.bucket, "file": w.path.display().to_string(), "tokens": w.tokens}))
            .collect();
        json!({
            "failures": failures,
            "stats":    self.stats,
            "written":  written,
        })
    }
}

/// Index, resolve and route an already-loaded document.
pub fn plan_document(doc: &VariablesExport, table: &RoutingTable) -> BuildPlan {
    let index = pass2_index::build_index(doc);
    let ctx = pass4_route::route_all(doc, &index, table);
    let (buckets, stats) = ctx.into_buckets();
    BuildPlan {
        buckets,
        stats,
        variables: doc.variable_count(),
    }
}

/// Load and plan the document at `input` without writing anything.
pub fn plan(input: &Path, table: &RoutingTable) -> Result<BuildPlan, BuildError> {
    plan_with_provider(input, &FileSystemProvider, table)
}

pub fn plan_with_provider(
    input: &Path,
    provider: &dyn SourceProvider,
    table: &RoutingTable,
) -> Result<BuildPlan, BuildError> {
    let doc = pass1_load::load_document_with_provider(input, provider)?;
    Ok(plan_document(&doc, table))
}

/// Run the whole pipeline, writing one file per bucket into `out_dir`.
///
/// Input errors abort before any file is written. Write failures are
/// collected in the report.
pub fn build(input: &Path, out_dir: &Path, table: &RoutingTable) -> Result<BuildReport, BuildError> {
    let mut sink = DirectorySink::new(out_dir);
    build_with(input, &FileSystemProvider, &mut sink, table)
}

pub fn build_with(
    input: &Path,
    provider: &dyn SourceProvider,
    sink: &mut dyn TokenSink,
    table: &RoutingTable,
) -> Result<BuildReport, BuildError> {
    let _span = tracing::info_span!("build", input = %input.display()).entered();

    let plan = plan_with_provider(input, provider, table)?;
    tracing::debug!(
        buckets = plan.buckets.len(),
        resolved = plan.stats.resolved,
        skipped = plan.stats.skipped.total(),
        "routing complete"
    );

    let outcome = pass5_write::write_buckets(&plan.buckets, sink);
    Ok(BuildReport {
        written: outcome.written,
        failures: outcome.failures,
        stats: plan.stats,
    })
}
