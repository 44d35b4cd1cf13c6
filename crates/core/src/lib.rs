//! tokenbake-core: alias resolution and bucketing for variable exports.
//!
//! Provides the pipeline from a design-tool variable export to one
//! flattened JSON token file per layer/mode bucket.
//!
//! # Public API
//!
//! - [`build()`] -- run the full pipeline and write files
//! - [`plan()`] -- run everything except writing
//! - [`VariableIndex`] -- id lookup used for alias resolution (Pass 2)
//! - [`resolve()`] -- resolve one (variable, mode) pair (Pass 3)
//! - [`RoutingTable`] / [`CollectionKind`] -- collection routing rules
//! - [`BuildContext`] -- buckets under construction (Pass 4)
//! - [`BuildError`] / [`WriteFailure`] -- fatal input and per-bucket errors

pub mod bucket;
pub mod color;
pub mod error;
pub mod normalize;
pub mod pass1_load;
pub mod pass2_index;
pub mod pass3_resolve;
pub mod pass4_route;
pub mod pass5_write;
pub mod pipeline;
pub mod routing;
pub mod source;

// ── Convenience re-exports: key types ────────────────────────────────

pub use bucket::{Bucket, TokenNode, TokenTree};
pub use error::{BuildError, WriteFailure};
pub use pass2_index::VariableIndex;
pub use pass3_resolve::{ResolvedValue, Unresolved};
pub use pass4_route::{BuildContext, RouteStats, SkipCounts};
pub use pipeline::{BuildPlan, BuildReport};
pub use routing::{CollectionKind, CollectionNames, RoutingTable};

// ── Convenience re-exports: pipeline entry points ────────────────────

pub use normalize::{normalize_segment, to_path};
pub use pass1_load::{load_document_with_provider, read_json};
pub use pass2_index::build_index;
pub use pass3_resolve::resolve;
pub use pipeline::{build, build_with, plan, plan_document};
