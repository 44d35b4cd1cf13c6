//! tokenbake-interchange: typed model of a design-tool variable export.
//!
//! Provides typed structs for collections, modes, variables and raw
//! per-mode values, and a single `from_export()` entry point that
//! deserializes a `serde_json::Value` document into a `VariablesExport`.
//!
//! Deserialization is permissive: anything below the top-level shape that
//! does not match the expected format is dropped or kept as
//! [`RawValue::Unsupported`] instead of failing the whole document.

pub mod deserialize;
pub mod types;

pub use deserialize::{from_export, InterchangeError};
pub use types::*;
