//! Pass 1: read and parse the export document.
//!
//! This is the only pass that can fail the run.

use crate::error::BuildError;
use crate::source::SourceProvider;
use std::path::Path;
use tokenbake_interchange::{from_export, VariablesExport};

/// Read `path` through the provider and parse it as JSON, without
/// interpreting its shape.
pub fn read_json(path: &Path, provider: &dyn SourceProvider) -> Result<serde_json::Value, BuildError> {
    let text = provider
        .read_source(path)
        .map_err(|source| BuildError::Read {
            path: path.to_owned(),
            source,
        })?;

    serde_json::from_str(&text).map_err(|source| BuildError::Parse {
        path: path.to_owned(),
        source,
    })
}

/// Load the export document at `path` through the given provider.
pub fn load_document_with_provider(
    path: &Path,
    provider: &dyn SourceProvider,
) -> Result<VariablesExport, BuildError> {
    let value = read_json(path, provider)?;
    let doc = from_export(&value).map_err(|source| BuildError::InvalidDocument {
        path: path.to_owned(),
        source,
    })?;

    tracing::debug!(
        path = %path.display(),
        collections = doc.collections.len(),
        variables = doc.variable_count(),
        "loaded export document"
    );
    Ok(doc)
}
