use std::io;
use std::path::PathBuf;

use tokenbake_interchange::InterchangeError;

/// A fatal input error. Any of these aborts the run before output is produced.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("cannot read input '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid JSON in '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed export document '{}': {source}", path.display())]
    InvalidDocument {
        path: PathBuf,
        #[source]
        source: InterchangeError,
    },
}

impl BuildError {
    pub fn kind(&self) -> &'static str {
        match self {
            BuildError::Read { .. } => "read",
            BuildError::Parse { .. } => "parse",
            BuildError::InvalidDocument { .. } => "invalid_document",
        }
    }

    pub fn path(&self) -> &PathBuf {
        match self {
            BuildError::Read { path, .. }
            | BuildError::Parse { path, .. }
            | BuildError::InvalidDocument { path, .. } => path,
        }
    }

    /// Serialize for `--output json`. All fields are always present.
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "file":    self.path().display().to_string(),
            "kind":    self.kind(),
            "message": self.to_string(),
        })
    }
}

/// A bucket that could not be written. Reported per bucket; never fatal.
#[derive(Debug, thiserror::Error)]
#[error("failed to write bucket '{bucket}' to '{}': {source}", path.display())]
pub struct WriteFailure {
    pub bucket: String,
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

impl WriteFailure {
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "bucket":  self.bucket,
            "file":    self.path.display().to_string(),
            "message": self.source.to_string(),
        })
    }
}
