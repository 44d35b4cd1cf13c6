//! Pass 5: serialize each bucket and hand it to a [`TokenSink`].
//!
//! A failing bucket is recorded and the remaining buckets are still
//! written. Nothing already written is rolled back.

use crate::bucket::{Bucket, TokenTree};
use crate::error::WriteFailure;
use crate::source::TokenSink;
use std::io;
use std::path::PathBuf;

/// A bucket that reached the sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenBucket {
    pub bucket: String,
    pub path: PathBuf,
    pub tokens: usize,
}

#[derive(Debug, Default)]
pub struct WriteOutcome {
    pub written: Vec<WrittenBucket>,
    pub failures: Vec<WriteFailure>,
}

/// Pretty-printed JSON with two-space indentation and insertion key order.
pub fn render_bucket(tree: &TokenTree) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(tree)
}

pub fn write_buckets(buckets: &[Bucket], sink: &mut dyn TokenSink) -> WriteOutcome {
    let mut outcome = WriteOutcome::default();

    for bucket in buckets {
        let file_name = bucket.file_name();
        let result = render_bucket(&bucket.tree)
            .map_err(io::Error::from)
            .and_then(|contents| sink.write_file(&file_name, &contents));

        match result {
            Ok(path) => {
                tracing::info!(bucket = %bucket.name, path = %path.display(), "wrote bucket");
                outcome.written.push(WrittenBucket {
                    bucket: bucket.name.clone(),
                    path,
                    tokens: bucket.tree.leaf_count(),
                });
            }
            Err(source) => {
                let failure = WriteFailure {
                    bucket: bucket.name.clone(),
                    path: sink.target_path(&file_name),
                    source,
                };
                tracing::debug!(error = %failure, "bucket write failed");
                outcome.failures.push(failure);
            }
        }
    }

    outcome
}
