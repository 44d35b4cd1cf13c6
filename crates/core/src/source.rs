//! I/O abstractions for the pipeline.
//!
//! [`SourceProvider`] abstracts reading the export document and
//! [`TokenSink`] abstracts writing bucket files, so the whole pipeline can
//! run against memory in tests.

use std::collections::{HashMap, HashSet};
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

use indexmap::IndexMap;

/// Reads the input document.
pub trait SourceProvider {
    fn read_source(&self, path: &Path) -> Result<String, io::Error>;
}

/// Default filesystem-backed source provider.
pub struct FileSystemProvider;

impl SourceProvider for FileSystemProvider {
    fn read_source(&self, path: &Path) -> Result<String, io::Error> {
        std::fs::read_to_string(path)
    }
}

/// In-memory source provider for testing.
pub struct InMemoryProvider {
    files: HashMap<PathBuf, String>,
}

impl InMemoryProvider {
    pub fn new(files: HashMap<PathBuf, String>) -> Self {
        let files = files
            .into_iter()
            .map(|(p, s)| (normalize_path(&p), s))
            .collect();
        Self { files }
    }

    /// Convenience constructor for a single document.
    pub fn single(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        let mut files = HashMap::new();
        files.insert(path.into(), contents.into());
        Self::new(files)
    }
}

impl SourceProvider for InMemoryProvider {
    fn read_source(&self, path: &Path) -> Result<String, io::Error> {
        let normalized = normalize_path(path);
        self.files.get(&normalized).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("file not found in memory: {}", normalized.display()),
            )
        })
    }
}

/// Resolve `.` and `..` components without touching the filesystem.
fn normalize_path(path: &Path) -> PathBuf {
    let mut components = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                components.pop();
            }
            other => components.push(other),
        }
    }
    components.iter().collect()
}

// ── Output ──────────────────────────────────────────────────────────

/// Destination for rendered bucket files.
///
/// `write_file` must be all-or-nothing: on error, no partial file may be
/// visible under the target name.
pub trait TokenSink {
    /// Write `contents` as `file_name` and return where it landed.
    fn write_file(&mut self, file_name: &str, contents: &str) -> Result<PathBuf, io::Error>;

    /// The path a file would be written to, for error reporting.
    fn target_path(&self, file_name: &str) -> PathBuf;
}

/// Writes bucket files into a directory, creating it on demand.
///
/// Each file is written to a temporary file in the same directory and then
/// renamed over the target.
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl TokenSink for DirectorySink {
    fn write_file(&mut self, file_name: &str, contents: &str) -> Result<PathBuf, io::Error> {
        std::fs::create_dir_all(&self.dir)?;
        let target = self.target_path(file_name);
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(contents.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&target).map_err(|e| e.error)?;
        Ok(target)
    }

    fn target_path(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }
}

/// Collects bucket files in memory. Names registered with
/// [`MemorySink::fail_on`] return an I/O error instead.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub files: IndexMap<String, String>,
    failing: HashSet<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_on(mut self, file_name: impl Into<String>) -> Self {
        self.failing.insert(file_name.into());
        self
    }
}

impl TokenSink for MemorySink {
    fn write_file(&mut self, file_name: &str, contents: &str) -> Result<PathBuf, io::Error> {
        if self.failing.contains(file_name) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("refusing to write {}", file_name),
            ));
        }
        self.files
            .insert(file_name.to_string(), contents.to_string());
        Ok(self.target_path(file_name))
    }

    fn target_path(&self, file_name: &str) -> PathBuf {
        PathBuf::from(file_name)
    }
}
