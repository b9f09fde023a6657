//! Artifact sinks.
//!
//! Every file couplingmap produces goes through an [`ArtifactSink`], which
//! receives a file name and the complete content. [`DirectorySink`] writes
//! into a directory on disk; [`MemorySink`] keeps the artifacts in memory so
//! tests can inspect them without touching the file system.
//!
//! ```rust,ignore
//! use couplingmap::io::{ArtifactSink, MemorySink};
//!
//! let sink = MemorySink::new();
//! sink.write_artifact("results.md", "# Report")?;
//! assert_eq!(sink.get("results.md").as_deref(), Some("# Report"));
//! ```

use crate::errors::{Error, Result};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Destination for named artifacts.
pub trait ArtifactSink: Send + Sync {
    /// Store `content` under `name`, replacing anything stored there before.
    fn write_artifact(&self, name: &str, content: &str) -> Result<()>;

    /// Where artifacts end up, for messages.
    fn description(&self) -> String;
}

/// Writes each artifact as a file inside one directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_of(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl ArtifactSink for DirectorySink {
    fn write_artifact(&self, name: &str, content: &str) -> Result<()> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root)
                .map_err(|e| Error::output_sink(&self.root, e))?;
        }

        let path = self.path_of(name);
        std::fs::write(&path, content).map_err(|e| Error::output_sink(&path, e))?;
        tracing::debug!(path = %path.display(), bytes = content.len(), "Wrote artifact");
        Ok(())
    }

    fn description(&self) -> String {
        format!("directory:{}", self.root.display())
    }
}

/// In-memory sink, shared between clones.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    artifacts: Arc<RwLock<BTreeMap<String, String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<String> {
        self.artifacts.read().get(name).cloned()
    }

    /// Stored artifact names, sorted.
    pub fn names(&self) -> Vec<String> {
        self.artifacts.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.artifacts.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.read().is_empty()
    }

    pub fn clear(&self) {
        self.artifacts.write().clear();
    }
}

impl ArtifactSink for MemorySink {
    fn write_artifact(&self, name: &str, content: &str) -> Result<()> {
        self.artifacts
            .write()
            .insert(name.to_string(), content.to_string());
        Ok(())
    }

    fn description(&self) -> String {
        "memory".to_string()
    }
}
