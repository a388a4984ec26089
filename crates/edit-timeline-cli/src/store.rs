//! JSON state file on disk.

use std::path::{Path, PathBuf};

use anyhow::Context;

/// A persisted timeline at a fixed path.
#[derive(Debug, Clone)]
pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw JSON text; `None` when the file doesn't exist yet.
    pub fn read(&self) -> anyhow::Result<Option<String>> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no state file, starting empty");
            return Ok(None);
        }
        let text = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        Ok(Some(text))
    }

    pub fn write(&self, json: &str) -> anyhow::Result<()> {
        std::fs::write(&self.path, json)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        tracing::debug!(path = %self.path.display(), "saved timeline state");
        Ok(())
    }
}
