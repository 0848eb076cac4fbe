use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use parking_lot::RwLock;

/// Reads source documents and writes generated artifacts. Writes always
/// replace the whole artifact.
pub trait ArtifactStore: Send + Sync {
    fn read_artifact(&self, path: &Path) -> Result<String>;
    fn write_artifact(&self, path: &Path, contents: &str) -> Result<()>;
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    artifacts: Arc<RwLock<HashMap<PathBuf, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        self.artifacts.write().insert(path.into(), contents.into());
    }

    pub fn get(&self, path: &Path) -> Option<String> {
        self.artifacts.read().get(path).cloned()
    }

    pub fn len(&self) -> usize {
        self.artifacts.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.read().is_empty()
    }
}

impl ArtifactStore for MemoryStore {
    fn read_artifact(&self, path: &Path) -> Result<String> {
        self.get(path)
            .with_context(|| format!("no artifact stored at {}", path.display()))
    }

    fn write_artifact(&self, path: &Path, contents: &str) -> Result<()> {
        self.insert(path, contents);
        Ok(())
    }
}

/// Filesystem store. Relative paths resolve against `root`.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn current_dir() -> Result<Self> {
        let root = std::env::current_dir().context("failed resolving working directory")?;
        Ok(Self::new(root))
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl ArtifactStore for FileStore {
    fn read_artifact(&self, path: &Path) -> Result<String> {
        let full = self.resolve(path);
        fs::read_to_string(&full)
            .with_context(|| format!("failed reading artifact at {}", full.display()))
    }

    // Staged in a sibling file and renamed into place so a failed write
    // never leaves a truncated artifact behind.
    fn write_artifact(&self, path: &Path, contents: &str) -> Result<()> {
        let full = self.resolve(path);
        let staging = staging_path(&full);

        fs::write(&staging, contents)
            .with_context(|| format!("failed writing staging file {}", staging.display()))?;

        if let Err(err) = fs::rename(&staging, &full) {
            let _ = fs::remove_file(&staging);
            return Err(err)
                .with_context(|| format!("failed replacing artifact at {}", full.display()));
        }

        Ok(())
    }
}

fn staging_path(target: &Path) -> PathBuf {
    let mut name = target
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| "artifact".into());
    name.push(".tmp");
    target.with_file_name(name)
}

#[derive(Clone)]
pub enum Store {
    Memory(MemoryStore),
    File(FileStore),
}

impl Store {
    pub fn memory() -> Self {
        Self::Memory(MemoryStore::new())
    }

    pub fn file(root: impl Into<PathBuf>) -> Self {
        Self::File(FileStore::new(root))
    }
}

impl ArtifactStore for Store {
    fn read_artifact(&self, path: &Path) -> Result<String> {
        match self {
            Store::Memory(store) => store.read_artifact(path),
            Store::File(store) => store.read_artifact(path),
        }
    }

    fn write_artifact(&self, path: &Path, contents: &str) -> Result<()> {
        match self {
            Store::Memory(store) => store.write_artifact(path, contents),
            Store::File(store) => store.write_artifact(path, contents),
        }
    }
}
