/*!
 * Append-only storage for translated pages.
 *
 * The existence of an output is the resume marker: the driver never touches
 * an output that already exists, and only ever appends to one it created.
 */

use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::errors::AppError;

/// Storage for per-document translation outputs
pub trait OutputStore: Send + Sync {
    /// Whether an output already exists at `path`
    fn exists(&self, path: &Path) -> bool;

    /// Create `path` empty, truncating anything there
    fn create_empty(&self, path: &Path) -> Result<(), AppError>;

    /// Append `content` to `path` and make it durable before returning
    fn append(&self, path: &Path, content: &str) -> Result<(), AppError>;
}

/// Outputs stored as files on disk
#[derive(Debug, Default, Clone, Copy)]
pub struct FsOutputStore;

impl OutputStore for FsOutputStore {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_empty(&self, path: &Path) -> Result<(), AppError> {
        fs::write(path, "")?;
        Ok(())
    }

    fn append(&self, path: &Path, content: &str) -> Result<(), AppError> {
        // Opened and closed per page so every finished page survives a crash
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.write_all(content.as_bytes())?;
        file.flush()?;
        Ok(())
    }
}

/// Outputs kept in memory, for tests and dry runs
#[derive(Debug, Default)]
pub struct MemoryOutputStore {
    files: Mutex<HashMap<PathBuf, String>>,
}

impl MemoryOutputStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an output, as if a previous run had produced it
    pub fn insert(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.files.lock().insert(path.into(), content.into());
    }

    /// Current content of an output
    pub fn contents(&self, path: &Path) -> Option<String> {
        self.files.lock().get(path).cloned()
    }

    /// Number of outputs held
    pub fn len(&self) -> usize {
        self.files.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.lock().is_empty()
    }
}

impl OutputStore for MemoryOutputStore {
    fn exists(&self, path: &Path) -> bool {
        self.files.lock().contains_key(path)
    }

    fn create_empty(&self, path: &Path) -> Result<(), AppError> {
        self.files.lock().insert(path.to_path_buf(), String::new());
        Ok(())
    }

    fn append(&self, path: &Path, content: &str) -> Result<(), AppError> {
        let mut files = self.files.lock();
        match files.get_mut(path) {
            Some(existing) => {
                existing.push_str(content);
                Ok(())
            }
            None => Err(AppError::File(format!("no output created at {:?}", path))),
        }
    }
}
