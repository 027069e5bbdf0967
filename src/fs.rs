use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::error::{Result, StoreError};

/// Whole-file access to the store's base directory. Paths are relative to
/// the base; keeping them inside it is the implementation's job.
pub trait Filesystem {
    fn base(&self) -> &Path;

    /// The base must exist, be a directory, and be listable.
    fn check_base(&self) -> Result<()>;

    /// Refuse a path that could never be read or written, before it is
    /// recorded anywhere.
    fn check_path(&self, path: &Path) -> Result<()>;

    fn exists(&self, path: &Path) -> Result<bool>;

    fn read_to_string(&self, path: &Path) -> Result<String>;

    fn write(&self, path: &Path, contents: &str) -> Result<()>;
}

/// The local disk, rooted at a base directory.
#[derive(Debug, Clone)]
pub struct LocalFs {
    base: PathBuf,
}

impl LocalFs {
    pub fn new(base: impl Into<PathBuf>) -> LocalFs {
        LocalFs { base: base.into() }
    }

    /// Join `path` onto the base, refusing anything that could leave it.
    pub fn resolve(&self, path: &Path) -> Result<PathBuf> {
        if path.as_os_str().is_empty() {
            return Err(StoreError::Validation("path is empty".into()));
        }
        let confined = path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if !confined {
            return Err(StoreError::Validation(format!(
                "path escapes the base directory: {}",
                path.display()
            )));
        }
        Ok(self.base.join(path))
    }
}

impl Filesystem for LocalFs {
    fn base(&self) -> &Path {
        &self.base
    }

    fn check_base(&self) -> Result<()> {
        let metadata = fs::metadata(&self.base).map_err(|e| StoreError::io(&self.base, e))?;
        if !metadata.is_dir() {
            return Err(StoreError::io(
                &self.base,
                io::Error::other("base dir is not a directory"),
            ));
        }
        fs::read_dir(&self.base).map_err(|e| StoreError::io(&self.base, e))?;
        Ok(())
    }

    fn check_path(&self, path: &Path) -> Result<()> {
        self.resolve(path).map(drop)
    }

    fn exists(&self, path: &Path) -> Result<bool> {
        let path = self.resolve(path)?;
        path.try_exists().map_err(|e| StoreError::io(path, e))
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        let path = self.resolve(path)?;
        let metadata = fs::metadata(&path).map_err(|e| StoreError::io(&path, e))?;
        if !metadata.is_file() {
            return Err(StoreError::io(path, io::Error::other("not a file")));
        }
        fs::read_to_string(&path).map_err(|e| StoreError::io(path, e))
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        let path = self.resolve(path)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }
        fs::write(&path, contents).map_err(|e| StoreError::io(path, e))
    }
}
