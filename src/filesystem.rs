// src/filesystem.rs
// File system port used by storage and config loading, with the real
// implementation and an in-memory one for tests.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use etcetera::{choose_base_strategy, BaseStrategy};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FileSystemError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Path not found: {0}")]
    PathNotFound(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Could not determine home directory: {0}")]
    NoHomeDirectory(String),
}

impl FileSystemError {
    fn from_io(error: io::Error, path: &Path) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => Self::PathNotFound(path.to_string_lossy().into_owned()),
            io::ErrorKind::PermissionDenied => {
                Self::PermissionDenied(path.to_string_lossy().into_owned())
            }
            _ => Self::IoError(error),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait FileSystem {
    fn read_file(&self, path: &Path) -> Result<String, FileSystemError>;

    /// Replace the contents of `path`.
    fn write_file(&self, path: &Path, contents: &str) -> Result<(), FileSystemError>;

    fn path_exists(&self, path: &Path) -> bool;

    fn create_dir_all(&self, path: &Path) -> Result<(), FileSystemError>;

    /// Expand a leading `~` to the home directory.
    fn expand_path(&self, path: &Path) -> Result<PathBuf, FileSystemError>;

    /// Platform configuration directory (e.g. `~/.config`).
    fn config_dir(&self) -> Result<PathBuf, FileSystemError>;

    /// Platform data directory (e.g. `~/.local/share`).
    fn data_dir(&self) -> Result<PathBuf, FileSystemError>;
}

impl<T: FileSystem + ?Sized> FileSystem for &T {
    fn read_file(&self, path: &Path) -> Result<String, FileSystemError> {
        (*self).read_file(path)
    }

    fn write_file(&self, path: &Path, contents: &str) -> Result<(), FileSystemError> {
        (*self).write_file(path, contents)
    }

    fn path_exists(&self, path: &Path) -> bool {
        (*self).path_exists(path)
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), FileSystemError> {
        (*self).create_dir_all(path)
    }

    fn expand_path(&self, path: &Path) -> Result<PathBuf, FileSystemError> {
        (*self).expand_path(path)
    }

    fn config_dir(&self) -> Result<PathBuf, FileSystemError> {
        (*self).config_dir()
    }

    fn data_dir(&self) -> Result<PathBuf, FileSystemError> {
        (*self).data_dir()
    }
}

pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_file(&self, path: &Path) -> Result<String, FileSystemError> {
        fs::read_to_string(path).map_err(|e| FileSystemError::from_io(e, path))
    }

    fn write_file(&self, path: &Path, contents: &str) -> Result<(), FileSystemError> {
        fs::write(path, contents).map_err(|e| FileSystemError::from_io(e, path))
    }

    fn path_exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), FileSystemError> {
        fs::create_dir_all(path).map_err(|e| FileSystemError::from_io(e, path))
    }

    fn expand_path(&self, path: &Path) -> Result<PathBuf, FileSystemError> {
        let binding = path.to_string_lossy();
        let expanded = shellexpand::tilde(&binding);
        Ok(PathBuf::from(expanded.as_ref()))
    }

    fn config_dir(&self) -> Result<PathBuf, FileSystemError> {
        choose_base_strategy()
            .map(|strategy| strategy.config_dir())
            .map_err(|e| FileSystemError::NoHomeDirectory(e.to_string()))
    }

    fn data_dir(&self) -> Result<PathBuf, FileSystemError> {
        choose_base_strategy()
            .map(|strategy| strategy.data_dir())
            .map_err(|e| FileSystemError::NoHomeDirectory(e.to_string()))
    }
}

#[cfg(test)]
impl MockFileSystem {
    pub(crate) fn mock_path_exists(&mut self, path: impl AsRef<Path>, result: bool) {
        let expected = path.as_ref().to_path_buf();
        self.expect_path_exists()
            .withf(move |p| p == expected.as_path())
            .return_const(result);
    }

    pub(crate) fn mock_read_file(&mut self, path: impl AsRef<Path>, contents: &str) {
        let expected = path.as_ref().to_path_buf();
        let contents = contents.to_string();
        self.expect_read_file()
            .withf(move |p| p == expected.as_path())
            .returning(move |_| Ok(contents.clone()));
    }

    pub(crate) fn mock_config_dir(&mut self, path: impl AsRef<Path>) {
        let dir = path.as_ref().to_path_buf();
        self.expect_config_dir().returning(move || Ok(dir.clone()));
    }

    pub(crate) fn mock_data_dir(&mut self, path: impl AsRef<Path>) {
        let dir = path.as_ref().to_path_buf();
        self.expect_data_dir().returning(move || Ok(dir.clone()));
    }

    /// Paths expand to themselves.
    pub(crate) fn mock_expand_path_identity(&mut self) {
        self.expect_expand_path()
            .returning(|p| Ok(p.to_path_buf()));
    }
}

pub mod memory {
    use super::*;
    use std::cell::RefCell;
    use std::collections::{HashMap, HashSet};

    /// File system kept entirely in memory.
    #[derive(Default)]
    pub struct InMemoryFileSystem {
        files: RefCell<HashMap<PathBuf, String>>,
        dirs: RefCell<HashSet<PathBuf>>,
        home: PathBuf,
    }

    impl InMemoryFileSystem {
        pub fn new() -> Self {
            Self::with_home("/home/test")
        }

        pub fn with_home(home: impl Into<PathBuf>) -> Self {
            Self {
                home: home.into(),
                ..Self::default()
            }
        }

        pub fn add_file(&self, path: impl AsRef<Path>, contents: &str) {
            self.files
                .borrow_mut()
                .insert(path.as_ref().to_path_buf(), contents.to_string());
        }

        pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
            self.files.borrow().get(path.as_ref()).cloned()
        }
    }

    impl FileSystem for InMemoryFileSystem {
        fn read_file(&self, path: &Path) -> Result<String, FileSystemError> {
            self.files
                .borrow()
                .get(path)
                .cloned()
                .ok_or_else(|| FileSystemError::PathNotFound(path.to_string_lossy().into_owned()))
        }

        fn write_file(&self, path: &Path, contents: &str) -> Result<(), FileSystemError> {
            self.files
                .borrow_mut()
                .insert(path.to_path_buf(), contents.to_string());
            Ok(())
        }

        fn path_exists(&self, path: &Path) -> bool {
            self.files.borrow().contains_key(path) || self.dirs.borrow().contains(path)
        }

        fn create_dir_all(&self, path: &Path) -> Result<(), FileSystemError> {
            let mut dirs = self.dirs.borrow_mut();
            for ancestor in path.ancestors() {
                dirs.insert(ancestor.to_path_buf());
            }
            Ok(())
        }

        fn expand_path(&self, path: &Path) -> Result<PathBuf, FileSystemError> {
            match path.strip_prefix("~") {
                Ok(rest) => Ok(self.home.join(rest)),
                Err(_) => Ok(path.to_path_buf()),
            }
        }

        fn config_dir(&self) -> Result<PathBuf, FileSystemError> {
            Ok(self.home.join(".config"))
        }

        fn data_dir(&self) -> Result<PathBuf, FileSystemError> {
            Ok(self.home.join(".local").join("share"))
        }
    }
}
