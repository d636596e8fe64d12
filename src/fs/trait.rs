//! FileSystem trait definition

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Type of file system entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    File,
    Directory,
    Symlink,
}

/// A directory entry returned by read_dir
#[derive(Debug, Clone)]
pub struct DirEntry {
    pub path: PathBuf,
    pub name: String,
    pub file_type: FileType,
}

impl DirEntry {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> &str {
        &self.name
    }

    pub fn is_file(&self) -> bool {
        self.file_type == FileType::File
    }
}

/// Abstraction over file system operations for testability
pub trait FileSystem: Send + Sync {
    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Read file contents as string
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// List directory contents in the order the underlying listing yields them
    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>>;

    /// Create a directory and all missing parents
    fn create_dir_all(&self, path: &Path) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dir_entry() {
        let entry = DirEntry {
            path: PathBuf::from("/project/out/a.json"),
            name: "a.json".to_string(),
            file_type: FileType::File,
        };
        assert_eq!(entry.path(), Path::new("/project/out/a.json"));
        assert_eq!(entry.file_name(), "a.json");
        assert_eq!(entry.file_type, FileType::File);
        assert!(entry.is_file());
    }

    #[test]
    fn test_dir_entry_directory_is_not_file() {
        let entry = DirEntry {
            path: PathBuf::from("/project/out/nested.json"),
            name: "nested.json".to_string(),
            file_type: FileType::Directory,
        };
        assert!(!entry.is_file());
    }
}
