use super::{DirEntry, FileSystem, FileType};
use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

#[derive(Debug, Clone)]
pub struct MockEntry {
    pub content: Option<String>,
    pub file_type: FileType,
    pub readable: bool,
    seq: u64,
}

#[derive(Default)]
struct MockTree {
    entries: HashMap<PathBuf, MockEntry>,
    next_seq: u64,
}

impl MockTree {
    fn insert(
        &mut self,
        path: PathBuf,
        content: Option<String>,
        file_type: FileType,
        readable: bool,
    ) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.insert(
            path,
            MockEntry {
                content,
                file_type,
                readable,
                seq,
            },
        );
    }

    fn ensure_parents(&mut self, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            if !self.entries.contains_key(&current) {
                self.insert(current.clone(), None, FileType::Directory, true);
            }
        }
    }
}

/// In-memory filesystem. `read_dir` yields entries in insertion order, which
/// stands in for the unspecified order of a real directory listing.
pub struct MockFileSystem {
    tree: RwLock<MockTree>,
    root: PathBuf,
}

impl MockFileSystem {
    /// Empty tree; relative paths resolve under `/mock`
    pub fn new() -> Self {
        Self {
            tree: RwLock::new(MockTree::default()),
            root: PathBuf::from("/mock"),
        }
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: &str) {
        self.add_entry(path.as_ref(), Some(content.to_string()), true);
    }

    /// Adds a file that exists but fails every read
    pub fn add_unreadable_file(&self, path: impl AsRef<Path>) {
        self.add_entry(path.as_ref(), Some(String::new()), false);
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let path = self.normalize_path(path.as_ref());
        let mut tree = self.tree.write().unwrap();
        tree.ensure_parents(&path);
    }

    fn add_entry(&self, path: &Path, content: Option<String>, readable: bool) {
        let path = self.normalize_path(path);
        let mut tree = self.tree.write().unwrap();
        if let Some(parent) = path.parent() {
            tree.ensure_parents(parent);
        }
        tree.insert(path, content, FileType::File, readable);
    }

    fn normalize_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    fn entry_type(&self, path: &Path) -> Option<FileType> {
        let path = self.normalize_path(path);
        self.tree
            .read()
            .unwrap()
            .entries
            .get(&path)
            .map(|e| e.file_type)
    }
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MockFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.entry_type(path).is_some()
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.entry_type(path) == Some(FileType::Directory)
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        let path = self.normalize_path(path);
        let tree = self.tree.read().unwrap();
        let entry = tree
            .entries
            .get(&path)
            .ok_or_else(|| anyhow!("File not found: {:?}", path))?;

        if !entry.readable {
            return Err(anyhow!("Permission denied: {:?}", path));
        }

        entry
            .content
            .clone()
            .ok_or_else(|| anyhow!("Not a file: {:?}", path))
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        let path = self.normalize_path(path);
        let tree = self.tree.read().unwrap();

        if !tree.entries.contains_key(&path) {
            return Err(anyhow!("Directory not found: {:?}", path));
        }

        let mut children: Vec<(&PathBuf, &MockEntry)> = tree
            .entries
            .iter()
            .filter(|(file_path, _)| file_path.parent() == Some(path.as_path()))
            .collect();
        children.sort_by_key(|(_, entry)| entry.seq);

        Ok(children
            .into_iter()
            .map(|(file_path, entry)| DirEntry {
                path: file_path.clone(),
                name: file_path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("")
                    .to_string(),
                file_type: entry.file_type,
            })
            .collect())
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        let path = self.normalize_path(path);
        let mut tree = self.tree.write().unwrap();
        if let Some(entry) = tree.entries.get(&path) {
            if entry.file_type != FileType::Directory {
                return Err(anyhow!("Not a directory: {:?}", path));
            }
            return Ok(());
        }
        tree.ensure_parents(&path);
        Ok(())
    }
}
