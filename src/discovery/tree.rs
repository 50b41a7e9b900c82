//! Read-only file tree abstractions the scanner walks.

use async_trait::async_trait;

use std::collections::BTreeMap;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::core::error::{LinkScanError, Result};

/// What kind of filesystem object an entry is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    Symlink,
    /// Devices, sockets, pipes and anything else
    Other,
}

/// One entry produced by walking a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    /// Path relative to the tree root, `/`-separated. The root itself is `""`.
    pub path: String,
    pub kind: EntryKind,
}

impl TreeEntry {
    pub fn new(path: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    pub fn is_regular_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}

/// A read-only tree of files that can be walked and read.
#[async_trait]
pub trait FileTree: Send + Sync + 'static {
    /// Every entry of the tree, each visited once, in no promised order.
    ///
    /// The iterator is lazy so that a caller can stop traversal early.
    fn entries(&self) -> Box<dyn Iterator<Item = Result<TreeEntry>> + '_>;

    /// Read the whole content of the file at a tree-relative path.
    async fn read_file(&self, path: &str) -> io::Result<Vec<u8>>;
}

/// Join a relative path's components with `/`.
fn to_tree_path(relative: &Path) -> String {
    relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// A directory on the local filesystem.
///
/// Walked with the `ignore` crate. By default every entry is visited; ignore
/// files (`.gitignore`, `.ignore`) are only honoured when asked. Symbolic
/// links are reported but never followed.
#[derive(Debug, Clone)]
pub struct DirTree {
    root: PathBuf,
    respect_ignore_files: bool,
}

impl DirTree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            respect_ignore_files: false,
        }
    }

    pub fn respect_ignore_files(mut self, respect: bool) -> Self {
        self.respect_ignore_files = respect;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn relative_path(&self, path: &Path) -> String {
        match path.strip_prefix(&self.root) {
            Ok(relative) => to_tree_path(relative),
            Err(_) => to_tree_path(path),
        }
    }

    fn resolve(&self, path: &str) -> io::Result<PathBuf> {
        let relative = Path::new(path);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("path '{path}' is not relative to the tree root"),
            ));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl FileTree for DirTree {
    fn entries(&self) -> Box<dyn Iterator<Item = Result<TreeEntry>> + '_> {
        let mut builder = ignore::WalkBuilder::new(&self.root);
        builder
            .standard_filters(self.respect_ignore_files)
            .hidden(false) // Include hidden files
            .require_git(false)
            .follow_links(false);

        Box::new(builder.build().map(move |entry| {
            let entry = entry.map_err(LinkScanError::from)?;
            let kind = match entry.file_type() {
                Some(file_type) if file_type.is_file() => EntryKind::File,
                Some(file_type) if file_type.is_dir() => EntryKind::Dir,
                Some(file_type) if file_type.is_symlink() => EntryKind::Symlink,
                _ => EntryKind::Other,
            };
            Ok(TreeEntry::new(self.relative_path(entry.path()), kind))
        }))
    }

    async fn read_file(&self, path: &str) -> io::Result<Vec<u8>> {
        tokio::fs::read(self.resolve(path)?).await
    }
}

#[derive(Debug, Clone)]
enum MemoryEntry {
    File(Vec<u8>),
    Dir,
    Symlink,
    /// Listed as a regular file, but every read fails
    Unreadable(io::ErrorKind),
    /// Traversal fails when it reaches this entry
    WalkError(String),
}

/// An in-memory tree, handy for tests and for embedding.
///
/// Parent directories are created implicitly. Entries are walked in
/// lexicographic path order. Every read is recorded and can be inspected
/// with [`MemoryTree::reads`].
#[derive(Debug, Default)]
pub struct MemoryTree {
    entries: BTreeMap<String, MemoryEntry>,
    read_delay: Option<Duration>,
    reads: Arc<Mutex<Vec<String>>>,
}

impl MemoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(mut self, path: &str, entry: MemoryEntry) -> Self {
        let path = path.trim_matches('/');
        let mut parent = Path::new(path).parent();
        while let Some(dir) = parent {
            let dir_path = to_tree_path(dir);
            if dir_path.is_empty() {
                break;
            }
            self.entries.entry(dir_path).or_insert(MemoryEntry::Dir);
            parent = dir.parent();
        }
        self.entries.insert(path.to_string(), entry);
        self
    }

    pub fn with_file(self, path: &str, content: impl Into<Vec<u8>>) -> Self {
        self.insert(path, MemoryEntry::File(content.into()))
    }

    pub fn with_dir(self, path: &str) -> Self {
        self.insert(path, MemoryEntry::Dir)
    }

    pub fn with_symlink(self, path: &str) -> Self {
        self.insert(path, MemoryEntry::Symlink)
    }

    /// A regular file whose reads fail with `kind`.
    pub fn with_unreadable_file(self, path: &str, kind: io::ErrorKind) -> Self {
        self.insert(path, MemoryEntry::Unreadable(kind))
    }

    /// An entry whose traversal fails, like an unreadable directory.
    pub fn with_walk_error(self, path: &str, message: &str) -> Self {
        self.insert(path, MemoryEntry::WalkError(message.to_string()))
    }

    /// Make every read sleep first, to keep scan tasks in flight.
    pub fn with_read_delay(mut self, delay: Duration) -> Self {
        self.read_delay = Some(delay);
        self
    }

    /// Paths read so far, in the order reads started.
    pub fn reads(&self) -> Vec<String> {
        self.reads
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl FileTree for MemoryTree {
    fn entries(&self) -> Box<dyn Iterator<Item = Result<TreeEntry>> + '_> {
        let root = std::iter::once(Ok(TreeEntry::new("", EntryKind::Dir)));
        let rest = self.entries.iter().map(|(path, entry)| match entry {
            MemoryEntry::File(_) | MemoryEntry::Unreadable(_) => {
                Ok(TreeEntry::new(path.clone(), EntryKind::File))
            }
            MemoryEntry::Dir => Ok(TreeEntry::new(path.clone(), EntryKind::Dir)),
            MemoryEntry::Symlink => Ok(TreeEntry::new(path.clone(), EntryKind::Symlink)),
            MemoryEntry::WalkError(message) => Err(LinkScanError::Io(io::Error::other(
                format!("{path}: {message}"),
            ))),
        });
        Box::new(root.chain(rest))
    }

    async fn read_file(&self, path: &str) -> io::Result<Vec<u8>> {
        self.reads
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(path.to_string());

        if let Some(delay) = self.read_delay {
            tokio::time::sleep(delay).await;
        }

        match self.entries.get(path) {
            Some(MemoryEntry::File(content)) => Ok(content.clone()),
            Some(MemoryEntry::Unreadable(kind)) => {
                Err(io::Error::new(*kind, format!("cannot read {path}")))
            }
            Some(_) => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{path} is not a regular file"),
            )),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{path} does not exist"),
            )),
        }
    }
}
