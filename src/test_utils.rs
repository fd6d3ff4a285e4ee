//! Fixtures shared by the crate's tests: an in-memory paged tree and a
//! temporary on-disk tree.

use std::fs;
use std::fs::create_dir_all;
use std::future::Future;
use std::path::Path as StdPath;

use tempdir::TempDir;

use crate::Error;
use crate::FileData;
use crate::FileFuture;
use crate::ItemKind;
use crate::Mtime;
use crate::paged::BatchReader;
use crate::paged::PagedItems;

/// Node in an in-memory source tree.
#[derive(Debug, Clone)]
pub enum MemNode {
    /// Directory with ordered children.
    Dir {
        /// Directory name.
        name: String,
        /// Children in enumeration order.
        children: Vec<MemNode>,
    },
    /// Regular file.
    File {
        /// File name.
        name: String,
        /// File content.
        bytes: Vec<u8>,
        /// Last-modified time.
        modified: Mtime,
    },
    /// A node that is neither file-like nor directory-like.
    Odd {
        /// Node name.
        name: String,
    },
}

impl MemNode {
    /// Creates a directory node.
    pub fn dir<S: Into<String>>(name: S, children: Vec<MemNode>) -> Self {
        Self::Dir {
            name: name.into(),
            children,
        }
    }

    /// Creates a file node.
    pub fn file<S: Into<String>>(name: S, bytes: Vec<u8>, modified: Mtime) -> Self {
        Self::File {
            name: name.into(),
            bytes,
            modified,
        }
    }

    /// Creates a node of an unsupported kind.
    pub fn odd<S: Into<String>>(name: S) -> Self {
        Self::Odd { name: name.into() }
    }

    /// The node's name.
    pub fn name(&self) -> &str {
        match self {
            Self::Dir { name, .. } | Self::File { name, .. } | Self::Odd { name } => name,
        }
    }
}

/// Batch cursor over an in-memory directory's children.
#[derive(Debug)]
pub struct MemReader {
    queue: Vec<MemNode>,
    batch: usize,
}

impl BatchReader for MemReader {
    type Entry = MemNode;

    fn next_batch(&mut self) -> impl Future<Output = Result<Vec<MemNode>, Error>> + Send {
        let n = self.batch.min(self.queue.len());
        let batch: Vec<_> = self.queue.drain(..n).collect();
        async move { Ok(batch) }
    }
}

/// In-memory paged source with a configurable batch size.
#[derive(Debug)]
pub struct MemFs {
    batch: usize,
}

impl MemFs {
    /// Creates a source whose cursors return at most `batch` children per
    /// poll.
    pub fn new(batch: usize) -> Self {
        assert!(batch > 0, "batch size must be at least 1");
        Self { batch }
    }
}

impl PagedItems for MemFs {
    type Item = MemNode;
    type Reader = MemReader;

    fn name<'a>(&self, item: &'a MemNode) -> &'a str {
        item.name()
    }

    fn kind(&self, item: &MemNode) -> ItemKind {
        match item {
            MemNode::Dir { .. } => ItemKind::Directory,
            MemNode::File { .. } => ItemKind::File,
            MemNode::Odd { .. } => ItemKind::Other,
        }
    }

    fn reader(&self, dir: &MemNode) -> impl Future<Output = Result<MemReader, Error>> + Send {
        let queue = match dir {
            MemNode::Dir { children, .. } => children.clone(),
            _ => Vec::new(),
        };
        let batch = self.batch;
        async move { Ok(MemReader { queue, batch }) }
    }

    fn file<'a>(&'a self, file: &'a MemNode) -> FileFuture<'a> {
        Box::pin(async move {
            match file {
                MemNode::File {
                    bytes, modified, ..
                } => Ok(FileData::from_bytes(*modified, bytes.clone())),
                other => Err(Error::Read {
                    what: other.name().to_string(),
                    how: "not a file".to_string(),
                }),
            }
        })
    }
}

// Relative path, contents and is-directory flag for the sample tree used
// across tests.
pub(crate) static SAMPLE_FILES: &[(&str, &str, bool)] = &[
    ("tree", "", true),
    ("tree/a.txt", "hi", false),
    ("tree/.b", "", false),
    ("tree/C", "", true),
    ("tree/C/c.txt", "see", false),
];

/// Utility structure for managing a temporary test directory and its
/// files.
#[derive(Debug)]
pub struct TestRoot {
    root: TempDir,
}

impl TestRoot {
    /// Creates an empty temporary root.
    pub fn new() -> Result<Self, Error> {
        let root = TempDir::new("import-source").map_err(|e| Error::Create {
            what: "temporary directory".into(),
            how: e.to_string(),
        })?;
        Ok(Self { root })
    }

    /// Creates a temporary root populated with the sample tree.
    pub fn with_sample() -> Result<Self, Error> {
        let ret = Self::new()?;
        for (relative_path, contents, is_dir) in SAMPLE_FILES {
            if *is_dir {
                ret.create_dir(relative_path)?;
            } else {
                ret.create_file(relative_path, contents.as_bytes())?;
            }
        }
        Ok(ret)
    }

    /// Root of the temporary directory.
    pub fn path(&self) -> &StdPath {
        self.root.path()
    }

    /// Creates a directory (and any missing parents) under the root.
    pub fn create_dir(&self, relative_path: &str) -> Result<(), Error> {
        create_dir_all(self.root.path().join(relative_path)).map_err(|e| Error::Create {
            what: relative_path.to_string(),
            how: e.to_string(),
        })
    }

    /// Creates a file with the given content under the root.
    pub fn create_file(&self, relative_path: &str, contents: &[u8]) -> Result<(), Error> {
        let full_path = self.root.path().join(relative_path);
        if let Some(parent) = full_path.parent() {
            create_dir_all(parent).map_err(|e| Error::Create {
                what: relative_path.to_string(),
                how: e.to_string(),
            })?;
        }
        fs::write(&full_path, contents).map_err(|e| Error::Create {
            what: relative_path.to_string(),
            how: e.to_string(),
        })
    }
}
