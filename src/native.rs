use std::fs::FileType;
use std::path::Path as StdPath;
use std::path::PathBuf;
use std::time::SystemTime;

use async_stream::stream;
use futures_lite::StreamExt;
use tokio::io::AsyncReadExt;

use crate::CandidateStream;
use crate::ContentStream;
use crate::Error;
use crate::FileData;
use crate::FileFuture;
use crate::ItemKind;
use crate::ItemSource;
use crate::ItemStream;
use crate::Mtime;
use crate::SourceOptions;
use crate::walk;

const CHUNK_SIZE: usize = 8192;

fn read_err(path: &StdPath, e: impl ToString) -> Error {
    Error::Read {
        what: path.to_string_lossy().to_string(),
        how: e.to_string(),
    }
}

fn kind_of(file_type: &FileType) -> ItemKind {
    if file_type.is_dir() {
        ItemKind::Directory
    } else if file_type.is_file() {
        ItemKind::File
    } else {
        ItemKind::Other
    }
}

/// One file or directory on the local filesystem. Name and kind are
/// captured when the item is enumerated so the traversal never has to
/// stat an item twice.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NativeItem {
    path: PathBuf,
    name: String,
    kind: ItemKind,
}

impl NativeItem {
    /// Creates a root item by reading the path's metadata.
    pub async fn from_path<P: AsRef<StdPath>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();
        let metadata = tokio::fs::metadata(&path)
            .await
            .map_err(|e| read_err(&path, e))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self {
            name,
            kind: kind_of(&metadata.file_type()),
            path,
        })
    }

    /// The item's absolute or caller-relative location on disk.
    pub fn path(&self) -> &StdPath {
        &self.path
    }
}

/// [`ItemSource`] implementation over the local filesystem. Directory
/// enumeration is a single asynchronous pass over `read_dir`; file
/// content is read lazily in fixed-size chunks.
pub struct NativeSource;

impl NativeSource {
    /// Walks `item` and produces a lazy stream of import candidates.
    /// See [`candidates`](crate::candidates).
    pub fn candidates<'a>(
        &'a self,
        item: NativeItem,
        options: SourceOptions,
    ) -> CandidateStream<'a> {
        walk::candidates(self, item, options)
    }
}

fn read_chunks(path: PathBuf) -> ContentStream {
    Box::pin(stream! {
        let mut file = match tokio::fs::File::open(&path).await {
            Ok(file) => file,
            Err(e) => {
                yield Err(read_err(&path, e));
                return;
            }
        };
        let mut buffer = vec![0u8; CHUNK_SIZE];
        loop {
            let n = match file.read(&mut buffer).await {
                Ok(n) => n,
                Err(e) => {
                    yield Err(read_err(&path, e));
                    return;
                }
            };
            if n == 0 {
                break;
            }
            yield Ok(buffer[..n].to_vec());
        }
    })
}

impl ItemSource for NativeSource {
    type Item = NativeItem;

    fn name<'a>(&self, item: &'a NativeItem) -> &'a str {
        &item.name
    }

    fn kind(&self, item: &NativeItem) -> ItemKind {
        item.kind
    }

    fn entries<'a>(&'a self, dir: &'a NativeItem) -> ItemStream<'a, NativeItem> {
        Box::pin(stream! {
            let mut entries = match async_fs::read_dir(&dir.path).await {
                Ok(entries) => entries,
                Err(e) => {
                    yield Err(read_err(&dir.path, e));
                    return;
                }
            };
            while let Some(entry) = entries.next().await {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        yield Err(read_err(&dir.path, e));
                        return;
                    }
                };
                let path = entry.path();
                match entry.file_type().await {
                    Ok(file_type) => {
                        yield Ok(NativeItem {
                            name: entry.file_name().to_string_lossy().into_owned(),
                            kind: kind_of(&file_type),
                            path,
                        });
                    }
                    Err(e) => {
                        yield Err(read_err(&path, e));
                    }
                }
            }
        })
    }

    fn file<'a>(&'a self, item: &'a NativeItem) -> FileFuture<'a> {
        Box::pin(async move {
            let metadata = tokio::fs::metadata(&item.path)
                .await
                .map_err(|e| read_err(&item.path, e))?;
            let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
            Ok(FileData::new(
                Mtime::from_system_time(modified),
                read_chunks(item.path.clone()),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use futures_lite::StreamExt;

    use super::*;
    use crate::test_utils::TestRoot;

    async fn collect_paths(mut stream: CandidateStream<'_>) -> Vec<String> {
        let mut paths = Vec::new();
        while let Some(candidate) = stream.next().await {
            paths.push(candidate.unwrap().path);
        }
        paths.sort();
        paths
    }

    #[tokio::test]
    async fn walks_sample_tree() {
        let root = TestRoot::with_sample().unwrap();
        let source = NativeSource;
        let item = NativeItem::from_path(root.path().join("tree")).await.unwrap();
        let paths = collect_paths(source.candidates(item, SourceOptions::default())).await;
        assert_eq!(paths, ["tree", "tree/C", "tree/C/c.txt", "tree/a.txt"]);
    }

    #[tokio::test]
    async fn hidden_files_on_disk_are_included_on_request() {
        let root = TestRoot::with_sample().unwrap();
        let source = NativeSource;
        let item = NativeItem::from_path(root.path().join("tree")).await.unwrap();
        let options = SourceOptions {
            hidden: true,
            only_files: true,
            ..Default::default()
        };
        let paths = collect_paths(source.candidates(item, options)).await;
        assert_eq!(paths, ["tree/.b", "tree/C/c.txt", "tree/a.txt"]);
    }

    #[tokio::test]
    async fn file_content_round_trips() {
        let root = TestRoot::with_sample().unwrap();
        let source = NativeSource;
        let item = NativeItem::from_path(root.path().join("tree/a.txt"))
            .await
            .unwrap();
        let mut stream = source.candidates(item, SourceOptions::default());
        let candidate = stream.next().await.unwrap().unwrap();
        assert_eq!(candidate.path, "a.txt");
        assert_eq!(candidate.into_bytes().await.unwrap().unwrap(), b"hi");
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn preserve_mtime_matches_disk() {
        let root = TestRoot::with_sample().unwrap();
        let disk_path = root.path().join("tree/a.txt");
        let disk_mtime = Mtime::from_system_time(
            std::fs::metadata(&disk_path).unwrap().modified().unwrap(),
        );

        let source = NativeSource;
        let item = NativeItem::from_path(&disk_path).await.unwrap();
        let options = SourceOptions {
            preserve_mtime: true,
            ..Default::default()
        };
        let mut stream = source.candidates(item, options);
        let candidate = stream.next().await.unwrap().unwrap();
        assert_eq!(candidate.mtime, Some(disk_mtime));
    }

    #[tokio::test]
    async fn vanished_directory_yields_read_error() {
        let root = TestRoot::new().unwrap();
        root.create_dir("sub").unwrap();
        let item = NativeItem::from_path(root.path().join("sub")).await.unwrap();
        std::fs::remove_dir(root.path().join("sub")).unwrap();

        let source = NativeSource;
        let mut stream = source.candidates(item, SourceOptions::default());
        let first = stream.next().await.unwrap();
        assert!(first.is_ok(), "directory candidate is emitted first");
        let second = stream.next().await.unwrap();
        assert!(matches!(second, Err(Error::Read { .. })));
        assert!(stream.next().await.is_none());
    }
}
