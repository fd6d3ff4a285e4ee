use async_stream::stream;

use crate::CandidateStream;
use crate::FileData;
use crate::FileFuture;
use crate::ImportCandidate;
use crate::Mtime;
use crate::SourceOptions;

/// A file-like record in an already-flat collection. Non-recursive
/// counterpart of the tree source families.
pub trait ListEntry {
    /// The file's bare name.
    fn name(&self) -> &str;

    /// Relative path carried by the source, if any. Used as the output
    /// path when present, otherwise the bare name is used.
    fn relative_path(&self) -> Option<&str> {
        None
    }

    /// Materializes the file's byte content and last-modified time.
    fn data<'a>(&'a self) -> FileFuture<'a>;
}

/// Converts a flat collection of file-like records into a lazy stream of
/// import candidates.
///
/// No hidden-file filtering and no directory candidates apply here; each
/// record maps to exactly one file candidate, in collection order. The
/// mtime/mode policy matches the recursive traversal: the file's own
/// last-modified time when [`preserve_mtime`](SourceOptions::preserve_mtime)
/// is set, else the caller-supplied [`mtime`](SourceOptions::mtime).
pub fn list_candidates<'a, I>(files: I, options: SourceOptions) -> CandidateStream<'a>
where
    I: IntoIterator + Send + 'a,
    I::Item: ListEntry + Send + Sync + 'a,
    I::IntoIter: Send,
{
    Box::pin(stream! {
        for file in files {
            let path = file
                .relative_path()
                .unwrap_or_else(|| file.name())
                .to_string();
            match file.data().await {
                Ok(data) => {
                    let (modified, content) = data.into_parts();
                    let mtime = if options.preserve_mtime {
                        Some(modified)
                    } else {
                        options.mtime
                    };
                    yield Ok(ImportCandidate {
                        path,
                        content: Some(content),
                        mtime,
                        mode: options.mode,
                    });
                }
                Err(e) => {
                    yield Err(e);
                }
            }
        }
    })
}

/// An in-memory file usable as a [`ListEntry`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemoryFile {
    name: String,
    relative_path: Option<String>,
    modified: Mtime,
    bytes: Vec<u8>,
}

impl MemoryFile {
    /// Creates a file from a name, content and modification time.
    pub fn new<S: Into<String>>(name: S, bytes: Vec<u8>, modified: Mtime) -> Self {
        Self {
            name: name.into(),
            relative_path: None,
            modified,
            bytes,
        }
    }

    /// Attaches a relative path, used as the output path instead of the
    /// bare name.
    pub fn with_relative_path<S: Into<String>>(mut self, relative_path: S) -> Self {
        self.relative_path = Some(relative_path.into());
        self
    }
}

impl ListEntry for MemoryFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn relative_path(&self) -> Option<&str> {
        self.relative_path.as_deref()
    }

    fn data<'a>(&'a self) -> FileFuture<'a> {
        let data = FileData::from_bytes(self.modified, self.bytes.clone());
        Box::pin(async move { Ok(data) })
    }
}

#[cfg(test)]
mod tests {
    use futures_lite::StreamExt;

    use super::*;

    fn two_files() -> Vec<MemoryFile> {
        vec![
            MemoryFile::new("x.txt", b"ex".to_vec(), Mtime::from_millis(1000)),
            MemoryFile::new("y.txt", b"why".to_vec(), Mtime::from_millis(2000)),
        ]
    }

    #[tokio::test]
    async fn bare_names_become_paths() {
        let mut stream = list_candidates(two_files(), SourceOptions::default());
        let mut paths = Vec::new();
        while let Some(candidate) = stream.next().await {
            paths.push(candidate.unwrap().path);
        }
        assert_eq!(paths, ["x.txt", "y.txt"]);
    }

    #[tokio::test]
    async fn relative_path_wins_over_name() {
        let files = vec![
            MemoryFile::new("x.txt", b"ex".to_vec(), Mtime::new(0, 0))
                .with_relative_path("photos/x.txt"),
        ];
        let mut stream = list_candidates(files, SourceOptions::default());
        let candidate = stream.next().await.unwrap().unwrap();
        assert_eq!(candidate.path, "photos/x.txt");
    }

    #[tokio::test]
    async fn dotfiles_are_not_filtered() {
        let files = vec![MemoryFile::new(".env", b"secret".to_vec(), Mtime::new(0, 0))];
        let mut stream = list_candidates(files, SourceOptions::default());
        assert_eq!(stream.next().await.unwrap().unwrap().path, ".env");
    }

    #[tokio::test]
    async fn mtime_policy_matches_traversal() {
        let options = SourceOptions {
            preserve_mtime: true,
            ..Default::default()
        };
        let mut stream = list_candidates(two_files(), options);
        assert_eq!(
            stream.next().await.unwrap().unwrap().mtime,
            Some(Mtime::new(1, 0))
        );

        let supplied = Mtime::from_millis(5000);
        let options = SourceOptions {
            mtime: Some(supplied),
            ..Default::default()
        };
        let mut stream = list_candidates(two_files(), options);
        assert_eq!(stream.next().await.unwrap().unwrap().mtime, Some(supplied));

        let mut stream = list_candidates(two_files(), SourceOptions::default());
        assert_eq!(stream.next().await.unwrap().unwrap().mtime, None);
    }

    #[tokio::test]
    async fn content_round_trips() {
        let mut stream = list_candidates(two_files(), SourceOptions::default());
        let first = stream.next().await.unwrap().unwrap();
        assert_eq!(first.into_bytes().await.unwrap().unwrap(), b"ex");
    }
}
