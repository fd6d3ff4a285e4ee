use std::fmt;
use std::pin::Pin;

use futures_lite::Stream;
use futures_lite::StreamExt;
use futures_lite::stream;

use crate::Error;
use crate::Mtime;

/// Lazy byte-chunk sequence holding a file's content.
pub type ContentStream = Pin<Box<dyn Stream<Item = Result<Vec<u8>, Error>> + Send>>;

/// Lazy sequence of import candidates produced by one traversal call.
/// Single-pass and single-use; restart by invoking the traversal again.
pub type CandidateStream<'a> =
    Pin<Box<dyn Stream<Item = Result<ImportCandidate, Error>> + Send + 'a>>;

/// Normalized output record consumed by an import pipeline. Ownership
/// transfers to the consumer when yielded; the traversal keeps no
/// reference to previously emitted candidates.
pub struct ImportCandidate {
    /// Slash-joined relative path, unique within one traversal call.
    pub path: String,
    /// Lazy content, present only for files.
    pub content: Option<ContentStream>,
    /// Optional modification timestamp.
    pub mtime: Option<Mtime>,
    /// Optional POSIX-style file mode.
    pub mode: Option<u32>,
}

impl ImportCandidate {
    /// Drains the content stream into a single buffer. Returns `None` for
    /// directory candidates.
    pub async fn into_bytes(mut self) -> Result<Option<Vec<u8>>, Error> {
        let Some(mut content) = self.content.take() else {
            return Ok(None);
        };
        let mut bytes = Vec::new();
        while let Some(chunk) = content.next().await {
            bytes.extend(chunk?);
        }
        Ok(Some(bytes))
    }
}

impl fmt::Debug for ImportCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImportCandidate")
            .field("path", &self.path)
            .field("content", &self.content.as_ref().map(|_| "..."))
            .field("mtime", &self.mtime)
            .field("mode", &self.mode)
            .finish()
    }
}

/// A materialized file: its own modification time plus lazily consumed
/// content.
pub struct FileData {
    modified: Mtime,
    content: ContentStream,
}

impl FileData {
    /// Creates a `FileData` from a modification time and a content stream.
    pub fn new(modified: Mtime, content: ContentStream) -> Self {
        Self { modified, content }
    }

    /// Wraps an in-memory buffer as a single-chunk content stream.
    pub fn from_bytes(modified: Mtime, bytes: Vec<u8>) -> Self {
        Self {
            modified,
            content: Box::pin(stream::once(Ok(bytes))),
        }
    }

    /// The file's own last-modified time.
    pub fn modified(&self) -> Mtime {
        self.modified
    }

    /// Splits into the modification time and the content stream.
    pub fn into_parts(self) -> (Mtime, ContentStream) {
        (self.modified, self.content)
    }
}

impl fmt::Debug for FileData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileData")
            .field("modified", &self.modified)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn from_bytes_yields_one_chunk() {
        let data = FileData::from_bytes(Mtime::new(1, 0), b"hi".to_vec());
        let (modified, mut content) = data.into_parts();
        assert_eq!(modified, Mtime::new(1, 0));
        assert_eq!(content.next().await.unwrap().unwrap(), b"hi");
        assert!(content.next().await.is_none());
    }

    #[tokio::test]
    async fn into_bytes_drains_content() {
        let candidate = ImportCandidate {
            path: "a.txt".into(),
            content: Some(Box::pin(stream::iter(vec![
                Ok(b"he".to_vec()),
                Ok(b"llo".to_vec()),
            ]))),
            mtime: None,
            mode: None,
        };
        assert_eq!(candidate.into_bytes().await.unwrap().unwrap(), b"hello");
    }

    #[tokio::test]
    async fn into_bytes_is_none_for_directories() {
        let candidate = ImportCandidate {
            path: "dir".into(),
            content: None,
            mtime: None,
            mode: None,
        };
        assert_eq!(candidate.into_bytes().await.unwrap(), None);
    }
}
