use std::future::Future;
use std::pin::Pin;

use futures_lite::Stream;
#[cfg(feature = "json_schema")]
use schemars::JsonSchema;
use serde::Deserialize;
use serde::Serialize;

use crate::Error;
use crate::FileData;

/// The kind of a source item as reported by its source family.
#[cfg_attr(feature = "json_schema", derive(JsonSchema))]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Hash, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// File-like: can produce byte content and a last-modified time.
    File,
    /// Directory-like: can enumerate children.
    Directory,
    /// Anything else (sockets, fifos, ...). Traversal reports these as
    /// [`Error::UnsupportedKind`].
    Other,
}

/// Lazy sequence of child items produced by enumerating one directory.
/// Enumeration failures flow through as `Err` items.
pub type ItemStream<'a, T> = Pin<Box<dyn Stream<Item = Result<T, Error>> + Send + 'a>>;

/// Future resolving to a materialized file.
pub type FileFuture<'a> = Pin<Box<dyn Future<Output = Result<FileData, Error>> + Send + 'a>>;

/// Capability set parameterizing the generic traversal over one source
/// family: read an item's name and kind, enumerate a directory's
/// children, and materialize a file's content.
///
/// Implementations must not require any ordering of enumerated children;
/// the traversal visits them in the order the stream yields them, and
/// that order's stability is a property of the underlying source.
pub trait ItemSource {
    /// One file or directory exposed by this source family.
    type Item: Send + Sync + 'static;

    /// The item's own name, without any path separators.
    fn name<'a>(&self, item: &'a Self::Item) -> &'a str;

    /// Reports whether the item is file-like or directory-like.
    fn kind(&self, item: &Self::Item) -> ItemKind;

    /// Lazily enumerates the children of a directory-like item.
    fn entries<'a>(&'a self, dir: &'a Self::Item) -> ItemStream<'a, Self::Item>;

    /// Materializes a file-like item's byte content and last-modified
    /// time.
    fn file<'a>(&'a self, file: &'a Self::Item) -> FileFuture<'a>;
}
