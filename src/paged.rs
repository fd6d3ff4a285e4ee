//! Adapter for source families whose directory enumeration pages
//! through a batch cursor.

use std::future::Future;

use async_stream::stream;

use crate::CandidateStream;
use crate::Error;
use crate::FileFuture;
use crate::ItemKind;
use crate::ItemSource;
use crate::ItemStream;
use crate::SourceOptions;
use crate::walk;

/// Directory listing cursor that returns children in batches.
///
/// A single poll is not guaranteed to return all children; the cursor
/// must be re-polled until it returns an empty batch. This mirrors the
/// behavior of legacy listing APIs that page their results.
pub trait BatchReader {
    /// Child item type produced by the cursor.
    type Entry: Send + Sync + 'static;

    /// Returns the next batch of children, or an empty batch once the
    /// listing is exhausted.
    fn next_batch(&mut self) -> impl Future<Output = Result<Vec<Self::Entry>, Error>> + Send;
}

/// Capability set for source families whose directories enumerate
/// through a batch cursor.
pub trait PagedItems {
    /// One file or directory exposed by this source family.
    type Item: Send + Sync + 'static;
    /// Cursor handed out per enumerated directory.
    type Reader: BatchReader<Entry = Self::Item> + Send + 'static;

    /// The item's own name, without any path separators.
    fn name<'a>(&self, item: &'a Self::Item) -> &'a str;

    /// Reports whether the item is file-like or directory-like.
    fn kind(&self, item: &Self::Item) -> ItemKind;

    /// Opens a fresh cursor over a directory-like item's children.
    fn reader(&self, dir: &Self::Item) -> impl Future<Output = Result<Self::Reader, Error>> + Send;

    /// Materializes a file-like item's byte content and last-modified
    /// time.
    fn file<'a>(&'a self, file: &'a Self::Item) -> FileFuture<'a>;
}

/// Adapts a paged source into the generic [`ItemSource`] capability set
/// by flattening each directory's cursor into one lazy child stream.
pub struct Paged<P> {
    inner: P,
}

impl<P> Paged<P>
where
    P: PagedItems + Sync,
{
    /// Wraps a paged source.
    pub fn new(inner: P) -> Self {
        Self { inner }
    }

    /// Walks `item` and produces a lazy stream of import candidates.
    /// See [`candidates`](crate::candidates).
    pub fn candidates<'a>(
        &'a self,
        item: P::Item,
        options: SourceOptions,
    ) -> CandidateStream<'a> {
        walk::candidates(self, item, options)
    }
}

impl<P> ItemSource for Paged<P>
where
    P: PagedItems + Sync,
{
    type Item = P::Item;

    fn name<'a>(&self, item: &'a Self::Item) -> &'a str {
        self.inner.name(item)
    }

    fn kind(&self, item: &Self::Item) -> ItemKind {
        self.inner.kind(item)
    }

    fn entries<'a>(&'a self, dir: &'a Self::Item) -> ItemStream<'a, Self::Item> {
        Box::pin(stream! {
            let mut reader = match self.inner.reader(dir).await {
                Ok(reader) => reader,
                Err(e) => {
                    yield Err(e);
                    return;
                }
            };
            loop {
                let batch = match reader.next_batch().await {
                    Ok(batch) => batch,
                    Err(e) => {
                        yield Err(e);
                        return;
                    }
                };
                if batch.is_empty() {
                    break;
                }
                for entry in batch {
                    yield Ok(entry);
                }
            }
        })
    }

    fn file<'a>(&'a self, file: &'a Self::Item) -> FileFuture<'a> {
        self.inner.file(file)
    }
}
