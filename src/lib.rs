//! Adapters that normalize heterogeneous file sources into one uniform,
//! lazy stream of import candidates for a content-addressed import
//! pipeline.
//!
//! Three source families are supported: flat collections of file-like
//! records ([`list_candidates`]), recursive trees whose directories
//! enumerate through a batch cursor ([`Paged`]), and recursive trees
//! with single-pass asynchronous enumeration such as the local
//! filesystem ([`NativeSource`]). The recursive families share one
//! generic traversal ([`candidates`]) parameterized over the
//! [`ItemSource`] capability trait.
//!
//! ```rust
//! # tokio_test::block_on(async {
//! use futures_lite::StreamExt;
//! use import_source::MemoryFile;
//! use import_source::Mtime;
//! use import_source::SourceOptions;
//! use import_source::list_candidates;
//!
//! let files = vec![
//!     MemoryFile::new("x.txt", b"alpha".to_vec(), Mtime::from_millis(1_000)),
//!     MemoryFile::new("y.txt", b"beta".to_vec(), Mtime::from_millis(2_000)),
//! ];
//! let mut stream = list_candidates(files, SourceOptions::default());
//! let mut paths = vec![];
//! while let Some(candidate) = stream.next().await {
//!     paths.push(candidate.unwrap().path);
//! }
//! assert_eq!(paths, ["x.txt", "y.txt"]);
//! # })
//! ```
//!
//! Traversal is strictly sequential and depth-first; consumers control
//! backpressure by pulling at their own pace, and dropping a stream
//! before exhaustion is the only cancellation mechanism.

mod candidate;
mod errors;
mod file_list;
mod mtime;
mod options;
pub mod paged;
mod source;
mod walk;

#[cfg(not(target_arch = "wasm32"))]
mod native;

pub use candidate::CandidateStream;
pub use candidate::ContentStream;
pub use candidate::FileData;
pub use candidate::ImportCandidate;
pub use errors::Error;
pub use file_list::ListEntry;
pub use file_list::MemoryFile;
pub use file_list::list_candidates;
pub use mtime::Mtime;
#[cfg(not(target_arch = "wasm32"))]
pub use native::NativeItem;
#[cfg(not(target_arch = "wasm32"))]
pub use native::NativeSource;
pub use options::SourceOptions;
pub use paged::BatchReader;
pub use paged::Paged;
pub use paged::PagedItems;
pub use source::FileFuture;
pub use source::ItemKind;
pub use source::ItemSource;
pub use source::ItemStream;
pub use walk::candidates;

#[cfg(feature = "test_utils")]
pub mod test_utils;
#[cfg(feature = "test_utils")]
pub use test_utils::TestRoot;
