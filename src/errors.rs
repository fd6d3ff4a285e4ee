use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

/// Represents all possible errors in the import-source crate.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Hash, Eq)]
pub enum Error {
    /// Error indicating a failure to read data from a source, either while
    /// enumerating a directory or while materializing a file's content.
    #[error("Failed to read {what}: {how}")]
    Read {
        /// The item that failed to be read.
        what: String,
        /// The reason for the failure.
        how: String,
    },

    /// Error indicating a failure to create a file or directory.
    #[error("Failed to create {what}: {how}")]
    Create {
        /// The item that failed to be created.
        what: String,
        /// The reason for the failure.
        how: String,
    },

    /// Error indicating an invalid argument was provided.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Error indicating a source item that is neither file-like nor
    /// directory-like. Fatal for the branch it occurs in; siblings are
    /// unaffected.
    #[error("Unsupported item kind: {what}")]
    UnsupportedKind {
        /// Path of the offending item.
        what: String,
    },
}
