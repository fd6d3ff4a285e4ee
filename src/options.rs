#[cfg(feature = "poem")]
use poem_openapi::Object;
#[cfg(feature = "json_schema")]
use schemars::JsonSchema;
use serde::Deserialize;
use serde::Serialize;

use crate::Mtime;

/// Per-call configuration for a traversal. All fields are optional in the
/// sense that the default value leaves the corresponding policy off.
#[cfg_attr(feature = "json_schema", derive(JsonSchema))]
#[cfg_attr(feature = "poem", derive(Object))]
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Hash, Eq)]
#[serde(default)]
pub struct SourceOptions {
    /// Include dotfiles in the output. When false (the default), any item
    /// whose name starts with `.` is skipped along with its entire
    /// subtree.
    pub hidden: bool,

    /// Suppress directory candidates so only files are emitted.
    pub only_files: bool,

    /// Path prefix applied to the root item. Must be empty or end with
    /// `/`.
    pub prefix: String,

    /// Derive each file candidate's mtime from the source file's own
    /// last-modified time instead of [`mtime`](Self::mtime).
    pub preserve_mtime: bool,

    /// POSIX-style file mode attached to every candidate.
    pub mode: Option<u32>,

    /// Timestamp attached to candidates. Ignored for files when
    /// [`preserve_mtime`](Self::preserve_mtime) is set.
    pub mtime: Option<Mtime>,
}
