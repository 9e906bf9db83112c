//! Plain data types shared by the directory collector and its consumers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Permission level requested when the user grants directory access.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionMode {
    /// Read-only access (default)
    #[default]
    #[serde(rename = "read")]
    Read,
    /// Read and write access
    #[serde(rename = "readwrite")]
    ReadWrite,
}

impl SelectionMode {
    /// Value passed as `mode` to the directory picker.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::ReadWrite => "readwrite",
        }
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options object handed to `showDirectoryPicker`.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct PickerOptions {
    pub mode: SelectionMode,
}

/// A file or directory left out of an enumeration result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedEntry {
    /// Relative path of the file or directory
    pub path: String,
    /// Why it was skipped
    pub reason: String,
}

/// Join a relative path and a child name with the path separator.
///
/// An empty parent yields the child name unchanged.
pub fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}{}{}", parent, crate::config::PATH_SEPARATOR, name)
    }
}
