//! Collected file entries and the enumeration result.

use std::cell::OnceCell;
use std::rc::Rc;

use super::{BlobOf, DirectoryHandle, FileBlob};
use crate::core::error::HostError;
use crate::models::SkippedEntry;

/// One file discovered under the selected directory.
///
/// Metadata is captured when the entry is built. Content stays in the host
/// blob until [`read_bytes`](Self::read_bytes) is called; the first
/// successful read is kept, so content is materialized at most once.
pub struct FileEntry<D: DirectoryHandle> {
    name: String,
    media_type: String,
    relative_path: String,
    size: u64,
    last_modified: Option<f64>,
    blob: BlobOf<D>,
    parent: Option<D>,
    bytes: OnceCell<Rc<[u8]>>,
}

impl<D: DirectoryHandle> FileEntry<D> {
    /// Build an entry found by walking a directory handle.
    pub fn from_walk(blob: BlobOf<D>, relative_path: String, parent: D) -> Self {
        Self::build(blob, relative_path, Some(parent))
    }

    /// Build an entry from a host file list, which carries its own relative path.
    ///
    /// Falls back to the leaf name when the host reports no path.
    pub fn from_file_list(blob: BlobOf<D>) -> Self {
        let relative_path = blob
            .relative_path_hint()
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| blob.name());
        Self::build(blob, relative_path, None)
    }

    fn build(blob: BlobOf<D>, relative_path: String, parent: Option<D>) -> Self {
        Self {
            name: blob.name(),
            media_type: blob.media_type(),
            size: blob.size(),
            last_modified: blob.last_modified(),
            relative_path,
            blob,
            parent,
            bytes: OnceCell::new(),
        }
    }

    /// Leaf name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared media type. May be empty.
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// Path from the selection root, root name included.
    pub fn relative_path(&self) -> &str {
        &self.relative_path
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Last modification time in milliseconds since the Unix epoch.
    pub fn last_modified(&self) -> Option<f64> {
        self.last_modified
    }

    /// Immediate containing directory. `None` for host file lists.
    #[cfg(test)]
    pub fn parent(&self) -> Option<&D> {
        self.parent.as_ref()
    }

    /// Read the file content, reusing the first successful read.
    pub async fn read_bytes(&self) -> Result<Rc<[u8]>, HostError> {
        if let Some(bytes) = self.bytes.get() {
            return Ok(Rc::clone(bytes));
        }
        let bytes: Rc<[u8]> = self.blob.read().await?.into();
        Ok(Rc::clone(self.bytes.get_or_init(|| bytes)))
    }
}

impl<D: DirectoryHandle> std::fmt::Debug for FileEntry<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileEntry")
            .field("relative_path", &self.relative_path)
            .field("media_type", &self.media_type)
            .field("size", &self.size)
            .field("has_parent", &self.parent.is_some())
            .finish()
    }
}

/// Everything one `collect` call found.
///
/// Files are ordered depth-first: for each directory, the flattened results
/// of its subdirectories come first, then its own files. Sibling order is
/// whatever the host's iteration yields.
pub struct EnumerationResult<D: DirectoryHandle> {
    files: Vec<FileEntry<D>>,
    skipped: Vec<SkippedEntry>,
}

impl<D: DirectoryHandle> EnumerationResult<D> {
    pub fn new(files: Vec<FileEntry<D>>) -> Self {
        Self {
            files,
            skipped: Vec::new(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// A result holding nothing but one skipped path.
    pub fn skipped_only(path: String, reason: String) -> Self {
        Self {
            files: Vec::new(),
            skipped: vec![SkippedEntry { path, reason }],
        }
    }

    #[cfg(test)]
    pub fn files(&self) -> &[FileEntry<D>] {
        &self.files
    }

    /// Entries left out because they could not be read.
    pub fn skipped(&self) -> &[SkippedEntry] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FileEntry<D>> {
        self.files.iter()
    }

    pub fn push(&mut self, entry: FileEntry<D>) {
        self.files.push(entry);
    }

    pub fn push_skipped(&mut self, path: String, reason: String) {
        self.skipped.push(SkippedEntry { path, reason });
    }

    /// Record entries skipped after enumeration, e.g. when reading content.
    pub fn extend_skipped(&mut self, skipped: impl IntoIterator<Item = SkippedEntry>) {
        self.skipped.extend(skipped);
    }

    /// Append another result, keeping order.
    pub fn append(&mut self, mut other: Self) {
        self.files.append(&mut other.files);
        self.skipped.append(&mut other.skipped);
    }
}

impl<D: DirectoryHandle> Default for EnumerationResult<D> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<D: DirectoryHandle> std::fmt::Debug for EnumerationResult<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnumerationResult")
            .field("files", &self.files)
            .field("skipped", &self.skipped)
            .finish()
    }
}

impl<'a, D: DirectoryHandle> IntoIterator for &'a EnumerationResult<D> {
    type Item = &'a FileEntry<D>;
    type IntoIter = std::slice::Iter<'a, FileEntry<D>>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}
