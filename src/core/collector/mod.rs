//! Directory file collector.
//!
//! Asks the user for a directory and returns every file nested anywhere
//! inside it as a flat [`EnumerationResult`].
//!
//! Two acquisition strategies implement [`DirectorySource`]:
//!
//! - [`NativeSource`] prompts for a directory handle and walks it
//!   recursively (File System Access API)
//! - [`FallbackSource`] opens a directory-upload file input and takes the
//!   host's flattened file list
//!
//! [`Acquisition`] picks one of them per call, so callers never need to know
//! which path ran. Storage is reached only through the [`DirectoryHandle`],
//! [`FileHandle`] and [`FileBlob`] traits: the browser implementation lives
//! in [`web`], an in-memory one in [`memory`].

mod entry;
#[cfg(any(test, feature = "mock"))]
pub mod memory;
mod source;
mod walk;
pub mod web;

use futures::future::LocalBoxFuture;

use crate::core::error::{CollectError, HostError};
use crate::models::SelectionMode;

pub use entry::{EnumerationResult, FileEntry};
pub use source::{DirectoryPicker, FallbackSource, FilePrompt, NativeSource};
pub use walk::walk;
pub use web::collect;

/// Blob type produced by a directory handle's files.
pub type BlobOf<D> = <<D as DirectoryHandle>::File as FileHandle>::Blob;

// =============================================================================
// Storage Traits
// =============================================================================

/// Materialized file: metadata plus lazily readable content.
pub trait FileBlob: Clone + 'static {
    fn name(&self) -> String;

    /// Declared media type, possibly empty.
    fn media_type(&self) -> String;

    fn size(&self) -> u64;

    fn last_modified(&self) -> Option<f64> {
        None
    }

    /// Relative path the host attached to the file, if any.
    fn relative_path_hint(&self) -> Option<String> {
        None
    }

    /// Read the whole content.
    fn read(&self) -> LocalBoxFuture<'static, Result<Vec<u8>, HostError>>;
}

/// Handle to a file inside a granted directory.
pub trait FileHandle: 'static {
    type Blob: FileBlob;

    fn name(&self) -> String;

    /// Materialize the file.
    fn get_file(&self) -> LocalBoxFuture<'static, Result<Self::Blob, HostError>>;
}

/// One child of a directory.
pub enum HandleEntry<D: DirectoryHandle> {
    File(D::File),
    Directory(D),
}

/// Capability to list a directory the user granted access to.
pub trait DirectoryHandle: Clone + 'static {
    type File: FileHandle;

    fn name(&self) -> String;

    /// List the immediate children, in host iteration order.
    fn entries(&self) -> LocalBoxFuture<'static, Result<Vec<HandleEntry<Self>>, HostError>>;
}

// =============================================================================
// Acquisition Strategy
// =============================================================================

/// Outcome of a collect call that did not fail.
#[derive(Debug)]
pub enum Collected<D: DirectoryHandle> {
    /// The user picked a directory.
    Files(EnumerationResult<D>),
    /// The user dismissed the prompt.
    Cancelled,
}

impl<D: DirectoryHandle> Collected<D> {
    /// The files, or `None` when cancelled.
    #[cfg(test)]
    pub fn into_result(self) -> Option<EnumerationResult<D>> {
        match self {
            Self::Files(result) => Some(result),
            Self::Cancelled => None,
        }
    }

    #[cfg(test)]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// A way to obtain the files of a user-selected directory.
pub trait DirectorySource {
    type Directory: DirectoryHandle;

    fn collect(
        &self,
        mode: SelectionMode,
    ) -> LocalBoxFuture<'_, Result<Collected<Self::Directory>, CollectError>>;
}

/// What the host environment offers for directory selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capability {
    /// A native directory picker exists.
    pub directory_picker: bool,
    /// Running in the top-level browsing context (not a nested frame).
    pub top_level: bool,
}

impl Capability {
    /// The native path needs both the picker and a top-level context.
    pub fn supports_native(&self) -> bool {
        self.directory_picker && self.top_level
    }
}

/// The strategy selected for one collect call.
pub enum Acquisition<N, F> {
    Native(N),
    Fallback(F),
}

impl<N, F> Acquisition<N, F> {
    /// Select a strategy. Only the selected one is constructed.
    pub fn select(
        capability: Capability,
        native: impl FnOnce() -> N,
        fallback: impl FnOnce() -> F,
    ) -> Self {
        if capability.supports_native() {
            Self::Native(native())
        } else {
            Self::Fallback(fallback())
        }
    }

    #[cfg(test)]
    pub fn is_native(&self) -> bool {
        matches!(self, Self::Native(_))
    }
}

impl<N, F, D> DirectorySource for Acquisition<N, F>
where
    D: DirectoryHandle,
    N: DirectorySource<Directory = D>,
    F: DirectorySource<Directory = D>,
{
    type Directory = D;

    fn collect(
        &self,
        mode: SelectionMode,
    ) -> LocalBoxFuture<'_, Result<Collected<D>, CollectError>> {
        match self {
            Self::Native(source) => source.collect(mode),
            Self::Fallback(source) => source.collect(mode),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::memory::{MemoryDir, MemoryFile, MemoryInput, MemoryPicker};
    use super::*;

    fn tree() -> MemoryDir {
        MemoryDir::new("A")
            .with_file(MemoryFile::new("x.png", "image/png", b"x".to_vec()))
            .with_dir(
                MemoryDir::new("B").with_file(MemoryFile::new("y.txt", "text/plain", b"y".to_vec())),
            )
    }

    fn paths(collected: Collected<MemoryDir>) -> Vec<String> {
        let mut paths: Vec<_> = collected
            .into_result()
            .expect("expected files")
            .iter()
            .map(|e| e.relative_path().to_string())
            .collect();
        paths.sort();
        paths
    }

    #[test]
    fn test_capability_requires_top_level() {
        let embedded = Capability {
            directory_picker: true,
            top_level: false,
        };
        let no_picker = Capability {
            directory_picker: false,
            top_level: true,
        };
        let both = Capability {
            directory_picker: true,
            top_level: true,
        };

        assert!(!embedded.supports_native());
        assert!(!no_picker.supports_native());
        assert!(both.supports_native());
    }

    #[test]
    fn test_select_constructs_only_chosen_strategy() {
        let embedded = Capability {
            directory_picker: true,
            top_level: false,
        };
        let acquisition: Acquisition<u8, u16> =
            Acquisition::select(embedded, || panic!("native must not be built"), || 7);
        assert!(!acquisition.is_native());
    }

    #[tokio::test]
    async fn test_both_paths_yield_same_shape() {
        let native = NativeSource::new(MemoryPicker::grant(tree()));
        let fallback = FallbackSource::new(MemoryInput::from_tree(&tree()));

        let capability = Capability {
            directory_picker: true,
            top_level: true,
        };
        let no_picker = Capability {
            directory_picker: false,
            ..capability
        };
        let via_native: Acquisition<_, FallbackSource<MemoryInput>> =
            Acquisition::select(capability, || native, || unreachable!());
        let via_fallback: Acquisition<NativeSource<MemoryPicker>, _> =
            Acquisition::select(no_picker, || unreachable!(), || fallback);

        let native_paths = paths(via_native.collect(SelectionMode::Read).await.unwrap());
        let fallback_paths = paths(via_fallback.collect(SelectionMode::Read).await.unwrap());

        assert_eq!(native_paths, vec!["A/B/y.txt", "A/x.png"]);
        assert_eq!(native_paths, fallback_paths);
    }
}
