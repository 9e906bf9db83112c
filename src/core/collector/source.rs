//! The two acquisition strategies.

use futures::FutureExt;
use futures::future::LocalBoxFuture;

use super::{BlobOf, Collected, DirectoryHandle, DirectorySource, EnumerationResult, FileEntry, walk};
use crate::core::error::{CollectError, HostError};
use crate::models::SelectionMode;
use crate::utils::diagnostics;

// =============================================================================
// Native Path
// =============================================================================

/// Prompts the user for a directory handle.
pub trait DirectoryPicker {
    type Directory: DirectoryHandle;

    /// Show the prompt. A dismissed prompt fails with an abort error.
    fn pick(&self, mode: SelectionMode)
    -> LocalBoxFuture<'_, Result<Self::Directory, HostError>>;
}

/// Directory-handle strategy: prompt, then walk the granted tree.
pub struct NativeSource<P> {
    picker: P,
}

impl<P: DirectoryPicker> NativeSource<P> {
    pub fn new(picker: P) -> Self {
        Self { picker }
    }
}

impl<P: DirectoryPicker> DirectorySource for NativeSource<P> {
    type Directory = P::Directory;

    fn collect(
        &self,
        mode: SelectionMode,
    ) -> LocalBoxFuture<'_, Result<Collected<Self::Directory>, CollectError>> {
        async move {
            let root = match self.picker.pick(mode).await {
                Ok(root) => root,
                Err(err) if err.is_abort() => return Ok(Collected::Cancelled),
                Err(err) => {
                    diagnostics::error(&err.kind, &err.message);
                    return Err(err.into());
                }
            };

            let result = walk(root).await.map_err(CollectError::Walk)?;
            Ok(Collected::Files(result))
        }
        .boxed_local()
    }
}

// =============================================================================
// Fallback Path
// =============================================================================

/// Shows a directory-upload file control and returns the host's file list.
pub trait FilePrompt {
    type Directory: DirectoryHandle;

    /// `None` when the host reports the control was dismissed.
    ///
    /// Hosts that report nothing on dismissal never resolve.
    fn pick_files(&self)
    -> LocalBoxFuture<'_, Result<Option<Vec<BlobOf<Self::Directory>>>, CollectError>>;
}

/// File-input strategy: the host flattens the tree and supplies relative paths.
pub struct FallbackSource<P> {
    prompt: P,
}

impl<P: FilePrompt> FallbackSource<P> {
    pub fn new(prompt: P) -> Self {
        Self { prompt }
    }
}

impl<P: FilePrompt> DirectorySource for FallbackSource<P> {
    type Directory = P::Directory;

    /// The file control has no access mode; `mode` is ignored.
    fn collect(
        &self,
        _mode: SelectionMode,
    ) -> LocalBoxFuture<'_, Result<Collected<Self::Directory>, CollectError>> {
        async move {
            let Some(blobs) = self.prompt.pick_files().await? else {
                return Ok(Collected::Cancelled);
            };

            let files = blobs.into_iter().map(FileEntry::from_file_list).collect();
            Ok(Collected::Files(EnumerationResult::new(files)))
        }
        .boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::collector::memory::{MemoryDir, MemoryFile, MemoryInput, MemoryPicker};
    use crate::utils::diagnostics::Level;

    fn tree() -> MemoryDir {
        MemoryDir::new("A")
            .with_file(MemoryFile::new("x.png", "image/png", vec![0]))
            .with_dir(MemoryDir::new("B").with_file(MemoryFile::new("y.txt", "text/plain", vec![1])))
    }

    #[tokio::test]
    async fn test_native_grant_walks_tree() {
        let source = NativeSource::new(MemoryPicker::grant(tree()));

        let result = source
            .collect(SelectionMode::Read)
            .await
            .unwrap()
            .into_result()
            .unwrap();

        assert_eq!(result.len(), 2);
    }

    #[tokio::test]
    async fn test_native_passes_mode_to_picker() {
        let picker = MemoryPicker::grant(tree());
        let source = NativeSource::new(picker.clone());

        source.collect(SelectionMode::ReadWrite).await.unwrap();

        assert_eq!(picker.requested_modes(), vec![SelectionMode::ReadWrite]);
    }

    #[tokio::test]
    async fn test_native_cancel_is_silent() {
        let _ = diagnostics::take_recorded();
        let source = NativeSource::new(MemoryPicker::abort());

        let collected = source.collect(SelectionMode::Read).await.unwrap();

        assert!(collected.is_cancelled());
        assert!(diagnostics::take_recorded().is_empty());
    }

    #[tokio::test]
    async fn test_native_prompt_failure_is_logged_and_returned() {
        let _ = diagnostics::take_recorded();
        let source = NativeSource::new(MemoryPicker::fail(
            "SecurityError",
            "Must be handling a user gesture to show a file picker.",
        ));

        let err = source.collect(SelectionMode::Read).await.unwrap_err();

        assert!(matches!(err, CollectError::PromptFailed { ref kind, .. } if kind == "SecurityError"));
        let recorded = diagnostics::take_recorded();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].level, Level::Error);
        assert_eq!(recorded[0].kind, "SecurityError");
    }

    #[tokio::test]
    async fn test_recollect_returns_fresh_result() {
        let picker = MemoryPicker::sequence(vec![
            tree(),
            MemoryDir::new("C").with_file(MemoryFile::new("z.gif", "image/gif", vec![2])),
        ]);
        let source = NativeSource::new(picker);

        let first = source.collect(SelectionMode::Read).await.unwrap().into_result().unwrap();
        let second = source.collect(SelectionMode::Read).await.unwrap().into_result().unwrap();

        assert_eq!(first.len(), 2);
        let paths: Vec<_> = second.iter().map(|e| e.relative_path()).collect();
        assert_eq!(paths, vec!["C/z.gif"]);
    }

    #[tokio::test]
    async fn test_fallback_uses_host_relative_paths() {
        let source = FallbackSource::new(MemoryInput::from_tree(&tree()));

        let result = source
            .collect(SelectionMode::Read)
            .await
            .unwrap()
            .into_result()
            .unwrap();

        let mut paths: Vec<_> = result.iter().map(|e| e.relative_path()).collect();
        paths.sort();
        assert_eq!(paths, vec!["A/B/y.txt", "A/x.png"]);
        assert!(result.iter().all(|e| e.parent().is_none()));
    }

    #[tokio::test]
    async fn test_fallback_dismissal_and_empty_selection() {
        let dismissed = FallbackSource::new(MemoryInput::dismissed());
        assert!(dismissed.collect(SelectionMode::Read).await.unwrap().is_cancelled());

        let empty = FallbackSource::new(MemoryInput::from_tree(&MemoryDir::new("empty")));
        let result = empty.collect(SelectionMode::Read).await.unwrap().into_result().unwrap();
        assert!(result.is_empty());
    }
}
