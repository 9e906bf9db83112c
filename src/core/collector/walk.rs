//! Recursive directory walk.
//!
//! Each level lists its children, then starts every subdirectory walk and
//! every file materialization before awaiting any of them. The joined
//! results are concatenated: subdirectory results first, then this level's
//! files. On the single-threaded executor the branches interleave, so
//! wall-clock cost follows tree depth rather than file count.

use futures::FutureExt;
use futures::future::{LocalBoxFuture, join, join_all};

use super::{DirectoryHandle, EnumerationResult, FileEntry, FileHandle, HandleEntry};
use crate::core::error::HostError;
use crate::models::join_path;
use crate::utils::diagnostics;

/// Walk a granted root directory.
///
/// Relative paths start with the root's own name. Failing to list the root
/// is an error; anything below the root that cannot be read is skipped,
/// logged and recorded in [`EnumerationResult::skipped`].
pub async fn walk<D: DirectoryHandle>(root: D) -> Result<EnumerationResult<D>, HostError> {
    let path = root.name();
    walk_level(root, path).await
}

fn walk_level<D: DirectoryHandle>(
    dir: D,
    path: String,
) -> LocalBoxFuture<'static, Result<EnumerationResult<D>, HostError>> {
    async move {
        let children = dir.entries().await?;

        let mut subdirs = Vec::new();
        let mut files = Vec::new();

        for child in children {
            match child {
                HandleEntry::Directory(subdir) => {
                    let subdir_path = join_path(&path, &subdir.name());
                    subdirs.push(walk_subtree(subdir, subdir_path));
                }
                HandleEntry::File(file) => {
                    let file_path = join_path(&path, &file.name());
                    files.push(materialize(file, file_path, dir.clone()));
                }
            }
        }

        let (subdir_results, file_results) = join(join_all(subdirs), join_all(files)).await;

        let mut result = EnumerationResult::empty();
        for subdir_result in subdir_results {
            result.append(subdir_result);
        }
        for file_result in file_results {
            match file_result {
                Ok(entry) => result.push(entry),
                Err((file_path, err)) => {
                    diagnostics::warn(&format!("Skipping unreadable file '{}': {}", file_path, err));
                    result.push_skipped(file_path, err.to_string());
                }
            }
        }

        Ok(result)
    }
    .boxed_local()
}

/// Walk below the root. A directory that cannot be listed becomes a skip.
async fn walk_subtree<D: DirectoryHandle>(dir: D, path: String) -> EnumerationResult<D> {
    match walk_level(dir, path.clone()).await {
        Ok(result) => result,
        Err(err) => {
            diagnostics::warn(&format!("Skipping unreadable directory '{}': {}", path, err));
            EnumerationResult::skipped_only(path, err.to_string())
        }
    }
}

async fn materialize<D: DirectoryHandle>(
    file: D::File,
    path: String,
    parent: D,
) -> Result<FileEntry<D>, (String, HostError)> {
    match file.get_file().await {
        Ok(blob) => Ok(FileEntry::from_walk(blob, path, parent)),
        Err(err) => Err((path, err)),
    }
}
