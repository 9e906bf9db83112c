//! In-memory storage backend.
//!
//! Builds directory trees in code so the collector can be exercised without
//! a browser. Nodes can be told to fail listing or reading to cover the skip
//! policy.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use futures::FutureExt;
use futures::future::{self, LocalBoxFuture};

use super::{DirectoryHandle, DirectoryPicker, FileBlob, FileHandle, FilePrompt, HandleEntry};
use crate::core::error::{ABORT_ERROR, CollectError, HostError};
use crate::models::{SelectionMode, join_path};

// =============================================================================
// Files
// =============================================================================

/// A file node. Acts both as the handle and as the materialized blob.
#[derive(Clone, Debug)]
pub struct MemoryFile {
    name: String,
    media_type: String,
    bytes: Rc<[u8]>,
    relative_path: Option<String>,
    fail_get_file: bool,
    fail_read: bool,
    reads: Rc<Cell<usize>>,
}

impl MemoryFile {
    pub fn new(name: &str, media_type: &str, bytes: Vec<u8>) -> Self {
        Self {
            name: name.to_string(),
            media_type: media_type.to_string(),
            bytes: bytes.into(),
            relative_path: None,
            fail_get_file: false,
            fail_read: false,
            reads: Rc::new(Cell::new(0)),
        }
    }

    /// Attach a host-style relative path, as a directory upload input does.
    pub fn with_relative_path(mut self, path: &str) -> Self {
        self.relative_path = Some(path.to_string());
        self
    }

    /// Make materialization fail.
    pub fn failing_get_file(mut self) -> Self {
        self.fail_get_file = true;
        self
    }

    /// Make content reads fail.
    pub fn failing_read(mut self) -> Self {
        self.fail_read = true;
        self
    }

    /// Number of content reads attempted, shared across clones.
    pub fn read_count(&self) -> usize {
        self.reads.get()
    }
}

impl FileBlob for MemoryFile {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn media_type(&self) -> String {
        self.media_type.clone()
    }

    fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    fn relative_path_hint(&self) -> Option<String> {
        self.relative_path.clone()
    }

    fn read(&self) -> LocalBoxFuture<'static, Result<Vec<u8>, HostError>> {
        self.reads.set(self.reads.get() + 1);
        let result = if self.fail_read {
            Err(HostError::new("NotReadableError", format!("{} could not be read", self.name)))
        } else {
            Ok(self.bytes.to_vec())
        };
        future::ready(result).boxed_local()
    }
}

impl FileHandle for MemoryFile {
    type Blob = MemoryFile;

    fn name(&self) -> String {
        self.name.clone()
    }

    fn get_file(&self) -> LocalBoxFuture<'static, Result<MemoryFile, HostError>> {
        let result = if self.fail_get_file {
            Err(HostError::new("NotFoundError", format!("{} was removed", self.name)))
        } else {
            Ok(self.clone())
        };
        future::ready(result).boxed_local()
    }
}

// =============================================================================
// Directories
// =============================================================================

#[derive(Clone, Debug)]
enum MemoryNode {
    File(MemoryFile),
    Dir(MemoryDir),
}

/// A directory node with ordered children.
#[derive(Clone, Debug)]
pub struct MemoryDir {
    name: String,
    children: Vec<MemoryNode>,
    fail_listing: bool,
}

impl MemoryDir {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            children: Vec::new(),
            fail_listing: false,
        }
    }

    pub fn with_file(mut self, file: MemoryFile) -> Self {
        self.children.push(MemoryNode::File(file));
        self
    }

    pub fn with_dir(mut self, dir: MemoryDir) -> Self {
        self.children.push(MemoryNode::Dir(dir));
        self
    }

    /// Make listing this directory fail.
    pub fn failing_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    pub fn files(&self) -> Vec<&MemoryFile> {
        self.children
            .iter()
            .filter_map(|c| match c {
                MemoryNode::File(f) => Some(f),
                MemoryNode::Dir(_) => None,
            })
            .collect()
    }

    pub fn subdirs(&self) -> Vec<&MemoryDir> {
        self.children
            .iter()
            .filter_map(|c| match c {
                MemoryNode::Dir(d) => Some(d),
                MemoryNode::File(_) => None,
            })
            .collect()
    }

    /// Flatten the tree the way a directory upload input reports it.
    fn flatten_into(&self, path: &str, out: &mut Vec<MemoryFile>) {
        for child in &self.children {
            match child {
                MemoryNode::File(f) => {
                    let file_path = join_path(path, &f.name);
                    out.push(f.clone().with_relative_path(&file_path));
                }
                MemoryNode::Dir(d) => d.flatten_into(&join_path(path, &d.name), out),
            }
        }
    }
}

impl DirectoryHandle for MemoryDir {
    type File = MemoryFile;

    fn name(&self) -> String {
        self.name.clone()
    }

    fn entries(&self) -> LocalBoxFuture<'static, Result<Vec<HandleEntry<Self>>, HostError>> {
        let result = if self.fail_listing {
            Err(HostError::new("NotAllowedError", format!("{} is not readable", self.name)))
        } else {
            Ok(self
                .children
                .iter()
                .map(|c| match c {
                    MemoryNode::File(f) => HandleEntry::File(f.clone()),
                    MemoryNode::Dir(d) => HandleEntry::Directory(d.clone()),
                })
                .collect())
        };
        future::ready(result).boxed_local()
    }
}

// =============================================================================
// Prompts
// =============================================================================

#[derive(Clone, Debug)]
enum PickerOutcome {
    Grant(MemoryDir),
    Fail(HostError),
}

/// Scripted directory picker.
///
/// Outcomes are consumed in order; the last one repeats.
#[derive(Clone, Debug)]
pub struct MemoryPicker {
    outcomes: Rc<RefCell<VecDeque<PickerOutcome>>>,
    modes: Rc<RefCell<Vec<SelectionMode>>>,
}

impl MemoryPicker {
    fn scripted(outcomes: Vec<PickerOutcome>) -> Self {
        Self {
            outcomes: Rc::new(RefCell::new(outcomes.into())),
            modes: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn grant(dir: MemoryDir) -> Self {
        Self::scripted(vec![PickerOutcome::Grant(dir)])
    }

    /// Grants each directory in turn.
    pub fn sequence(dirs: Vec<MemoryDir>) -> Self {
        Self::scripted(dirs.into_iter().map(PickerOutcome::Grant).collect())
    }

    /// The user dismisses the prompt.
    pub fn abort() -> Self {
        Self::fail(ABORT_ERROR, "The user aborted a request.")
    }

    pub fn fail(kind: &str, message: &str) -> Self {
        Self::scripted(vec![PickerOutcome::Fail(HostError::new(kind, message))])
    }

    /// Modes passed to every `pick` call so far.
    pub fn requested_modes(&self) -> Vec<SelectionMode> {
        self.modes.borrow().clone()
    }

    fn next_outcome(&self) -> Option<PickerOutcome> {
        let mut outcomes = self.outcomes.borrow_mut();
        if outcomes.len() > 1 {
            outcomes.pop_front()
        } else {
            outcomes.front().cloned()
        }
    }
}

impl DirectoryPicker for MemoryPicker {
    type Directory = MemoryDir;

    fn pick(&self, mode: SelectionMode) -> LocalBoxFuture<'_, Result<MemoryDir, HostError>> {
        self.modes.borrow_mut().push(mode);
        let result = match self.next_outcome() {
            Some(PickerOutcome::Grant(dir)) => Ok(dir),
            Some(PickerOutcome::Fail(err)) => Err(err),
            None => Err(HostError::new(ABORT_ERROR, "no scripted outcome")),
        };
        future::ready(result).boxed_local()
    }
}

/// Scripted directory upload input.
#[derive(Clone, Debug)]
pub struct MemoryInput {
    files: Option<Vec<MemoryFile>>,
}

impl MemoryInput {
    /// The user selects `dir`; files carry `root/...` relative paths.
    pub fn from_tree(dir: &MemoryDir) -> Self {
        let mut files = Vec::new();
        dir.flatten_into(&dir.name, &mut files);
        Self { files: Some(files) }
    }

    /// The user dismisses the control and the host reports it.
    pub fn dismissed() -> Self {
        Self { files: None }
    }
}

impl FilePrompt for MemoryInput {
    type Directory = MemoryDir;

    fn pick_files(&self) -> LocalBoxFuture<'_, Result<Option<Vec<MemoryFile>>, CollectError>> {
        future::ready(Ok(self.files.clone())).boxed_local()
    }
}
