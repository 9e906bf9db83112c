//! Data models and types for the application.
//!
//! Contains domain types for:
//! - [`SelectionMode`], [`PickerOptions`], [`SkippedEntry`] - Directory selection
//! - [`GalleryItem`], [`GalleryState`] - Images shown in the gallery
//! - [`LightboxState`] - Lightbox viewer position and zoom
//! - [`PickTracker`] - Ordering of directory picks
//! - [`StatusMessage`] - Status line text

mod collection;
mod gallery;
mod pick;
mod status;

pub use collection::{PickerOptions, SelectionMode, SkippedEntry, join_path};
pub use gallery::{GalleryItem, GalleryState, LightboxState};
pub use pick::PickTracker;
pub use status::StatusMessage;
