//! Utility modules for web, DOM, and display formatting.
//!
//! Provides:
//! - [`dom`] - Window/document access and `Reflect`-based API probing
//! - [`ObjectUrls`] - `blob:` URLs for file content
//! - [`diagnostics`] - Console diagnostics sink
//! - [`format`] - Sizes, dates, and summary text

mod blob;
pub mod diagnostics;
pub mod dom;
pub mod format;

pub use blob::ObjectUrls;
