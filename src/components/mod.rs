//! UI components built with Leptos.
//!
//! - [`Toolbar`] - Open folder / clear buttons
//! - [`StatusLine`] - Progress, summary, and error text
//! - [`Thumbnails`] - Justified thumbnail grid
//! - [`Lightbox`] - Full-size viewer with zoom and thumbnail strip
//! - [`icons`] - Centralized icon definitions (change theme here)

pub mod icons;
mod lightbox;
mod status;
mod thumbnails;
mod toolbar;

pub use lightbox::Lightbox;
pub use status::StatusLine;
pub use thumbnails::Thumbnails;
pub use toolbar::Toolbar;
