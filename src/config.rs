//! Application configuration.
//!
//! Centralizes all configuration constants used throughout the application.
//! Gallery tunables are read from `assets/gallery.toml`, embedded at compile
//! time using `include_str!`.

use serde::Deserialize;

use crate::core::error::ConfigError;
use crate::core::layout::{LastRow, LayoutOptions};
use crate::utils::diagnostics;

// =============================================================================
// Application Metadata
// =============================================================================

/// Application name displayed in the toolbar.
pub const APP_NAME: &str = "dirlight";

// =============================================================================
// Collector Configuration
// =============================================================================

/// Separator between relative path segments.
pub const PATH_SEPARATOR: char = '/';

/// Media types starting with this prefix are shown in the gallery.
pub const IMAGE_MEDIA_PREFIX: &str = "image";

/// Window method for the native directory picker.
pub const DIRECTORY_PICKER_FN: &str = "showDirectoryPicker";

/// Input element method that opens the file dialog directly.
pub const SHOW_PICKER_FN: &str = "showPicker";

// =============================================================================
// UI Configuration
// =============================================================================

/// Viewport query for the compact layout.
pub const MOBILE_MEDIA_QUERY: &str = "(max-width: 768px)";

/// How long a status message stays visible, in milliseconds.
pub const STATUS_TIMEOUT_MS: u32 = 4000;

/// Icon theme selection.
///
/// Available themes:
/// - `Bootstrap` - Familiar, slightly bolder (default)
/// - `Lucide` - Minimal, thin strokes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(dead_code)]
pub enum IconTheme {
    #[default]
    Bootstrap,
    Lucide,
}

/// Current icon theme used throughout the application.
pub const ICON_THEME: IconTheme = IconTheme::Bootstrap;

// =============================================================================
// Gallery Options
// =============================================================================

/// Embedded gallery configuration file.
const GALLERY_TOML: &str = include_str!("../assets/gallery.toml");

/// Thumbnail grid settings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GridOptions {
    /// Nominal row height in pixels.
    pub row_height: f64,
    /// Row height on narrow viewports.
    pub mobile_row_height: f64,
    /// Gap between thumbnails in pixels.
    pub margins: f64,
    /// Padding around the grid; same as `margins` when unset.
    pub border: Option<f64>,
    pub last_row: LastRow,
    /// Show file names under thumbnails.
    pub captions: bool,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            row_height: 180.0,
            mobile_row_height: 120.0,
            margins: 5.0,
            border: None,
            last_row: LastRow::Hide,
            captions: false,
        }
    }
}

impl GridOptions {
    /// Layout parameters for a container of the given width.
    pub fn layout(&self, container_width: f64, compact: bool) -> LayoutOptions {
        LayoutOptions {
            container_width,
            row_height: if compact {
                self.mobile_row_height
            } else {
                self.row_height
            },
            margins: self.margins,
            border: self.border.unwrap_or(self.margins),
            last_row: self.last_row,
        }
    }
}

/// Lightbox settings.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LightboxOptions {
    /// Mirror the open item in the URL hash.
    pub hash: bool,
    /// Show rotate controls.
    pub rotate: bool,
    /// Enable zoom.
    pub zoom: bool,
    /// Show the thumbnail strip.
    pub thumbnails: bool,
    /// Open the lightbox on the first image after a pick.
    pub open_on_load: bool,
}

impl Default for LightboxOptions {
    fn default() -> Self {
        Self {
            hash: false,
            rotate: false,
            zoom: true,
            thumbnails: true,
            open_on_load: true,
        }
    }
}

/// All gallery settings.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GalleryOptions {
    #[serde(rename = "layout")]
    pub grid: GridOptions,
    pub lightbox: LightboxOptions,
}

impl GalleryOptions {
    /// Parse options from TOML. Missing keys take their defaults.
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        toml::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load the embedded options, falling back to defaults on error.
    pub fn load() -> Self {
        Self::from_toml(GALLERY_TOML).unwrap_or_else(|err| {
            diagnostics::warn(&err.to_string());
            Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_options_parse() {
        let options = GalleryOptions::from_toml(GALLERY_TOML).expect("embedded config is valid");
        assert_eq!(options.grid.row_height, 180.0);
        assert_eq!(options.grid.margins, 5.0);
        assert_eq!(options.grid.last_row, LastRow::Hide);
        assert!(!options.grid.captions);
        assert!(!options.lightbox.hash);
        assert!(!options.lightbox.rotate);
        assert!(options.lightbox.zoom);
        assert!(options.lightbox.thumbnails);
    }

    #[test]
    fn test_missing_keys_take_defaults() {
        let options = GalleryOptions::from_toml("[layout]\nrow_height = 240\n").unwrap();
        assert_eq!(options.grid.row_height, 240.0);
        assert_eq!(options.grid.margins, 5.0);
        assert_eq!(options.lightbox, LightboxOptions::default());
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let err = GalleryOptions::from_toml("[layout]\nlast_row = \"sideways\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_border_defaults_to_margins() {
        let grid = GridOptions::default();
        let layout = grid.layout(800.0, false);
        assert_eq!(layout.border, 5.0);
        assert_eq!(layout.row_height, 180.0);
        assert_eq!(grid.layout(400.0, true).row_height, 120.0);
    }
}
