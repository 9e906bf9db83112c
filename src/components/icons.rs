//! Centralized icon definitions.
//!
//! Icon theme is configured in `config.rs` via `ICON_THEME`.
//! This module maps semantic icon names to the selected theme's icons.

use icondata::Icon;

use crate::config::IconTheme;

// =============================================================================
// Theme Imports
// =============================================================================

mod lucide {
    pub use icondata::{
        LuChevronLeft as ChevronLeft, LuChevronRight as ChevronRight, LuFolderOpen as FolderOpen,
        LuImages as Images, LuRotateCw as Rotate, LuTrash2 as Clear, LuX as Close, LuZoomIn as ZoomIn,
        LuZoomOut as ZoomOut,
    };
}

mod bootstrap {
    pub use icondata::{
        BsChevronLeft as ChevronLeft, BsChevronRight as ChevronRight,
        BsArrowClockwise as Rotate, BsFolder2Open as FolderOpen, BsImages as Images, BsTrash as Clear, BsXLg as Close,
        BsZoomIn as ZoomIn, BsZoomOut as ZoomOut,
    };
}

// =============================================================================
// Icon Constants (selected based on theme)
// =============================================================================

macro_rules! themed_icon {
    ($name:ident, $theme_name:ident) => {
        pub const $name: Icon = match crate::config::ICON_THEME {
            IconTheme::Lucide => lucide::$theme_name,
            IconTheme::Bootstrap => bootstrap::$theme_name,
        };
    };
}

themed_icon!(CHEVRON_LEFT, ChevronLeft);
themed_icon!(CHEVRON_RIGHT, ChevronRight);
themed_icon!(FOLDER_OPEN, FolderOpen);
themed_icon!(IMAGES, Images);
themed_icon!(CLEAR, Clear);
themed_icon!(CLOSE, Close);
themed_icon!(ZOOM_IN, ZoomIn);
themed_icon!(ZOOM_OUT, ZoomOut);
themed_icon!(ROTATE, Rotate);
