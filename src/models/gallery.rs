//! Gallery and lightbox state.

/// One displayable image in the gallery.
#[derive(Clone, Debug, PartialEq)]
pub struct GalleryItem {
    /// Object URL of the full image
    pub src: String,
    /// Object URL used for the thumbnail (same resource as `src`)
    pub thumb: String,
    /// Caption shown in the lightbox (file leaf name)
    pub caption: String,
    /// Path relative to the selected directory
    pub relative_path: String,
    /// Declared media type
    pub media_type: String,
    /// File size in bytes
    pub size: u64,
    /// Last modification time, milliseconds since the epoch
    pub last_modified: Option<f64>,
    /// Pixel dimensions read from the image header, if recognized
    pub dimensions: Option<(u32, u32)>,
}

impl GalleryItem {
    /// Width / height ratio, 1.0 when dimensions are unknown.
    pub fn aspect_ratio(&self) -> f64 {
        match self.dimensions {
            Some((w, h)) if w > 0 && h > 0 => w as f64 / h as f64,
            _ => 1.0,
        }
    }
}

/// The set of items currently shown.
///
/// Each successful pick replaces the whole set. The caller is handed the
/// previous items so it can release their object URLs.
#[derive(Clone, Debug, Default)]
pub struct GalleryState {
    items: Vec<GalleryItem>,
    /// Bumped on every replace so views can re-run layout.
    generation: u64,
}

impl GalleryState {
    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&GalleryItem> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Total size of all items in bytes.
    pub fn total_size(&self) -> u64 {
        self.items.iter().map(|i| i.size).sum()
    }

    /// Replace all items, returning the ones that were shown before.
    pub fn replace(&mut self, items: Vec<GalleryItem>) -> Vec<GalleryItem> {
        self.generation += 1;
        std::mem::replace(&mut self.items, items)
    }

    /// Remove all items, returning them.
    pub fn clear(&mut self) -> Vec<GalleryItem> {
        self.replace(Vec::new())
    }
}

/// Lightbox viewer state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LightboxState {
    #[default]
    Closed,
    Open {
        index: usize,
        zoomed: bool,
    },
}

impl LightboxState {
    /// Open at `index`, clamped to the last item. Stays closed for an empty gallery.
    pub fn open(index: usize, len: usize) -> Self {
        if len == 0 {
            Self::Closed
        } else {
            Self::Open {
                index: index.min(len - 1),
                zoomed: false,
            }
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Open { index, .. } => Some(*index),
            Self::Closed => None,
        }
    }

    pub fn is_zoomed(&self) -> bool {
        matches!(self, Self::Open { zoomed: true, .. })
    }

    /// Next item, wrapping to the first. Zoom resets on navigation.
    pub fn next(self, len: usize) -> Self {
        match self {
            Self::Open { index, .. } if len > 0 => Self::Open {
                index: (index + 1) % len,
                zoomed: false,
            },
            _ => Self::Closed,
        }
    }

    /// Previous item, wrapping to the last.
    pub fn prev(self, len: usize) -> Self {
        match self {
            Self::Open { index, .. } if len > 0 => Self::Open {
                index: (index + len - 1) % len,
                zoomed: false,
            },
            _ => Self::Closed,
        }
    }

    pub fn toggle_zoom(self) -> Self {
        match self {
            Self::Open { index, zoomed } => Self::Open {
                index,
                zoomed: !zoomed,
            },
            Self::Closed => Self::Closed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str) -> GalleryItem {
        GalleryItem {
            src: format!("blob:{}", name),
            thumb: format!("blob:{}", name),
            caption: name.to_string(),
            relative_path: format!("root/{}", name),
            media_type: "image/png".to_string(),
            size: 10,
            last_modified: None,
            dimensions: None,
        }
    }

    // =========================================================================
    // GalleryState Tests
    // =========================================================================

    #[test]
    fn test_replace_does_not_accumulate() {
        let mut state = GalleryState::default();

        let previous = state.replace(vec![item("a.png"), item("b.png")]);
        assert!(previous.is_empty());
        assert_eq!(state.len(), 2);

        let previous = state.replace(vec![item("c.png")]);
        assert_eq!(previous.len(), 2);
        assert_eq!(state.len(), 1);
        assert_eq!(state.items()[0].caption, "c.png");
        assert_eq!(state.generation(), 2);
    }

    #[test]
    fn test_clear_returns_items() {
        let mut state = GalleryState::default();
        state.replace(vec![item("a.png")]);

        let removed = state.clear();
        assert_eq!(removed.len(), 1);
        assert!(state.is_empty());
        assert_eq!(state.total_size(), 0);
    }

    #[test]
    fn test_aspect_ratio() {
        let mut it = item("wide.png");
        assert_eq!(it.aspect_ratio(), 1.0);
        it.dimensions = Some((400, 200));
        assert_eq!(it.aspect_ratio(), 2.0);
        it.dimensions = Some((400, 0));
        assert_eq!(it.aspect_ratio(), 1.0);
    }

    // =========================================================================
    // LightboxState Tests
    // =========================================================================

    #[test]
    fn test_open_clamps_and_handles_empty() {
        assert_eq!(LightboxState::open(0, 0), LightboxState::Closed);
        assert_eq!(LightboxState::open(7, 3).index(), Some(2));
    }

    #[test]
    fn test_navigation_wraps() {
        let lb = LightboxState::open(2, 3);
        assert_eq!(lb.next(3).index(), Some(0));
        assert_eq!(LightboxState::open(0, 3).prev(3).index(), Some(2));
    }

    #[test]
    fn test_zoom_resets_on_navigation() {
        let lb = LightboxState::open(0, 2).toggle_zoom();
        assert!(lb.is_zoomed());
        assert!(!lb.next(2).is_zoomed());
        assert_eq!(LightboxState::Closed.toggle_zoom(), LightboxState::Closed);
    }
}
