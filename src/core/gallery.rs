//! Turning collected files into gallery items.
//!
//! Keeps entries whose declared media type starts with `image`, reads their
//! bytes, and asks a [`ResourceFactory`] for a renderable URL. Pixel size is
//! taken from the image header when the format is recognized, so the
//! thumbnail grid can lay out rows before anything is decoded.

use crate::config::IMAGE_MEDIA_PREFIX;
use crate::core::collector::{DirectoryHandle, EnumerationResult, FileEntry};
use crate::core::error::GalleryError;
use crate::models::{GalleryItem, SkippedEntry};
use crate::utils::diagnostics;

/// Creates and releases displayable resources for file content.
pub trait ResourceFactory {
    /// Wrap `bytes` in a resource of `media_type` and return its URL.
    fn create_url(&self, bytes: &[u8], media_type: &str) -> Result<String, GalleryError>;

    /// Release a URL previously returned by [`create_url`](Self::create_url).
    fn revoke_url(&self, url: &str);

    /// Release every resource held by `items`.
    fn release(&self, items: &[GalleryItem]) {
        for item in items {
            self.revoke_url(&item.src);
            if item.thumb != item.src {
                self.revoke_url(&item.thumb);
            }
        }
    }
}

/// Check whether a declared media type is an image type.
pub fn is_image(media_type: &str) -> bool {
    media_type.starts_with(IMAGE_MEDIA_PREFIX)
}

/// Build one gallery item. The caller has already checked the media type.
pub async fn build_item<D, R>(entry: &FileEntry<D>, resources: &R) -> Result<GalleryItem, GalleryError>
where
    D: DirectoryHandle,
    R: ResourceFactory,
{
    let bytes = entry.read_bytes().await.map_err(|source| GalleryError::Read {
        path: entry.relative_path().to_string(),
        source,
    })?;

    let url = resources.create_url(&bytes, entry.media_type())?;
    let dimensions = imagesize::blob_size(&bytes)
        .ok()
        .and_then(|size| Some((u32::try_from(size.width).ok()?, u32::try_from(size.height).ok()?)));

    Ok(GalleryItem {
        thumb: url.clone(),
        src: url,
        caption: entry.name().to_string(),
        relative_path: entry.relative_path().to_string(),
        media_type: entry.media_type().to_string(),
        size: entry.size(),
        last_modified: entry.last_modified(),
        dimensions,
    })
}

/// Items built from one enumeration result.
#[derive(Debug, Default)]
pub struct GalleryBuild {
    pub items: Vec<GalleryItem>,
    /// Images whose content could not be read or turned into a URL.
    pub skipped: Vec<SkippedEntry>,
}

/// Build gallery items for every image in `result`, in result order.
///
/// Entries that fail to read or convert are logged and returned in
/// [`GalleryBuild::skipped`].
pub async fn build_items<D, R>(result: &EnumerationResult<D>, resources: &R) -> GalleryBuild
where
    D: DirectoryHandle,
    R: ResourceFactory,
{
    let mut build = GalleryBuild::default();

    for entry in result.iter().filter(|e| is_image(e.media_type())) {
        match build_item(entry, resources).await {
            Ok(item) => build.items.push(item),
            Err(err) => {
                diagnostics::warn(&err.to_string());
                build.skipped.push(SkippedEntry {
                    path: entry.relative_path().to_string(),
                    reason: err.to_string(),
                });
            }
        }
    }

    build
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::core::collector::memory::{MemoryDir, MemoryFile};
    use crate::core::collector::walk;
    use crate::models::GalleryState;

    /// Hands out sequential `blob:test/N` URLs and remembers revocations.
    #[derive(Default)]
    struct TestUrls {
        created: RefCell<Vec<(String, usize)>>,
        revoked: RefCell<Vec<String>>,
    }

    impl ResourceFactory for TestUrls {
        fn create_url(&self, bytes: &[u8], media_type: &str) -> Result<String, GalleryError> {
            if media_type == "image/broken" {
                return Err(GalleryError::ObjectUrl("refused".to_string()));
            }
            let mut created = self.created.borrow_mut();
            let url = format!("blob:test/{}", created.len());
            created.push((media_type.to_string(), bytes.len()));
            Ok(url)
        }

        fn revoke_url(&self, url: &str) {
            self.revoked.borrow_mut().push(url.to_string());
        }
    }

    /// Smallest valid PNG header: signature + IHDR with width/height.
    fn png_header(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        bytes.extend_from_slice(&13u32.to_be_bytes());
        bytes.extend_from_slice(b"IHDR");
        bytes.extend_from_slice(&width.to_be_bytes());
        bytes.extend_from_slice(&height.to_be_bytes());
        bytes.extend_from_slice(&[8, 6, 0, 0, 0]);
        bytes
    }

    #[test]
    fn test_is_image() {
        assert!(is_image("image/png"));
        assert!(is_image("image/svg+xml"));
        assert!(!is_image("text/plain"));
        assert!(!is_image(""));
    }

    #[tokio::test]
    async fn test_only_images_become_items() {
        let root = MemoryDir::new("A")
            .with_file(MemoryFile::new("x.png", "image/png", png_header(300, 150)))
            .with_dir(MemoryDir::new("B").with_file(MemoryFile::new("y.txt", "text/plain", b"hi".to_vec())));
        let result = walk(root).await.unwrap();
        let urls = TestUrls::default();

        let items = build_items(&result, &urls).await.items;

        assert_eq!(items.len(), 1);
        let item = &items[0];
        assert_eq!(item.caption, "x.png");
        assert_eq!(item.relative_path, "A/x.png");
        assert_eq!(item.src, item.thumb);
        assert_eq!(item.dimensions, Some((300, 150)));
        assert_eq!(urls.created.borrow()[0].0, "image/png");
    }

    #[tokio::test]
    async fn test_unrecognized_image_has_no_dimensions() {
        let root = MemoryDir::new("A").with_file(MemoryFile::new("odd.png", "image/png", vec![1, 2, 3]));
        let result = walk(root).await.unwrap();

        let items = build_items(&result, &TestUrls::default()).await.items;

        assert_eq!(items[0].dimensions, None);
        assert_eq!(items[0].aspect_ratio(), 1.0);
    }

    #[tokio::test]
    async fn test_failed_entries_are_skipped() {
        let _ = diagnostics::take_recorded();
        let root = MemoryDir::new("A")
            .with_file(MemoryFile::new("ok.png", "image/png", vec![0]))
            .with_file(MemoryFile::new("bad.png", "image/png", vec![0]).failing_read())
            .with_file(MemoryFile::new("weird.img", "image/broken", vec![0]));
        let result = walk(root).await.unwrap();

        let build = build_items(&result, &TestUrls::default()).await;

        assert_eq!(build.items.len(), 1);
        assert_eq!(build.items[0].caption, "ok.png");
        let skipped: Vec<_> = build.skipped.iter().map(|s| s.path.as_str()).collect();
        assert_eq!(skipped, vec!["A/bad.png", "A/weird.img"]);
        assert_eq!(diagnostics::take_recorded().len(), 2);
    }

    #[tokio::test]
    async fn test_read_failures_join_walk_skips() {
        let root = MemoryDir::new("A")
            .with_file(MemoryFile::new("ok.png", "image/png", vec![0]))
            .with_file(MemoryFile::new("bad.png", "image/png", vec![0]).failing_read())
            .with_file(MemoryFile::new("gone.png", "image/png", vec![0]).failing_get_file());
        let mut result = walk(root).await.unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result.skipped().len(), 1);

        let build = build_items(&result, &TestUrls::default()).await;
        result.extend_skipped(build.skipped);

        assert_eq!(build.items.len(), 1);
        let mut skipped: Vec<_> = result.skipped().iter().map(|s| s.path.as_str()).collect();
        skipped.sort();
        assert_eq!(skipped, vec!["A/bad.png", "A/gone.png"]);
        assert!(result.skipped()[1].reason.contains("NotReadableError"));
    }

    #[tokio::test]
    async fn test_rebuild_replaces_and_releases_previous_urls() {
        let urls = TestUrls::default();
        let mut gallery = GalleryState::default();

        let first = walk(
            MemoryDir::new("A")
                .with_file(MemoryFile::new("1.png", "image/png", vec![1]))
                .with_file(MemoryFile::new("2.png", "image/png", vec![2])),
        )
        .await
        .unwrap();
        let previous = gallery.replace(build_items(&first, &urls).await.items);
        urls.release(&previous);

        let second = walk(MemoryDir::new("B").with_file(MemoryFile::new("3.png", "image/png", vec![3])))
            .await
            .unwrap();
        let previous = gallery.replace(build_items(&second, &urls).await.items);
        urls.release(&previous);

        let captions: Vec<_> = gallery.items().iter().map(|i| i.caption.as_str()).collect();
        assert_eq!(captions, vec!["3.png"]);
        assert_eq!(*urls.revoked.borrow(), vec!["blob:test/0", "blob:test/1"]);
    }
}
