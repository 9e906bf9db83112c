//! Object URLs for in-memory file content.

use js_sys::{Array, Uint8Array};
use web_sys::{Blob, BlobPropertyBag, Url};

use crate::core::error::GalleryError;
use crate::core::gallery::ResourceFactory;
use crate::utils::dom;

/// Creates `blob:` URLs with `URL.createObjectURL`.
///
/// URLs stay alive until revoked; the gallery revokes the previous set
/// whenever it is replaced or cleared.
#[derive(Clone, Copy, Debug, Default)]
pub struct ObjectUrls;

impl ResourceFactory for ObjectUrls {
    fn create_url(&self, bytes: &[u8], media_type: &str) -> Result<String, GalleryError> {
        let parts = Array::new();
        parts.push(&Uint8Array::from(bytes));

        let options = BlobPropertyBag::new();
        options.set_type(media_type);

        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
            .map_err(|e| GalleryError::ObjectUrl(dom::host_error(&e).message))?;
        Url::create_object_url_with_blob(&blob)
            .map_err(|e| GalleryError::ObjectUrl(dom::host_error(&e).message))
    }

    fn revoke_url(&self, url: &str) {
        let _ = Url::revoke_object_url(url);
    }
}
