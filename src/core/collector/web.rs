//! Browser backends.
//!
//! - [`WebDirectoryPicker`] calls `window.showDirectoryPicker()` and hands
//!   back a [`WebDirectory`] wrapping the granted `FileSystemDirectoryHandle`
//! - [`WebInputPrompt`] creates a detached `<input type="file" webkitdirectory>`
//!   and resolves with its `FileList`
//!
//! The File System Access entry points are looked up through `Reflect` so
//! the same build runs in browsers that lack them.

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use js_sys::{Promise, Uint8Array};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Document, File, FileList, FileSystemDirectoryHandle, FileSystemFileHandle, FileSystemHandle,
    FileSystemHandleKind, HtmlInputElement, Window,
};

use super::{
    Acquisition, Capability, Collected, DirectoryHandle, DirectoryPicker, DirectorySource,
    FallbackSource, FileBlob, FileHandle, FilePrompt, HandleEntry, NativeSource,
};
use crate::config::{DIRECTORY_PICKER_FN, SHOW_PICKER_FN};
use crate::core::error::{CollectError, HostError};
use crate::models::{PickerOptions, SelectionMode};
use crate::utils::dom;

/// Strategy type used in the browser.
pub type WebAcquisition = Acquisition<NativeSource<WebDirectoryPicker>, FallbackSource<WebInputPrompt>>;

/// Ask the user for a directory and collect every file inside it.
///
/// Uses the native directory picker when the browser has one and the page is
/// not framed, and a directory upload input otherwise.
pub async fn collect(mode: SelectionMode) -> Result<Collected<WebDirectory>, CollectError> {
    let window = dom::window().ok_or(CollectError::Unavailable("Browser window not available"))?;

    let capability = detect(&window);
    let acquisition: WebAcquisition = Acquisition::select(
        capability,
        || NativeSource::new(WebDirectoryPicker::new(window.clone())),
        || FallbackSource::new(WebInputPrompt::new(dom::document())),
    );

    acquisition.collect(mode).await
}

/// Probe the window for directory picker support.
pub fn detect(window: &Window) -> Capability {
    Capability {
        directory_picker: dom::has_property(window, DIRECTORY_PICKER_FN),
        top_level: dom::is_top_level(window),
    }
}

// =============================================================================
// Handles
// =============================================================================

/// Granted directory (`FileSystemDirectoryHandle`).
#[derive(Clone, Debug)]
pub struct WebDirectory(FileSystemDirectoryHandle);

/// File inside a granted directory (`FileSystemFileHandle`).
#[derive(Clone, Debug)]
pub struct WebFileHandle(FileSystemFileHandle);

/// Materialized browser `File`.
#[derive(Clone, Debug)]
pub struct WebFile(File);

impl DirectoryHandle for WebDirectory {
    type File = WebFileHandle;

    fn name(&self) -> String {
        self.0.name()
    }

    fn entries(&self) -> LocalBoxFuture<'static, Result<Vec<HandleEntry<Self>>, HostError>> {
        let handle = self.0.clone();
        async move {
            let values = dom::get_method(&handle, "values")
                .ok_or_else(|| HostError::new("TypeError", "directory handle is not iterable"))?;
            let iterator = values.call0(&handle).map_err(|e| dom::host_error(&e))?;
            let next = dom::get_method(&iterator, "next")
                .ok_or_else(|| HostError::new("TypeError", "directory iterator has no next()"))?;

            let mut children = Vec::new();
            loop {
                let step = next.call0(&iterator).map_err(|e| dom::host_error(&e))?;
                let step = JsFuture::from(Promise::from(step))
                    .await
                    .map_err(|e| dom::host_error(&e))?;

                if js_sys::Reflect::get(&step, &"done".into())
                    .ok()
                    .and_then(|d| d.as_bool())
                    .unwrap_or(true)
                {
                    break;
                }

                let value = js_sys::Reflect::get(&step, &"value".into())
                    .map_err(|e| dom::host_error(&e))?;
                match value.unchecked_ref::<FileSystemHandle>().kind() {
                    FileSystemHandleKind::File => {
                        children.push(HandleEntry::File(WebFileHandle(value.unchecked_into())));
                    }
                    FileSystemHandleKind::Directory => {
                        children.push(HandleEntry::Directory(WebDirectory(value.unchecked_into())));
                    }
                    _ => {}
                }
            }

            Ok(children)
        }
        .boxed_local()
    }
}

impl FileHandle for WebFileHandle {
    type Blob = WebFile;

    fn name(&self) -> String {
        self.0.name()
    }

    fn get_file(&self) -> LocalBoxFuture<'static, Result<WebFile, HostError>> {
        let promise = self.0.get_file();
        async move {
            let file = JsFuture::from(promise)
                .await
                .map_err(|e| dom::host_error(&e))?;
            file.dyn_into::<File>()
                .map(WebFile)
                .map_err(|_| HostError::new("TypeError", "getFile() did not return a File"))
        }
        .boxed_local()
    }
}

impl FileBlob for WebFile {
    fn name(&self) -> String {
        self.0.name()
    }

    fn media_type(&self) -> String {
        self.0.type_()
    }

    fn size(&self) -> u64 {
        self.0.size() as u64
    }

    fn last_modified(&self) -> Option<f64> {
        Some(self.0.last_modified())
    }

    /// `webkitRelativePath`, which web-sys does not bind.
    fn relative_path_hint(&self) -> Option<String> {
        dom::get_string(&self.0, "webkitRelativePath").filter(|p| !p.is_empty())
    }

    fn read(&self) -> LocalBoxFuture<'static, Result<Vec<u8>, HostError>> {
        let promise = self.0.array_buffer();
        async move {
            let buffer = JsFuture::from(promise)
                .await
                .map_err(|e| dom::host_error(&e))?;
            Ok(Uint8Array::new(&buffer).to_vec())
        }
        .boxed_local()
    }
}

// =============================================================================
// Native Path
// =============================================================================

/// `window.showDirectoryPicker({ mode })`.
pub struct WebDirectoryPicker {
    window: Window,
}

impl WebDirectoryPicker {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl DirectoryPicker for WebDirectoryPicker {
    type Directory = WebDirectory;

    fn pick(&self, mode: SelectionMode) -> LocalBoxFuture<'_, Result<WebDirectory, HostError>> {
        async move {
            let show = dom::get_method(&self.window, DIRECTORY_PICKER_FN)
                .ok_or_else(|| HostError::new("NotSupportedError", "showDirectoryPicker is not available"))?;
            let options = serde_wasm_bindgen::to_value(&PickerOptions { mode })
                .map_err(|e| HostError::new("TypeError", e.to_string()))?;

            let promise = show
                .call1(&self.window, &options)
                .map_err(|e| dom::host_error(&e))?;
            let handle = JsFuture::from(Promise::from(promise))
                .await
                .map_err(|e| dom::host_error(&e))?;

            handle
                .dyn_into::<FileSystemDirectoryHandle>()
                .map(WebDirectory)
                .map_err(|_| HostError::new("TypeError", "picker did not return a directory handle"))
        }
        .boxed_local()
    }
}

// =============================================================================
// Fallback Path
// =============================================================================

/// Directory upload through a detached `<input type="file" webkitdirectory>`.
pub struct WebInputPrompt {
    document: Option<Document>,
}

impl WebInputPrompt {
    pub fn new(document: Option<Document>) -> Self {
        Self { document }
    }

    fn create_input(&self) -> Result<HtmlInputElement, CollectError> {
        let document = self
            .document
            .as_ref()
            .ok_or(CollectError::Unavailable("Document not available"))?;
        let input = document
            .create_element("input")
            .map_err(|_| CollectError::Unavailable("Failed to create file input"))?
            .dyn_into::<HtmlInputElement>()
            .map_err(|_| CollectError::Unavailable("Failed to create file input"))?;

        input.set_type("file");
        input.set_webkitdirectory(true);
        input.set_multiple(true);
        Ok(input)
    }
}

/// Resolve with the input's `FileList` on `change`, or `null` on `cancel`.
fn selection_promise(input: &HtmlInputElement) -> Promise {
    Promise::new(&mut |resolve, _reject| {
        let on_change = {
            let input = input.clone();
            let resolve = resolve.clone();
            Closure::once_into_js(move || {
                let files = input.files().map(JsValue::from).unwrap_or(JsValue::NULL);
                let _ = resolve.call1(&JsValue::NULL, &files);
            })
        };
        let on_cancel = Closure::once_into_js(move || {
            let _ = resolve.call1(&JsValue::NULL, &JsValue::NULL);
        });

        let _ = input.add_event_listener_with_callback("change", on_change.unchecked_ref());
        let _ = input.add_event_listener_with_callback("cancel", on_cancel.unchecked_ref());
    })
}

/// Open the native file dialog, preferring `showPicker()` over a synthetic click.
fn open_picker(input: &HtmlInputElement) {
    if let Some(show) = dom::get_method(input, SHOW_PICKER_FN)
        && show.call0(input).is_ok()
    {
        return;
    }
    input.click();
}

fn file_list_to_vec(list: &FileList) -> Vec<WebFile> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(WebFile)
        .collect()
}

impl FilePrompt for WebInputPrompt {
    type Directory = WebDirectory;

    fn pick_files(&self) -> LocalBoxFuture<'_, Result<Option<Vec<WebFile>>, CollectError>> {
        async move {
            let input = self.create_input()?;
            let selection = selection_promise(&input);
            open_picker(&input);

            let value = JsFuture::from(selection)
                .await
                .map_err(|e| CollectError::from(dom::host_error(&e)))?;

            if value.is_null() || value.is_undefined() {
                return Ok(None);
            }
            let list = value
                .dyn_into::<FileList>()
                .map_err(|_| CollectError::Unavailable("File input returned no file list"))?;
            Ok(Some(file_list_to_vec(&list)))
        }
        .boxed_local()
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use js_sys::{Array, Function, Object, Reflect};
    use wasm_bindgen_test::*;
    use web_sys::Event;

    wasm_bindgen_test_configure!(run_in_browser);

    fn prompt() -> WebInputPrompt {
        WebInputPrompt::new(dom::document())
    }

    fn text_file(name: &str) -> File {
        File::new_with_str_sequence(&Array::of1(&"hi".into()), name).unwrap()
    }

    #[wasm_bindgen_test]
    fn test_relative_path_hint_reads_webkit_path() {
        let file = text_file("y.txt");
        assert_eq!(WebFile(file.clone()).relative_path_hint(), None);

        let descriptor = Object::new();
        Reflect::set(&descriptor, &"value".into(), &"A/B/y.txt".into()).unwrap();
        Reflect::define_property(&file, &"webkitRelativePath".into(), &descriptor).unwrap();

        let blob = WebFile(file);
        assert_eq!(blob.relative_path_hint().as_deref(), Some("A/B/y.txt"));
        assert_eq!(FileBlob::name(&blob), "y.txt");
    }

    #[wasm_bindgen_test]
    fn test_input_is_a_directory_upload() {
        let input = prompt().create_input().unwrap();
        assert_eq!(input.type_(), "file");
        assert!(input.webkitdirectory());
        assert!(input.multiple());
    }

    #[wasm_bindgen_test]
    async fn test_cancel_event_resolves_to_null() {
        let input = prompt().create_input().unwrap();
        let selection = selection_promise(&input);

        input.dispatch_event(&Event::new("cancel").unwrap()).unwrap();

        let value = JsFuture::from(selection).await.unwrap();
        assert!(value.is_null());
    }

    #[wasm_bindgen_test]
    async fn test_change_event_resolves_to_file_list() {
        let input = prompt().create_input().unwrap();
        let selection = selection_promise(&input);

        input.dispatch_event(&Event::new("change").unwrap()).unwrap();

        let list = JsFuture::from(selection)
            .await
            .unwrap()
            .dyn_into::<FileList>()
            .unwrap();
        assert!(file_list_to_vec(&list).is_empty());
    }

    #[wasm_bindgen_test]
    fn test_show_picker_preferred_over_click() {
        let input = prompt().create_input().unwrap();
        let show = Function::new_no_args("this.setAttribute('data-opened', 'picker')");
        Reflect::set(&input, &SHOW_PICKER_FN.into(), &show).unwrap();
        let on_click = Function::new_no_args("this.setAttribute('data-clicked', 'yes')");
        input.add_event_listener_with_callback("click", &on_click).unwrap();

        open_picker(&input);

        assert_eq!(input.get_attribute("data-opened").as_deref(), Some("picker"));
        assert_eq!(input.get_attribute("data-clicked"), None);
    }

    #[wasm_bindgen_test]
    fn test_failing_show_picker_falls_back_to_click() {
        let input = prompt().create_input().unwrap();
        let show = Function::new_no_args("throw new DOMException('no gesture', 'NotAllowedError')");
        Reflect::set(&input, &SHOW_PICKER_FN.into(), &show).unwrap();
        let on_click = Function::new_no_args("this.setAttribute('data-clicked', 'yes')");
        input.add_event_listener_with_callback("click", &on_click).unwrap();

        open_picker(&input);

        assert_eq!(input.get_attribute("data-clicked").as_deref(), Some("yes"));
    }
}
