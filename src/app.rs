//! Root application module.
//!
//! Contains the main App component, AppContext definition, and the
//! pick-and-display workflow.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::components::{Lightbox, StatusLine, Thumbnails, Toolbar};
use crate::config::{GalleryOptions, STATUS_TIMEOUT_MS};
use crate::core::collector::{self, Collected};
use crate::core::gallery::{self, ResourceFactory};
use crate::models::{
    GalleryItem, GalleryState, LightboxState, PickTracker, SelectionMode, StatusMessage,
};
use crate::utils::format::format_summary;
use crate::utils::{ObjectUrls, diagnostics};

stylance::import_crate_style!(css, "src/app.module.css");

// ============================================================================
// AppContext
// ============================================================================

/// Application-wide reactive context.
///
/// This context is provided at the root of the component tree and can be
/// accessed from any child component using `use_context::<AppContext>()`.
///
/// # Note
///
/// This struct is `Copy` because all fields are Leptos signals or stored
/// values, which are cheap to copy.
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Images currently shown.
    pub gallery: RwSignal<GalleryState>,
    /// Lightbox position and zoom.
    pub lightbox: RwSignal<LightboxState>,
    /// Status line text.
    pub status: RwSignal<StatusMessage>,
    /// Directory picks; the newest one owns the gallery.
    pub picks: RwSignal<PickTracker>,
    /// Grid and lightbox settings.
    pub options: StoredValue<GalleryOptions>,
}

impl AppContext {
    /// Creates a new application context with an empty gallery.
    pub fn new() -> Self {
        Self {
            gallery: RwSignal::new(GalleryState::default()),
            lightbox: RwSignal::new(LightboxState::Closed),
            status: RwSignal::new(StatusMessage::Idle),
            picks: RwSignal::new(PickTracker::default()),
            options: StoredValue::new(GalleryOptions::load()),
        }
    }

    /// Ask for a directory and show its images.
    ///
    /// The previous gallery is replaced only when the pick succeeds;
    /// cancelling or failing leaves it untouched. Clicking again while a pick
    /// is pending starts a new one, and the older pick's outcome is dropped.
    pub fn open_directory(self) {
        let Some(ticket) = self.picks.try_update(|p| p.begin()) else {
            return;
        };
        self.status.set(StatusMessage::Loading);

        spawn_local(async move {
            let collected = collector::collect(SelectionMode::default()).await;
            if !self.picks.with_untracked(|p| p.is_current(ticket)) {
                return;
            }

            match collected {
                Ok(Collected::Files(mut result)) => {
                    let build = gallery::build_items(&result, &ObjectUrls).await;
                    if !self.picks.with_untracked(|p| p.is_current(ticket)) {
                        ObjectUrls.release(&build.items);
                        return;
                    }
                    result.extend_skipped(build.skipped);
                    self.show_items(build.items);

                    let summary = if result.is_empty() && result.skipped().is_empty() {
                        "The selected folder is empty".to_string()
                    } else {
                        let (images, image_bytes) = self
                            .gallery
                            .with_untracked(|g| (g.len(), g.total_size()));
                        let mut summary = format_summary(images, image_bytes, result.len());
                        if !result.skipped().is_empty() {
                            summary.push_str(&format!(" ({} unreadable)", result.skipped().len()));
                        }
                        summary
                    };
                    diagnostics::info(&summary);
                    self.set_status(StatusMessage::Info(summary));
                }
                Ok(Collected::Cancelled) => self.status.set(StatusMessage::Idle),
                Err(err) => self.status.set(StatusMessage::Error(err.to_string())),
            }
            self.picks.update(|p| {
                p.finish(ticket);
            });
        });
    }

    /// Replace the gallery contents and release the previous object URLs.
    pub fn show_items(&self, items: Vec<GalleryItem>) {
        let len = items.len();
        let previous = self
            .gallery
            .try_update(|g| g.replace(items))
            .unwrap_or_default();
        ObjectUrls.release(&previous);

        let open = self.options.with_value(|o| o.lightbox.open_on_load);
        self.lightbox.set(if open {
            LightboxState::open(0, len)
        } else {
            LightboxState::Closed
        });
    }

    /// Empty the gallery.
    pub fn clear(&self) {
        self.lightbox.set(LightboxState::Closed);
        let previous = self.gallery.try_update(|g| g.clear()).unwrap_or_default();
        ObjectUrls.release(&previous);
        self.status.set(StatusMessage::Idle);
    }

    /// Show a status message; informational ones clear themselves.
    pub fn set_status(self, status: StatusMessage) {
        self.status.set(status.clone());
        if status.is_transient() {
            spawn_local(async move {
                TimeoutFuture::new(STATUS_TIMEOUT_MS).await;
                if self.status.get_untracked() == status {
                    self.status.set(StatusMessage::Idle);
                }
            });
        }
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Root application component.
///
/// Creates and provides the global AppContext, then renders the toolbar,
/// thumbnail grid, and lightbox.
#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new();
    provide_context(ctx);

    view! {
        <div class=css::app>
            <Toolbar />
            <StatusLine />
            <main class=css::content>
                <Thumbnails />
            </main>
            <Lightbox />
        </div>
    }
}
