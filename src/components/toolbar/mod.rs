//! Toolbar with the folder picker trigger.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::config::APP_NAME;

stylance::import_crate_style!(css, "src/components/toolbar/toolbar.module.css");

/// Top bar: application name, "Open folder" and "Clear" buttons.
#[component]
pub fn Toolbar() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let busy = Signal::derive(move || ctx.picks.with(|p| p.is_busy()));
    let has_items = Signal::derive(move || ctx.gallery.with(|g| !g.is_empty()));

    let open = move |_: leptos::ev::MouseEvent| ctx.open_directory();
    let clear = move |_: leptos::ev::MouseEvent| ctx.clear();

    view! {
        <header class=css::bar>
            <span class=css::title>
                <Icon icon=ic::IMAGES />
                <span>{APP_NAME}</span>
            </span>

            <div class=css::actions>
                <button
                    id="folder-btn"
                    class=css::primary
                    on:click=open
                    aria-busy=move || busy.get().to_string()
                >
                    <Icon icon=ic::FOLDER_OPEN />
                    <span>"Open folder"</span>
                </button>
                <Show when=move || has_items.get()>
                    <button class=css::secondary on:click=clear title="Clear gallery">
                        <Icon icon=ic::CLEAR />
                    </button>
                </Show>
            </div>
        </header>
    }
}
