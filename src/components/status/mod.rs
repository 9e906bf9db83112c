//! Status line component.
//!
//! Shows progress while a directory is read, the summary afterwards, and
//! errors from the directory prompt.

use leptos::prelude::*;

use crate::app::AppContext;

stylance::import_crate_style!(css, "src/components/status/status.module.css");

#[component]
pub fn StatusLine() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");

    let class = Signal::derive(move || {
        if ctx.status.with(|s| s.is_error()) {
            format!("{} {}", css::line, css::error)
        } else {
            css::line.to_string()
        }
    });

    view! {
        {move || ctx.status.with(|s| s.text().map(str::to_string)).map(|text| view! {
            <div class=move || class.get() role="status">{text}</div>
        })}
    }
}
