//! Justified thumbnail grid.
//!
//! Rows are computed by [`layout::justify`] from each image's aspect ratio
//! and the measured container width. Clicking a tile opens the lightbox.

use leptos::ev;
use leptos::prelude::*;
use leptos_icons::Icon;
use leptos_use::use_media_query;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::config::MOBILE_MEDIA_QUERY;
use crate::core::layout::{self, Layout};
use crate::models::LightboxState;

stylance::import_crate_style!(css, "src/components/thumbnails/thumbnails.module.css");

#[component]
pub fn Thumbnails() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");

    let container_ref = NodeRef::<leptos::html::Div>::new();
    let (width, set_width) = signal(0.0_f64);
    let compact = use_media_query(MOBILE_MEDIA_QUERY);

    let measure = move || {
        if let Some(el) = container_ref.get_untracked() {
            set_width.set(el.client_width() as f64);
        }
    };

    // Measure once mounted and again whenever the gallery changes, since the
    // scrollbar may appear or disappear with it.
    Effect::new(move || {
        ctx.gallery.with(|g| g.generation());
        if container_ref.get().is_some() {
            measure();
        }
    });

    let resize = window_event_listener(ev::resize, move |_| measure());
    on_cleanup(move || resize.remove());

    let grid = Memo::new(move |_| {
        let ratios: Vec<f64> = ctx
            .gallery
            .with(|g| g.items().iter().map(|item| item.aspect_ratio()).collect());
        let options = ctx
            .options
            .with_value(|o| o.grid.layout(width.get(), compact.get()));
        layout::justify(&ratios, &options)
    });

    let captions = ctx.options.with_value(|o| o.grid.captions);

    let open = move |index: usize| {
        let len = ctx.gallery.with_untracked(|g| g.len());
        ctx.lightbox.set(LightboxState::open(index, len));
    };

    view! {
        <div class=css::grid node_ref=container_ref style:height=move || format!("{}px", grid.get().height)>
            <Show
                when=move || !ctx.gallery.with(|g| g.is_empty())
                fallback=|| view! {
                    <div class=css::empty>
                        <Icon icon=ic::IMAGES />
                        <p>"Choose a folder to browse its images."</p>
                    </div>
                }
            >
                {move || {
                    let Layout { tiles, .. } = grid.get();
                    tiles
                        .into_iter()
                        .filter_map(|tile| {
                            let item = ctx.gallery.with(|g| g.get(tile.index).cloned())?;
                            let index = tile.index;
                            Some(view! {
                                <figure
                                    class=css::tile
                                    style:left=format!("{}px", tile.x)
                                    style:top=format!("{}px", tile.y)
                                    style:width=format!("{}px", tile.width)
                                    style:height=format!("{}px", tile.height)
                                    on:click=move |_| open(index)
                                >
                                    <img src=item.thumb.clone() alt=item.caption.clone() loading="lazy" />
                                    {captions.then(|| view! {
                                        <figcaption class=css::caption>{item.caption.clone()}</figcaption>
                                    })}
                                </figure>
                            })
                        })
                        .collect_view()
                }}
            </Show>
        </div>
    }
}
