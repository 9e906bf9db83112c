//! Full-screen image viewer.
//!
//! Shows one gallery item at a time with previous/next navigation, optional
//! zoom and rotate controls, and a thumbnail strip. Keyboard: ArrowLeft and
//! ArrowRight navigate, Escape closes, `+` and `-` zoom.

use leptos::ev;
use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::models::LightboxState;
use crate::utils::dom;
use crate::utils::format::{format_date_iso, format_size};

stylance::import_crate_style!(css, "src/components/lightbox/lightbox.module.css");

/// Fragment written to the URL when hash sync is on (`#item-3`).
fn item_hash(index: usize) -> String {
    format!("#item-{}", index + 1)
}

/// Detail line under the caption: "1.2M · 800×600 · 2024-02-29".
fn details(size: u64, dimensions: Option<(u32, u32)>, last_modified: Option<f64>) -> String {
    let mut parts = vec![format_size(size)];
    if let Some((w, h)) = dimensions {
        parts.push(format!("{}×{}", w, h));
    }
    if let Some(ms) = last_modified {
        parts.push(format_date_iso(ms));
    }
    parts.join(" · ")
}

#[component]
pub fn Lightbox() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");
    let options = ctx.options.with_value(|o| o.lightbox);

    let len = move || ctx.gallery.with_untracked(|g| g.len());
    let go_prev = move || ctx.lightbox.update(|s| *s = s.prev(len()));
    let go_next = move || ctx.lightbox.update(|s| *s = s.next(len()));
    let close = move || ctx.lightbox.set(LightboxState::Closed);
    let zoom = move |on: bool| {
        if options.zoom && ctx.lightbox.with_untracked(|s| s.is_zoomed()) != on {
            ctx.lightbox.update(|s| *s = s.toggle_zoom());
        }
    };

    let (rotation, set_rotation) = signal(0_i32);

    // Rotation is per view; any navigation starts upright.
    Effect::new(move |_| {
        ctx.lightbox.with(|s| s.index());
        set_rotation.set(0);
    });

    if options.hash {
        Effect::new(move |_| {
            let hash = ctx.lightbox.with(|s| s.index()).map(item_hash).unwrap_or_default();
            if let Some(location) = dom::window().map(|w| w.location()) {
                let _ = location.set_hash(&hash);
            }
        });
    }

    let keydown = window_event_listener(ev::keydown, move |e| {
        if !ctx.lightbox.with_untracked(|s| s.is_open()) {
            return;
        }
        match e.key().as_str() {
            "ArrowLeft" => go_prev(),
            "ArrowRight" => go_next(),
            "Escape" => close(),
            "+" | "=" => zoom(true),
            "-" => zoom(false),
            _ => return,
        }
        e.prevent_default();
    });
    on_cleanup(move || keydown.remove());

    let current = Memo::new(move |_| {
        let index = ctx.lightbox.with(|s| s.index())?;
        ctx.gallery.with(|g| g.get(index).cloned())
    });

    let image_class = move || {
        if ctx.lightbox.with(|s| s.is_zoomed()) {
            format!("{} {}", css::image, css::zoomed)
        } else {
            css::image.to_string()
        }
    };

    view! {
        <Show when=move || current.with(Option::is_some)>
            <div class=css::overlay role="dialog" aria-modal="true">
                <div class=css::controls>
                    <span class=css::counter>
                        {move || {
                            ctx.lightbox
                                .with(|s| s.index())
                                .map(|i| format!("{} / {}", i + 1, len()))
                                .unwrap_or_default()
                        }}
                    </span>
                    {options.zoom.then(|| view! {
                        <button class=css::control title="Zoom in" on:click=move |_| zoom(true)>
                            <Icon icon=ic::ZOOM_IN />
                        </button>
                        <button class=css::control title="Zoom out" on:click=move |_| zoom(false)>
                            <Icon icon=ic::ZOOM_OUT />
                        </button>
                    })}
                    {options.rotate.then(|| view! {
                        <button
                            class=css::control
                            title="Rotate"
                            on:click=move |_| set_rotation.update(|r| *r = (*r + 90) % 360)
                        >
                            <Icon icon=ic::ROTATE />
                        </button>
                    })}
                    <button class=css::control title="Close" on:click=move |_| close()>
                        <Icon icon=ic::CLOSE />
                    </button>
                </div>

                <button class=format!("{} {}", css::nav, css::prev) title="Previous" on:click=move |_| go_prev()>
                    <Icon icon=ic::CHEVRON_LEFT />
                </button>

                <figure class=css::stage>
                    {move || current.get().map(|item| view! {
                        <img
                            class=image_class
                            src=item.src.clone()
                            alt=item.caption.clone()
                            style:transform=move || format!("rotate({}deg)", rotation.get())
                            on:click=move |_| {
                                if options.zoom {
                                    ctx.lightbox.update(|s| *s = s.toggle_zoom());
                                }
                            }
                        />
                        <figcaption class=css::caption>
                            <span class=css::name title=item.relative_path.clone()>{item.caption.clone()}</span>
                            <span class=css::details>
                                {details(item.size, item.dimensions, item.last_modified)}
                            </span>
                        </figcaption>
                    })}
                </figure>

                <button class=format!("{} {}", css::nav, css::next) title="Next" on:click=move |_| go_next()>
                    <Icon icon=ic::CHEVRON_RIGHT />
                </button>

                {options.thumbnails.then(|| view! {
                    <div class=css::strip>
                        {move || {
                            let selected = ctx.lightbox.with(|s| s.index());
                            ctx.gallery.with(|g| {
                                g.items()
                                    .iter()
                                    .enumerate()
                                    .map(|(i, item)| {
                                        let class = if selected == Some(i) {
                                            format!("{} {}", css::thumb, css::active)
                                        } else {
                                            css::thumb.to_string()
                                        };
                                        view! {
                                            <img
                                                class=class
                                                src=item.thumb.clone()
                                                alt=item.caption.clone()
                                                on:click=move |_| {
                                                    ctx.lightbox.set(LightboxState::open(i, len()))
                                                }
                                            />
                                        }
                                    })
                                    .collect_view()
                            })
                        }}
                    </div>
                })}
            </div>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_hash_is_one_based() {
        assert_eq!(item_hash(0), "#item-1");
        assert_eq!(item_hash(9), "#item-10");
    }

    #[test]
    fn test_details_skip_unknown_fields() {
        assert_eq!(details(500, None, None), "500B");
        assert_eq!(
            details(1_500_000, Some((800, 600)), Some(1_709_208_000_000.0)),
            "1.5M · 800×600 · 2024-02-29"
        );
    }
}
