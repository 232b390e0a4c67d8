//! Loading indicator.

use leptos::prelude::*;

/// Rotating ring `size` rem wide.
#[component]
pub fn Spinner(#[prop(default = 6.0)] size: f64) -> impl IntoView {
    let style = format!("width: {size}rem; height: {size}rem;");
    view! {
        <div class="spinner" role="status" aria-label="Loading">
            <div class="spinner__ring" style=style></div>
        </div>
    }
}
