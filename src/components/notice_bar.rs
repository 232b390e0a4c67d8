//! Renders the app-wide `Notice`, if any, with a dismiss button.

use leptos::prelude::*;

use crate::state::notice::Notice;

#[component]
pub fn NoticeBar() -> impl IntoView {
    let notice = expect_context::<RwSignal<Option<Notice>>>();

    view! {
        {move || {
            notice
                .get()
                .map(|n| {
                    view! {
                        <div class=n.css_class() role="alert">
                            <span class="notice__text">{n.text.clone()}</span>
                            <button
                                class="notice__dismiss"
                                type="button"
                                title="Dismiss"
                                on:click=move |_| notice.set(None)
                            >
                                "×"
                            </button>
                        </div>
                    }
                })
        }}
    }
}
