//! Page footer shown under every route.

#[cfg(test)]
#[path = "footer_test.rs"]
mod footer_test;

use leptos::prelude::*;

/// Current calendar year from the browser clock; `None` outside the browser.
pub fn current_year() -> Option<u32> {
    #[cfg(feature = "csr")]
    {
        Some(js_sys::Date::new_0().get_full_year())
    }
    #[cfg(not(feature = "csr"))]
    {
        None
    }
}

pub fn footer_text(year: Option<u32>) -> String {
    match year {
        Some(year) => format!("© {year} Calorie Counter All rights reserved."),
        None => "© Calorie Counter All rights reserved.".to_owned(),
    }
}

#[component]
pub fn Footer() -> impl IntoView {
    view! { <footer class="app-footer">{footer_text(current_year())}</footer> }
}
