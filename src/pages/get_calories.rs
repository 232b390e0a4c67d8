//! Calorie lookup page, reachable only with a session token.
//!
//! FAILURE POLICY
//! ==============
//! Every failed lookup sends the user to `/login`, whatever the cause: a 404
//! for an unknown dish or a dropped connection redirects exactly like an
//! expired token does. Non-auth failures are logged as such so the coupling
//! stays visible.

#[cfg(test)]
#[path = "get_calories_test.rs"]
mod get_calories_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::app::LOGIN_ROUTE;
use crate::components::field_error::FieldError;
use crate::components::result_card::ResultCard;
use crate::components::spinner::Spinner;
use crate::net::api;
use crate::net::http::{ApiClient, ApiError};
use crate::net::types::{CalorieQuery, CalorieResult};
use crate::state::flow::FlowStatus;
use crate::state::notice::Notice;
use crate::state::session::{Session, SessionStore};
use crate::util::auth::install_unauth_redirect;

pub const CALORIES_FAILED: &str = "Error fetching calories";
pub const CALORIES_SUCCESS: &str = "Calories fetched";
pub const DISH_REQUIRED: &str = "Please enter the dish name";
pub const SERVINGS_NOT_WHOLE: &str = "Servings must be a whole number";
pub const SERVINGS_NOT_POSITIVE: &str = "Servings must be > 0";
pub const DEFAULT_SERVINGS: &str = "1";

/// Raw input values as typed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalorieForm {
    pub dish_name: String,
    pub servings: String,
}

impl Default for CalorieForm {
    fn default() -> Self {
        Self { dish_name: String::new(), servings: DEFAULT_SERVINGS.to_owned() }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CalorieErrors {
    pub dish_name: Option<&'static str>,
    pub servings: Option<&'static str>,
}

impl CalorieErrors {
    pub fn is_empty(&self) -> bool {
        self.dish_name.is_none() && self.servings.is_none()
    }
}

/// Everything the page shows below the header.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LookupState {
    pub form: CalorieForm,
    pub errors: CalorieErrors,
    pub result: Option<CalorieResult>,
}

impl LookupState {
    /// Back to the initial form with no messages and no result.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn parse_servings(raw: &str) -> Result<u32, &'static str> {
    let servings: i64 = raw.trim().parse().map_err(|_| SERVINGS_NOT_WHOLE)?;
    if servings <= 0 {
        return Err(SERVINGS_NOT_POSITIVE);
    }
    u32::try_from(servings).map_err(|_| SERVINGS_NOT_WHOLE)
}

/// # Errors
///
/// Returns the per-field messages when the dish is blank or servings is not
/// a positive integer.
pub fn validate_query(form: &CalorieForm) -> Result<CalorieQuery, CalorieErrors> {
    let dish_name = form.dish_name.trim();
    let servings = parse_servings(&form.servings);
    let errors = CalorieErrors {
        dish_name: dish_name.is_empty().then_some(DISH_REQUIRED),
        servings: servings.err(),
    };
    match servings {
        Ok(servings) if errors.is_empty() => Ok(CalorieQuery { dish_name: dish_name.to_owned(), servings }),
        _ => Err(errors),
    }
}

/// A failed lookup: what to tell the user and where to send them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalorieFailure {
    pub message: String,
    pub redirect_to: &'static str,
}

impl CalorieFailure {
    fn from_error(err: &ApiError) -> Self {
        if err.is_auth_failure() {
            log::warn!("calories: session rejected: {err}");
        } else {
            log::warn!("calories: redirecting to login after non-auth failure: {err}");
        }
        Self { message: err.user_message(CALORIES_FAILED), redirect_to: LOGIN_ROUTE }
    }
}

/// Look up `query`; the result is returned untouched.
///
/// # Errors
///
/// Any failure maps to a `CalorieFailure` redirecting to `/login`.
pub async fn submit_query(client: &ApiClient, query: CalorieQuery) -> Result<CalorieResult, CalorieFailure> {
    api::get_calories(client, &query)
        .await
        .map_err(|e| CalorieFailure::from_error(&e))
}

#[component]
pub fn GetCaloriesPage() -> impl IntoView {
    let client = expect_context::<ApiClient>();
    let store = expect_context::<SessionStore>();
    let session = expect_context::<RwSignal<Session>>();
    let notice = expect_context::<RwSignal<Option<Notice>>>();
    let navigate = use_navigate();

    install_unauth_redirect(session, navigate.clone());

    let page = RwSignal::new(LookupState::default());
    let status = RwSignal::new(FlowStatus::Idle);

    let navigate_submit = navigate.clone();
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let query = match page.with_untracked(|p| validate_query(&p.form)) {
            Ok(query) => query,
            Err(e) => {
                page.update(|p| p.errors = e);
                return;
            }
        };
        page.update(|p| p.errors = CalorieErrors::default());
        if !status.try_update(FlowStatus::try_begin).unwrap_or(false) {
            return;
        }

        let client = client.clone();
        let navigate = navigate_submit.clone();
        leptos::task::spawn_local(async move {
            let outcome = submit_query(&client, query).await;
            status.update(FlowStatus::finish);
            match outcome {
                Ok(found) => {
                    page.update(|p| p.result = Some(found));
                    notice.set(Some(Notice::success(CALORIES_SUCCESS)));
                }
                Err(failure) => {
                    notice.set(Some(Notice::error(failure.message)));
                    navigate(failure.redirect_to, NavigateOptions::default());
                }
            }
        });
    };

    let on_reset = move |_| page.update(LookupState::reset);

    let on_logout = move |_| {
        store.logout();
        notice.set(None);
        navigate(LOGIN_ROUTE, NavigateOptions::default());
    };

    let greeting = move || {
        session
            .get()
            .user
            .and_then(|u| u.display_name().map(|name| format!("Hi, {name}")))
    };

    view! {
        <div class="calories-page">
            <header class="calories-page__header">
                <h1 class="calories-page__title">"Meal Calorie Lookup"</h1>
                <span class="calories-page__greeting">{greeting}</span>
                <button class="btn btn--dark" type="button" on:click=on_logout>
                    "Logout"
                </button>
            </header>

            <form class="calories-form" on:submit=on_submit>
                <label class="calories-form__label">
                    "Dish name"
                    <input
                        class="calories-form__input"
                        prop:value=move || page.with(|p| p.form.dish_name.clone())
                        on:input=move |ev| page.update(|p| p.form.dish_name = event_target_value(&ev))
                    />
                </label>
                <FieldError message=Signal::derive(move || page.with(|p| p.errors.dish_name))/>
                <label class="calories-form__label">
                    "Servings"
                    <input
                        class="calories-form__input calories-form__input--narrow"
                        type="number"
                        min="1"
                        step="1"
                        prop:value=move || page.with(|p| p.form.servings.clone())
                        on:input=move |ev| page.update(|p| p.form.servings = event_target_value(&ev))
                    />
                </label>
                <FieldError message=Signal::derive(move || page.with(|p| p.errors.servings))/>
                <div class="calories-form__actions">
                    <button class="btn btn--primary" type="submit" disabled=move || status.get().is_submitting()>
                        <Show when=move || status.get().is_submitting() fallback=|| "Get calories">
                            <span class="btn__loading">
                                <Spinner size=1.2/>
                                "Loading..."
                            </span>
                        </Show>
                    </button>
                    <button class="btn btn--dark" type="button" on:click=on_reset>
                        "Reset"
                    </button>
                </div>
            </form>

            <section class="calories-page__result">
                {move || {
                    if status.get().is_submitting() {
                        view! { <Spinner size=2.0/> }.into_any()
                    } else if let Some(found) = page.with(|p| p.result.clone()) {
                        view! { <ResultCard result=found/> }.into_any()
                    } else {
                        view! {
                            <p class="calories-page__placeholder">
                                "Enter a dish and click \"Get calories\" to see results"
                            </p>
                        }
                            .into_any()
                    }
                }}
            </section>
        </div>
    }
}
