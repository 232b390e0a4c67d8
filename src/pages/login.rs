//! Login page: email + password exchanged for a bearer token.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::app::{CALORIES_ROUTE, SIGNUP_ROUTE};
use crate::components::field_error::FieldError;
use crate::net::api;
use crate::net::http::{ApiClient, ApiError};
use crate::net::types::Credentials;
use crate::state::flow::FlowStatus;
use crate::state::notice::Notice;

pub const LOGIN_FAILED: &str = "Login failed invalid credentials";
pub const LOGIN_NO_TOKEN: &str = "Login failed: no token returned";
pub const LOGIN_SUCCESS: &str = "Logged in";
pub const EMAIL_REQUIRED: &str = "Email required";
pub const PASSWORD_REQUIRED: &str = "Password required";

/// Per-field messages; `None` means the field passed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginErrors {
    pub email: Option<&'static str>,
    pub password: Option<&'static str>,
}

impl LoginErrors {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.password.is_none()
    }
}

/// Presence check only; login deliberately does not validate email format.
///
/// # Errors
///
/// Returns the per-field messages when either field is empty.
pub fn validate_login(email: &str, password: &str) -> Result<Credentials, LoginErrors> {
    let email = email.trim();
    let errors = LoginErrors {
        email: email.is_empty().then_some(EMAIL_REQUIRED),
        password: password.is_empty().then_some(PASSWORD_REQUIRED),
    };
    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(Credentials { email: email.to_owned(), password: password.to_owned() })
}

/// Run the login request and, on success, store token and profile in the
/// session as one transition. The session is untouched on failure.
///
/// # Errors
///
/// Returns the message to show the user.
pub async fn submit_login(client: &ApiClient, credentials: Credentials) -> Result<(), String> {
    match api::login(client, &credentials).await {
        Ok(grant) => {
            client.session().login(grant.token, grant.user);
            log::debug!("login: session established");
            Ok(())
        }
        Err(ApiError::MissingToken) => {
            log::warn!("login: 2xx response without a token");
            Err(LOGIN_NO_TOKEN.to_owned())
        }
        Err(e) => {
            log::error!("login: {e}");
            Err(e.user_message(LOGIN_FAILED))
        }
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let client = expect_context::<ApiClient>();
    let notice = expect_context::<RwSignal<Option<Notice>>>();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let errors = RwSignal::new(LoginErrors::default());
    let status = RwSignal::new(FlowStatus::Idle);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let credentials = match validate_login(&email.get_untracked(), &password.get_untracked()) {
            Ok(credentials) => credentials,
            Err(e) => {
                errors.set(e);
                return;
            }
        };
        errors.set(LoginErrors::default());
        if !status.try_update(FlowStatus::try_begin).unwrap_or(false) {
            return;
        }

        let client = client.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            let outcome = submit_login(&client, credentials).await;
            status.update(FlowStatus::finish);
            match outcome {
                Ok(()) => {
                    notice.set(Some(Notice::success(LOGIN_SUCCESS)));
                    navigate(CALORIES_ROUTE, NavigateOptions::default());
                }
                Err(message) => notice.set(Some(Notice::error(message))),
            }
        });
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h2 class="auth-card__title">"Login"</h2>
                <form class="auth-form" on:submit=on_submit>
                    <label class="auth-label">
                        "Email"
                        <input
                            class="auth-input"
                            type="email"
                            autocomplete="email"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                    </label>
                    <FieldError message=Signal::derive(move || errors.get().email)/>
                    <label class="auth-label">
                        "Password"
                        <input
                            class="auth-input"
                            type="password"
                            autocomplete="current-password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                    </label>
                    <FieldError message=Signal::derive(move || errors.get().password)/>
                    <button class="auth-button" type="submit" disabled=move || status.get().is_submitting()>
                        {move || if status.get().is_submitting() { "Logging in..." } else { "Login" }}
                    </button>
                </form>
                <p class="auth-card__switch">
                    "Don't have an account? "
                    <A href=SIGNUP_ROUTE>"Sign up"</A>
                </p>
            </div>
        </div>
    }
}
