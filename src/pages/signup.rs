//! Signup page: every rule is checked client-side before the request.

#[cfg(test)]
#[path = "signup_test.rs"]
mod signup_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;
use validator::{Validate, ValidationErrors};

use crate::app::LOGIN_ROUTE;
use crate::components::field_error::FieldError;
use crate::net::api;
use crate::net::http::ApiClient;
use crate::net::types::Registration;
use crate::state::flow::FlowStatus;
use crate::state::notice::Notice;
use crate::util::validate::{EMAIL_SHAPE, password_has_special};

pub const SIGNUP_FAILED: &str = "Signup failed";
pub const SIGNUP_SUCCESS: &str = "Registered. Please login.";
pub const FIRST_NAME_REQUIRED: &str = "First name required";
pub const LAST_NAME_REQUIRED: &str = "Last name required";
pub const INVALID_EMAIL: &str = "Invalid email";
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 8 characters";
pub const PASSWORD_NEEDS_SPECIAL: &str = "Password must contain at least one special character (!@#$%^&*)";

/// Input values. Every rule lives on the fields; `validate_signup` runs them
/// on the trimmed copy and maps rule codes to the messages above.
#[derive(Clone, Debug, Default, PartialEq, Eq, Validate)]
pub struct SignupForm {
    #[validate(length(min = 2))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    #[validate(email, regex(path = *EMAIL_SHAPE))]
    pub email: String,
    #[validate(length(min = 8), custom(function = password_has_special))]
    pub password: String,
}

impl SignupForm {
    /// Names and email trimmed; the password is kept as typed.
    fn trimmed(&self) -> Self {
        Self {
            first_name: self.first_name.trim().to_owned(),
            last_name: self.last_name.trim().to_owned(),
            email: self.email.trim().to_owned(),
            password: self.password.clone(),
        }
    }
}

/// First failing rule per field; `None` means the field passed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignupErrors {
    pub first_name: Option<&'static str>,
    pub last_name: Option<&'static str>,
    pub email: Option<&'static str>,
    pub password: Option<&'static str>,
}

impl SignupErrors {
    /// Length is reported before the special-character rule.
    fn from_validation(errors: &ValidationErrors) -> Self {
        let fields = errors.field_errors();
        let failed = |field: &str| fields.get(field).is_some_and(|errs| !errs.is_empty());
        let password = fields.get("password").filter(|errs| !errs.is_empty()).map(|errs| {
            if errs.iter().any(|e| e.code == "length") { PASSWORD_TOO_SHORT } else { PASSWORD_NEEDS_SPECIAL }
        });
        Self {
            first_name: failed("first_name").then_some(FIRST_NAME_REQUIRED),
            last_name: failed("last_name").then_some(LAST_NAME_REQUIRED),
            email: failed("email").then_some(INVALID_EMAIL),
            password,
        }
    }
}

/// # Errors
///
/// Returns the per-field messages when any rule fails.
pub fn validate_signup(form: &SignupForm) -> Result<Registration, SignupErrors> {
    let candidate = form.trimmed();
    candidate.validate().map_err(|e| SignupErrors::from_validation(&e))?;
    Ok(Registration {
        first_name: candidate.first_name,
        last_name: candidate.last_name,
        email: candidate.email,
        password: candidate.password,
    })
}

/// Register the account. Signup never signs the user in.
///
/// # Errors
///
/// Returns the message to show the user.
pub async fn submit_signup(client: &ApiClient, registration: Registration) -> Result<(), String> {
    api::register(client, &registration).await.map_err(|e| {
        log::error!("signup: {e}");
        e.user_message(SIGNUP_FAILED)
    })
}

#[component]
pub fn SignupPage() -> impl IntoView {
    let client = expect_context::<ApiClient>();
    let notice = expect_context::<RwSignal<Option<Notice>>>();
    let navigate = use_navigate();

    let form = RwSignal::new(SignupForm::default());
    let errors = RwSignal::new(SignupErrors::default());
    let status = RwSignal::new(FlowStatus::Idle);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let registration = match validate_signup(&form.get_untracked()) {
            Ok(registration) => registration,
            Err(e) => {
                errors.set(e);
                return;
            }
        };
        errors.set(SignupErrors::default());
        if !status.try_update(FlowStatus::try_begin).unwrap_or(false) {
            return;
        }

        let client = client.clone();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            let outcome = submit_signup(&client, registration).await;
            status.update(FlowStatus::finish);
            match outcome {
                Ok(()) => {
                    notice.set(Some(Notice::success(SIGNUP_SUCCESS)));
                    navigate(LOGIN_ROUTE, NavigateOptions::default());
                }
                Err(message) => notice.set(Some(Notice::error(message))),
            }
        });
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h2 class="auth-card__title">"Sign up"</h2>
                <form class="auth-form" on:submit=on_submit>
                    <label class="auth-label">
                        "First name"
                        <input
                            class="auth-input"
                            autocomplete="given-name"
                            prop:value=move || form.get().first_name
                            on:input=move |ev| form.update(|f| f.first_name = event_target_value(&ev))
                        />
                    </label>
                    <FieldError message=Signal::derive(move || errors.get().first_name)/>
                    <label class="auth-label">
                        "Last name"
                        <input
                            class="auth-input"
                            autocomplete="family-name"
                            prop:value=move || form.get().last_name
                            on:input=move |ev| form.update(|f| f.last_name = event_target_value(&ev))
                        />
                    </label>
                    <FieldError message=Signal::derive(move || errors.get().last_name)/>
                    <label class="auth-label">
                        "Email"
                        <input
                            class="auth-input"
                            type="email"
                            autocomplete="email"
                            prop:value=move || form.get().email
                            on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                        />
                    </label>
                    <FieldError message=Signal::derive(move || errors.get().email)/>
                    <label class="auth-label">
                        "Password"
                        <input
                            class="auth-input"
                            type="password"
                            autocomplete="new-password"
                            prop:value=move || form.get().password
                            on:input=move |ev| form.update(|f| f.password = event_target_value(&ev))
                        />
                    </label>
                    <FieldError message=Signal::derive(move || errors.get().password)/>
                    <button class="auth-button" type="submit" disabled=move || status.get().is_submitting()>
                        {move || if status.get().is_submitting() { "Signing up..." } else { "Sign up" }}
                    </button>
                </form>
                <p class="auth-card__switch">
                    "Already have an account? "
                    <A href=LOGIN_ROUTE>"Login"</A>
                </p>
            </div>
        </div>
    }
}
