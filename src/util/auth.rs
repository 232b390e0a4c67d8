//! Shared auth routing helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Protected routes and the root redirect apply the same predicate: a
//! session is authenticated iff it holds a token.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::app::{CALORIES_ROUTE, LOGIN_ROUTE};
use crate::state::session::Session;

pub fn should_redirect_unauth(session: &Session) -> bool {
    !session.is_authenticated()
}

/// Where `/` sends the user.
pub fn root_redirect_target(session: &Session) -> &'static str {
    if session.is_authenticated() { CALORIES_ROUTE } else { LOGIN_ROUTE }
}

/// Redirect to `/login` whenever the session loses its token.
pub fn install_unauth_redirect<F>(session: RwSignal<Session>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if should_redirect_unauth(&session.get()) {
            navigate(LOGIN_ROUTE, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}
