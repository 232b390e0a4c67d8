//! Root application component with routing and context providers.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{ProtectedRoute, Redirect, Route, Router, Routes},
};

use crate::components::{footer::Footer, notice_bar::NoticeBar};
use crate::config::ApiConfig;
use crate::net::http::{ApiClient, FetchTransport};
use crate::pages::{get_calories::GetCaloriesPage, login::LoginPage, signup::SignupPage};
use crate::state::notice::Notice;
use crate::state::session::{Session, SessionStore};
use crate::util::auth::root_redirect_target;
use crate::util::storage::BrowserStorage;

pub const ROOT_ROUTE: &str = "/";
pub const LOGIN_ROUTE: &str = "/login";
pub const SIGNUP_ROUTE: &str = "/signup";
pub const CALORIES_ROUTE: &str = "/get-calories";

/// Root application component.
///
/// Builds the session store over `localStorage` and the fetch-backed client,
/// then hands both to `AppShell`.
#[component]
pub fn App() -> impl IntoView {
    let config = ApiConfig::from_env();
    log::info!("api base url: {}", config.base_url);
    let store = SessionStore::load(Arc::new(BrowserStorage));
    let client = ApiClient::new(&config, store.clone(), Arc::new(FetchTransport));

    view! { <AppShell store=store client=client/> }
}

/// Provides all shared state contexts and sets up client-side routing.
///
/// `RwSignal<Session>` mirrors the store so views and route guards can track
/// it; the mirror is fed by a store subscription released on cleanup.
#[component]
pub fn AppShell(store: SessionStore, client: ApiClient) -> impl IntoView {
    provide_meta_context();

    let session = RwSignal::new(store.snapshot());
    let subscription = store.subscribe(move |s| session.set(s.clone()));
    on_cleanup(move || subscription.unsubscribe());

    let notice = RwSignal::new(None::<Notice>);

    provide_context(store);
    provide_context(client);
    provide_context(session);
    provide_context(notice);

    view! {
        <Title text="Meal Calorie Lookup"/>

        <Router>
            <div class="app">
                <NoticeBar/>
                <main class="app__main">
                    <Routes fallback=|| view! { <Redirect path=ROOT_ROUTE/> }>
                        <Route path=StaticSegment("") view=RootRedirect/>
                        <Route path=StaticSegment("login") view=LoginPage/>
                        <Route path=StaticSegment("signup") view=SignupPage/>
                        <ProtectedRoute
                            path=StaticSegment("get-calories")
                            view=GetCaloriesPage
                            condition=move || Some(session.get().is_authenticated())
                            redirect_path=|| LOGIN_ROUTE
                        />
                    </Routes>
                </main>
                <Footer/>
            </div>
        </Router>
    }
}

/// `/` forwards to the calorie page when signed in, else to login.
#[component]
fn RootRedirect() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    view! { <Redirect path=root_redirect_target(&session.get_untracked())/> }
}
