//! # calorie-client
//!
//! Leptos + WASM single-page client for the meal calorie lookup service.
//!
//! Users sign up, log in with email and password to obtain a bearer token,
//! and look up calories for a dish and serving count. The token is kept in
//! `localStorage` by the session store and attached to every request by
//! the API client.
//!
//! Everything except browser glue compiles natively, so the flows are unit
//! tested without a browser. Build the browser bundle with `--features csr`.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install panic/log hooks and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
