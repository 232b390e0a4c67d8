//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns its flow: validation, the backend call, the session write,
//! and the resulting navigation. The flow logic is plain async Rust so it
//! can be exercised without a browser; the `#[component]` only wires it to
//! signals and the router.

pub mod get_calories;
pub mod login;
pub mod signup;
