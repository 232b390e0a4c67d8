//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern so pages depend on small focused models:
//! `session` is the authentication source of truth, `flow` gates form
//! submission, and `notice` carries the app-wide status line.

pub mod flow;
pub mod notice;
pub mod session;
