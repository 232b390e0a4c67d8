//! Networking: request pipeline, endpoint calls, and wire types.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` owns the configured client and bearer injection, `api` wraps each
//! backend endpoint, and `types` defines the JSON schema.

pub mod api;
pub mod http;
#[cfg(test)]
pub(crate) mod mock;
pub mod types;
