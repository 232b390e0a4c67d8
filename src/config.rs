//! Backend address configuration resolved once at startup.
//!
//! The override is read at build time via `option_env!`, the WASM analogue of
//! a bundler-injected environment variable: the browser has no process env.

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// localStorage key holding the persisted session token.
pub const TOKEN_STORAGE_KEY: &str = "token";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    /// Build config from the build-time environment.
    ///
    /// Optional:
    /// - `API_BASE_URL`: backend origin, default `http://localhost:8000`
    pub fn from_env() -> Self {
        Self::with_override(option_env!("API_BASE_URL"))
    }

    /// Build config from an explicit override, falling back to the default
    /// when it is absent or blank.
    pub fn with_override(raw: Option<&str>) -> Self {
        Self { base_url: resolve_base_url(raw) }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::with_override(None)
    }
}

fn resolve_base_url(raw: Option<&str>) -> String {
    raw.map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(DEFAULT_API_BASE_URL)
        .trim_end_matches('/')
        .to_owned()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
