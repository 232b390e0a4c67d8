use super::*;

#[test]
fn missing_override_uses_default() {
    let cfg = ApiConfig::with_override(None);
    assert_eq!(cfg.base_url, DEFAULT_API_BASE_URL);
}

#[test]
fn blank_override_uses_default() {
    let cfg = ApiConfig::with_override(Some("   "));
    assert_eq!(cfg.base_url, DEFAULT_API_BASE_URL);
}

#[test]
fn override_replaces_default() {
    let cfg = ApiConfig::with_override(Some("https://api.example.test"));
    assert_eq!(cfg.base_url, "https://api.example.test");
}

#[test]
fn override_trailing_slashes_are_trimmed() {
    let cfg = ApiConfig::with_override(Some(" https://api.example.test/// "));
    assert_eq!(cfg.base_url, "https://api.example.test");
}

#[test]
fn default_matches_with_override_none() {
    assert_eq!(ApiConfig::default(), ApiConfig::with_override(None));
}

#[test]
fn token_storage_key_is_stable() {
    assert_eq!(TOKEN_STORAGE_KEY, "token");
}
