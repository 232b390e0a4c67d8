use super::*;

fn signed_in() -> Session {
    Session { token: Some("abc".to_owned()), user: None }
}

#[test]
fn should_redirect_when_token_missing() {
    assert!(should_redirect_unauth(&Session::default()));
}

#[test]
fn should_not_redirect_with_token_even_without_profile() {
    assert!(!should_redirect_unauth(&signed_in()));
}

#[test]
fn root_redirects_signed_out_users_to_login() {
    assert_eq!(root_redirect_target(&Session::default()), "/login");
}

#[test]
fn root_redirects_signed_in_users_to_calories() {
    assert_eq!(root_redirect_target(&signed_in()), "/get-calories");
}

// =============================================================
// Session loss
// =============================================================

#[test]
fn losing_the_token_publishes_a_redirecting_snapshot() {
    use std::sync::{Arc, Mutex};

    use crate::state::session::SessionStore;
    use crate::util::storage::MemoryStorage;

    let store = SessionStore::load(Arc::new(MemoryStorage::new()));
    store.set_token(Some("abc".to_owned()));
    let redirects = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&redirects);
    let _sub = store.subscribe(move |s| sink.lock().unwrap().push(should_redirect_unauth(s)));

    store.set_user(None);
    store.logout();
    store.set_token(Some("fresh".to_owned()));
    store.set_token(None);

    assert_eq!(*redirects.lock().unwrap(), vec![false, true, false, true]);
}
