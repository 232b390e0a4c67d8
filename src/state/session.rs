//! Client-side session: the bearer token plus the cached user profile.
//!
//! SYSTEM CONTEXT
//! ==============
//! `SessionStore` is created once in `App`, provided as context, and handed
//! to `ApiClient` so every request can read the current token. It is the only
//! writer of the persisted token.
//!
//! NOTIFICATIONS
//! =============
//! Each mutating call publishes exactly one snapshot. Listeners run
//! synchronously, in registration order, outside the state lock. A mutation
//! made from inside a listener is queued and published after the current
//! snapshot has reached every listener, so delivery order always matches
//! invocation order.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use crate::config::TOKEN_STORAGE_KEY;
use crate::net::types::UserProfile;
use crate::util::storage::DurableStorage;

/// Snapshot of authentication state.
///
/// `token.is_some()` is the sole authentication predicate; `user` may lag
/// behind it (restored sessions start without a profile).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<UserProfile>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

type Listener = Arc<dyn Fn(&Session) + Send + Sync>;

#[derive(Default)]
struct Inner {
    session: Session,
    listeners: Vec<(u64, Listener)>,
    next_listener_id: u64,
    pending: VecDeque<Session>,
    publishing: bool,
}

/// Shared handle to the session. Clones point at the same state.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<Inner>>,
    storage: Arc<dyn DurableStorage>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Create a store, restoring a previously persisted token if one exists.
    ///
    /// An unreadable storage backend is logged and treated as "no token".
    pub fn load(storage: Arc<dyn DurableStorage>) -> Self {
        let token = match storage.read(TOKEN_STORAGE_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                log::warn!("session: persisted token unreadable, starting signed out: {e}");
                None
            }
        };
        if token.is_some() {
            log::debug!("session: restored persisted token");
        }
        let inner = Inner { session: Session { token, user: None }, ..Inner::default() };
        Self { inner: Arc::new(Mutex::new(inner)), storage }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn token(&self) -> Option<String> {
        self.lock().session.token.clone()
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.lock().session.user.clone()
    }

    pub fn snapshot(&self) -> Session {
        self.lock().session.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.lock().session.is_authenticated()
    }

    /// Replace the token. `Some` persists it, `None` (or an empty string)
    /// removes the persisted entry. Calling twice with the same value leaves
    /// the same state.
    pub fn set_token(&self, token: Option<String>) {
        let token = token.filter(|t| !t.is_empty());
        self.persist(token.as_deref());
        self.mutate(|s| s.token = token);
    }

    /// Replace the cached profile. Never persisted.
    pub fn set_user(&self, user: Option<UserProfile>) {
        self.mutate(|s| s.user = user);
    }

    /// Store a fresh login as a single transition.
    pub fn login(&self, token: String, user: Option<UserProfile>) {
        let token = Some(token).filter(|t| !t.is_empty());
        self.persist(token.as_deref());
        self.mutate(|s| {
            s.token = token;
            s.user = user;
        });
    }

    /// Clear token and profile as a single transition.
    pub fn logout(&self) {
        self.persist(None);
        self.mutate(|s| *s = Session::default());
    }

    /// Register `listener` for every subsequent transition.
    ///
    /// The listener stays attached until the returned handle is dropped or
    /// `unsubscribe` is called.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&Session) + Send + Sync + 'static,
    {
        let mut inner = self.lock();
        let id = inner.next_listener_id;
        inner.next_listener_id += 1;
        inner.listeners.push((id, Arc::new(listener)));
        Subscription { store: Some(Arc::downgrade(&self.inner)), id }
    }

    pub fn listener_count(&self) -> usize {
        self.lock().listeners.len()
    }

    fn persist(&self, token: Option<&str>) {
        let result = match token {
            Some(token) => self.storage.write(TOKEN_STORAGE_KEY, token),
            None => self.storage.remove(TOKEN_STORAGE_KEY),
        };
        if let Err(e) = result {
            log::warn!("session: token not persisted, continuing in memory: {e}");
        }
    }

    fn mutate(&self, apply: impl FnOnce(&mut Session)) {
        {
            let mut inner = self.lock();
            apply(&mut inner.session);
            let snapshot = inner.session.clone();
            inner.pending.push_back(snapshot);
            if inner.publishing {
                return;
            }
            inner.publishing = true;
        }
        self.drain();
    }

    fn drain(&self) {
        loop {
            let (snapshot, listeners) = {
                let mut inner = self.lock();
                let Some(snapshot) = inner.pending.pop_front() else {
                    inner.publishing = false;
                    return;
                };
                let listeners: Vec<Listener> = inner.listeners.iter().map(|(_, l)| Arc::clone(l)).collect();
                (snapshot, listeners)
            };
            for listener in &listeners {
                listener(&snapshot);
            }
        }
    }
}

/// Handle returned by `SessionStore::subscribe`.
#[must_use = "dropping a Subscription unsubscribes the listener"]
pub struct Subscription {
    store: Option<Weak<Mutex<Inner>>>,
    id: u64,
}

impl Subscription {
    /// Detach the listener now.
    pub fn unsubscribe(mut self) {
        self.remove();
    }

    fn remove(&mut self) {
        let Some(store) = self.store.take().and_then(|w| w.upgrade()) else {
            return;
        };
        let mut inner = store.lock().unwrap_or_else(PoisonError::into_inner);
        inner.listeners.retain(|(id, _)| *id != self.id);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.remove();
    }
}
