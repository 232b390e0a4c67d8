//! Scripted `Transport` for unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::http::{ApiClient, ApiError, ApiRequest, ApiResponse, Transport};
use crate::config::ApiConfig;
use crate::state::session::SessionStore;
use crate::util::storage::MemoryStorage;

pub const TEST_BASE_URL: &str = "http://api.test";

/// Replays queued replies in order and records every request it sees.
/// With nothing queued it fails like an unreachable host.
#[derive(Default)]
pub struct MockTransport {
    replies: Mutex<VecDeque<Result<ApiResponse, ApiError>>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn replying(status: u16, body: serde_json::Value) -> Arc<Self> {
        let mock = Self::new();
        mock.push_reply(status, body);
        mock
    }

    pub fn failing(message: &str) -> Arc<Self> {
        let mock = Self::new();
        mock.replies.lock().unwrap().push_back(Err(ApiError::Network(message.to_owned())));
        mock
    }

    pub fn push_reply(&self, status: u16, body: serde_json::Value) {
        self.push_raw(status, &body.to_string());
    }

    pub fn push_raw(&self, status: u16, body: &str) {
        self.replies
            .lock()
            .unwrap()
            .push_back(Ok(ApiResponse { status, body: body.to_owned() }));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.requests.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("connection refused".to_owned())))
    }
}

/// Client over `transport` with a fresh in-memory session.
pub fn client_with(transport: Arc<MockTransport>) -> (ApiClient, SessionStore, Arc<MemoryStorage>) {
    let storage = Arc::new(MemoryStorage::new());
    let session = SessionStore::load(storage.clone());
    let config = ApiConfig::with_override(Some(TEST_BASE_URL));
    let client = ApiClient::new(&config, session.clone(), transport);
    (client, session, storage)
}
