//! Request pipeline shared by every flow.
//!
//! SYSTEM CONTEXT
//! ==============
//! `ApiClient` owns the resolved base URL and a `SessionStore` handle. Every
//! call goes through `ApiClient::send`, which reads the current token and
//! attaches `Authorization: Bearer <token>` when one exists. The wire is a
//! `Transport`: `gloo-net` fetch in the browser, a recording mock in tests.
//!
//! ERROR HANDLING
//! ==============
//! One request in, one response or `ApiError` out. No retries, no caching.
//! Non-2xx statuses become `ApiError::Status` carrying the server `detail`
//! when the body has one.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::types::ErrorBody;
use crate::config::ApiConfig;
use crate::state::session::SessionStore;

pub const AUTHORIZATION: &str = "Authorization";
pub const CONTENT_TYPE: &str = "Content-Type";
pub const ACCEPT: &str = "Accept";
const JSON_MIME: &str = "application/json";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request failed with status {status}")]
    Status { status: u16, detail: Option<String> },
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("no token returned")]
    MissingToken,
}

impl ApiError {
    /// Server-supplied explanation, if the failure carried one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Message for the user: the server detail when present, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.detail().unwrap_or(fallback).to_owned()
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// 401/403 from the backend.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// Fully resolved outgoing request.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    /// First header value matching `name` case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Raw response: status plus the body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request and returns whatever came back.
///
/// `?Send` because browser fetch futures are not `Send`; implementors
/// themselves must be `Send + Sync` to live in Leptos context.
#[async_trait(?Send)]
pub trait Transport: Send + Sync {
    /// # Errors
    ///
    /// Returns `ApiError::Network` when no response was received.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

/// Browser fetch via `gloo-net`.
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchTransport;

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        #[cfg(feature = "csr")]
        {
            use gloo_net::http::RequestBuilder;

            let method = match request.method {
                Method::Get => gloo_net::http::Method::GET,
                Method::Post => gloo_net::http::Method::POST,
            };
            let mut builder = RequestBuilder::new(&request.url).method(method);
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }
            let req = match &request.body {
                Some(body) => builder.body(body.to_string()),
                None => builder.build(),
            }
            .map_err(|e| ApiError::Network(e.to_string()))?;
            let resp = req.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
            let status = resp.status();
            let body = resp.text().await.map_err(|e| ApiError::Network(e.to_string()))?;
            Ok(ApiResponse { status, body })
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = request;
            Err(ApiError::Network("not available outside the browser".to_owned()))
        }
    }
}

/// Configured client: base URL, session handle, transport.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    session: SessionStore,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient").field("base_url", &self.base_url).finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(config: &ApiConfig, session: SessionStore, transport: Arc<dyn Transport>) -> Self {
        Self { base_url: config.base_url.clone(), session, transport }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Assemble the outgoing request, attaching the bearer credential when the
    /// session holds a token.
    pub fn build_request(&self, method: Method, path: &str, body: Option<serde_json::Value>) -> ApiRequest {
        let mut headers = vec![(ACCEPT.to_owned(), JSON_MIME.to_owned())];
        if body.is_some() {
            headers.push((CONTENT_TYPE.to_owned(), JSON_MIME.to_owned()));
        }
        if let Some(token) = self.session.token() {
            headers.push((AUTHORIZATION.to_owned(), format!("Bearer {token}")));
        }
        ApiRequest { method, url: self.url(path), headers, body }
    }

    /// Send a request and return the raw 2xx response.
    ///
    /// # Errors
    ///
    /// `Network` when the transport fails, `Status` for any non-2xx.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<ApiResponse, ApiError> {
        let request = self.build_request(method, path, body);
        log::debug!(
            "api: {} {} auth={}",
            request.method.as_str(),
            request.url,
            request.header(AUTHORIZATION).is_some()
        );
        let response = self.transport.send(request).await?;
        if !response.is_success() {
            let detail = serde_json::from_str::<ErrorBody>(&response.body)
                .ok()
                .and_then(|b| b.detail_message());
            log::debug!("api: {path} -> {}", response.status);
            return Err(ApiError::Status { status: response.status, detail });
        }
        Ok(response)
    }

    /// POST `payload` as JSON and decode the JSON reply.
    ///
    /// # Errors
    ///
    /// Any `send` error, or `Decode` when the reply is not the expected shape.
    pub async fn post_json<B, T>(&self, path: &str, payload: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(payload).map_err(|e| ApiError::Decode(e.to_string()))?;
        let response = self.send(Method::Post, path, Some(body)).await?;
        decode_body(&response.body)
    }
}

/// Decode a JSON body; an empty body decodes as `null`.
pub(crate) fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let text = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
}
