//! Typed calls for each backend endpoint.
//!
//! These functions only talk to the backend; writing the session and
//! choosing where to navigate belongs to the page flows.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::http::{ApiClient, ApiError, Method, decode_body};
use super::types::{CalorieQuery, CalorieResult, Credentials, LoginResponse, Registration, UserProfile};

pub const LOGIN_PATH: &str = "/auth/login";
pub const REGISTER_PATH: &str = "/auth/register";
pub const CALORIES_PATH: &str = "/get-calories";

/// Token and profile extracted from a successful login.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginGrant {
    pub token: String,
    pub user: Option<UserProfile>,
}

/// Exchange credentials for a bearer token via `POST /auth/login`.
///
/// A 2xx reply without a string `token`/`access_token` is a failure; an
/// unparseable 2xx body counts as having no token. Optional fields never
/// block the token.
///
/// # Errors
///
/// Transport and status errors from the client, or `ApiError::MissingToken`.
pub async fn login(client: &ApiClient, credentials: &Credentials) -> Result<LoginGrant, ApiError> {
    let body = serde_json::to_value(credentials).map_err(|e| ApiError::Decode(e.to_string()))?;
    let response = client.send(Method::Post, LOGIN_PATH, Some(body)).await?;
    let reply = decode_body::<serde_json::Value>(&response.body)
        .map(LoginResponse::new)
        .unwrap_or_default();
    let token = reply.bearer_token().ok_or(ApiError::MissingToken)?.to_owned();
    Ok(LoginGrant { token, user: reply.profile() })
}

/// Create an account via `POST /auth/register`. The reply body is ignored.
///
/// # Errors
///
/// Transport and status errors from the client.
pub async fn register(client: &ApiClient, registration: &Registration) -> Result<(), ApiError> {
    let body = serde_json::to_value(registration).map_err(|e| ApiError::Decode(e.to_string()))?;
    client.send(Method::Post, REGISTER_PATH, Some(body)).await?;
    Ok(())
}

/// Look up calories for a dish via `POST /get-calories`.
///
/// # Errors
///
/// Transport and status errors from the client, or `Decode` when the reply
/// lacks the result fields.
pub async fn get_calories(client: &ApiClient, query: &CalorieQuery) -> Result<CalorieResult, ApiError> {
    client.post_json(CALORIES_PATH, query).await
}
