//! JSON payloads exchanged with the calorie backend.
//!
//! DESIGN
//! ======
//! Request types serialize exactly the fields the backend validates. Response
//! types accept every shape the backend is known to send and expose explicit
//! extraction helpers instead of relying on whichever field happens to exist.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Cached profile of the signed-in user. Every field is optional because the
/// backend may return a partial record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl UserProfile {
    /// Best human-readable label: first name, then email.
    pub fn display_name(&self) -> Option<&str> {
        self.first_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .or_else(|| self.email.as_deref().filter(|e| !e.is_empty()))
    }
}

/// `POST /auth/login` body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// `POST /auth/register` body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// `POST /auth/login` success body.
///
/// Accepted shapes:
/// - `{ "token": "...", "user": { ... } }`
/// - `{ "access_token": "...", "token_type": "bearer", "email": "...", "first_name": "..." }`
///
/// Kept as raw JSON: each field is read on its own, so a malformed optional
/// field never hides a valid token.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct LoginResponse(serde_json::Value);

impl LoginResponse {
    pub fn new(body: serde_json::Value) -> Self {
        Self(body)
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(serde_json::Value::as_str)
    }

    /// `token` if it is a non-empty string, else `access_token`.
    pub fn bearer_token(&self) -> Option<&str> {
        self.str_field("token")
            .filter(|t| !t.is_empty())
            .or_else(|| self.str_field("access_token").filter(|t| !t.is_empty()))
    }

    pub fn token_type(&self) -> Option<&str> {
        self.str_field("token_type")
    }

    /// Nested `user` object when it decodes, else a profile assembled from
    /// the top-level string fields.
    pub fn profile(&self) -> Option<UserProfile> {
        let nested = self
            .0
            .get("user")
            .and_then(|user| serde_json::from_value::<UserProfile>(user.clone()).ok());
        if nested.is_some() {
            return nested;
        }
        let first_name = self.str_field("first_name").map(str::to_owned);
        let last_name = self.str_field("last_name").map(str::to_owned);
        let email = self.str_field("email").map(str::to_owned);
        if first_name.is_none() && last_name.is_none() && email.is_none() {
            return None;
        }
        Some(UserProfile { first_name, last_name, email })
    }
}

/// `POST /get-calories` body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CalorieQuery {
    pub dish_name: String,
    pub servings: u32,
}

/// `POST /get-calories` success body, rendered as-is.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalorieResult {
    pub dish_name: String,
    pub servings: f64,
    pub calories_per_serving: f64,
    pub total_calories: f64,
    #[serde(default)]
    pub source: Option<String>,
    /// USDA FoodData Central identifier of the matched food.
    #[serde(default)]
    pub fdc_id: Option<i64>,
    #[serde(default)]
    pub ingredient_breakdown: Option<IngredientBreakdown>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientBreakdown {
    #[serde(default)]
    pub ingredients: Option<String>,
}

/// Error body. `detail` is a string for handled errors and an array for
/// request-validation errors; only the string form is user-facing.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    pub fn detail_message(&self) -> Option<String> {
        match &self.detail {
            Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
            _ => None,
        }
    }
}
