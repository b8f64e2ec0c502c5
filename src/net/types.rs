//! Wire types for the FoodHub HTTP API.
//!
//! The backend has shipped more than one spelling for a few auth fields
//! (`token` / `accessToken`, `role` / `userType`). Both are accepted on the
//! way in; the first spelling is the one written back out.

use serde::{Deserialize, Serialize};

// =============================================================================
// AUTH REQUESTS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// `customer`, `owner` or `rider`.
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OAuthRequest {
    /// `google` or `facebook`.
    pub provider: String,
    /// Access token issued by the provider.
    pub token: String,
    #[serde(rename = "type")]
    pub kind: String,
}

// =============================================================================
// AUTH RESPONSE
// =============================================================================

/// Body of a successful auth call.
///
/// A missing token deserializes as empty so the repository can report it as
/// "No token received" instead of a parse failure. When both spellings are
/// present the first non-blank one wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "AuthResponseWire")]
pub struct AuthResponse {
    pub token: String,
    pub user: Option<UserData>,
}

#[derive(Deserialize)]
struct AuthResponseWire {
    #[serde(default)]
    token: Option<String>,
    #[serde(default, rename = "accessToken")]
    access_token: Option<String>,
    #[serde(default)]
    user: Option<UserData>,
}

impl From<AuthResponseWire> for AuthResponse {
    fn from(wire: AuthResponseWire) -> Self {
        let token = [wire.token, wire.access_token]
            .into_iter()
            .flatten()
            .find(|t| !t.trim().is_empty())
            .unwrap_or_default();
        Self { token, user: wire.user }
    }
}

/// Profile returned alongside a token and persisted as the session snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub id: String,
    pub name: String,
    pub email: String,
    /// External role string (`customer`, `owner`, `rider`).
    #[serde(default = "default_role", alias = "userType")]
    pub role: String,
    #[serde(default)]
    pub restaurant_id: Option<String>,
    #[serde(default)]
    pub profile_image_url: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default, alias = "isEmailVerified")]
    pub email_verified: bool,
}

fn default_role() -> String {
    "customer".to_owned()
}

// =============================================================================
// RESTAURANTS
// =============================================================================

/// Restaurant row as served by `GET /restaurants`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantRecord {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub address: String,
    pub category_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub image_url: String,
    pub created_at: String,
    /// Distance from the query point, in degrees.
    pub distance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantsEnvelope {
    pub data: Vec<RestaurantRecord>,
}

// =============================================================================
// ERRORS
// =============================================================================

/// Error body shape; servers use either `message` or `error`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ServerMessage {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
