//! User role classification.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which side of the marketplace the acting user is on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserRole {
    #[default]
    Customer,
    RestaurantOwner,
    Rider,
}

impl UserRole {
    pub const ALL: [Self; 3] = [Self::Customer, Self::RestaurantOwner, Self::Rider];

    /// Name persisted in the session store.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "CUSTOMER",
            Self::RestaurantOwner => "RESTAURANT",
            Self::Rider => "RIDER",
        }
    }

    /// Parse a name written by [`UserRole::as_str`].
    #[must_use]
    pub fn from_stored(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.as_str() == raw)
    }

    /// Role string the API expects in signup and OAuth bodies.
    #[must_use]
    pub const fn api_role(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::RestaurantOwner => "owner",
            Self::Rider => "rider",
        }
    }

    /// Classify an external role string; anything unrecognized is a customer.
    #[must_use]
    pub fn from_api_role(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "owner" => Self::RestaurantOwner,
            "rider" => Self::Rider,
            _ => Self::Customer,
        }
    }

    /// Default role for a distribution channel, e.g.
    /// `com.example.fooddeliveryapp.rider`.
    #[must_use]
    pub fn from_app_id(app_id: &str) -> Self {
        if app_id.ends_with(".restaurant") {
            Self::RestaurantOwner
        } else if app_id.ends_with(".rider") {
            Self::Rider
        } else {
            Self::Customer
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Customer => "Customer",
            Self::RestaurantOwner => "Restaurant Owner",
            Self::Rider => "Delivery Rider",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Accepts API names (`customer`, `owner`, `rider`), `restaurant`, and the
/// stored names, case-insensitively.
impl FromStr for UserRole {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "customer" => Ok(Self::Customer),
            "owner" | "restaurant" | "restaurant_owner" => Ok(Self::RestaurantOwner),
            "rider" => Ok(Self::Rider),
            other => Err(format!("unknown role '{other}' (expected customer, owner or rider)")),
        }
    }
}

#[cfg(test)]
#[path = "role_test.rs"]
mod tests;
