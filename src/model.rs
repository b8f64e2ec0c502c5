//! Display models consumed by the screens.

use serde::{Deserialize, Serialize};

use crate::net::types::RestaurantRecord;

/// Kilometres per degree of latitude, close enough for a distance label.
pub const KM_PER_DEGREE: f64 = 111.0;

// Shown until reviews, ETA and pricing come from the API.
pub const PLACEHOLDER_RATING: f32 = 4.5;
pub const PLACEHOLDER_DELIVERY_TIME: &str = "20-30 min";
pub const PLACEHOLDER_DELIVERY_FEE: f64 = 2.99;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const NEW_YORK: Self = Self { latitude: 40.712_776, longitude: -74.005_978 };
}

// =============================================================================
// RESTAURANTS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub rating: f32,
    pub delivery_time: String,
    pub delivery_fee: f64,
    pub categories: Vec<String>,
    pub is_open: bool,
    /// Human-readable distance, e.g. `"2.2 km"`.
    pub distance: String,
}

impl From<RestaurantRecord> for Restaurant {
    fn from(record: RestaurantRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            description: record.address,
            image_url: record.image_url,
            rating: PLACEHOLDER_RATING,
            delivery_time: PLACEHOLDER_DELIVERY_TIME.to_owned(),
            delivery_fee: PLACEHOLDER_DELIVERY_FEE,
            categories: vec![record.category_id],
            is_open: true,
            distance: format_distance_km(record.distance),
        }
    }
}

/// Render a distance in degrees as kilometres with one decimal.
#[must_use]
pub fn format_distance_km(degrees: f64) -> String {
    format!("{:.1} km", degrees * KM_PER_DEGREE)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodCategory {
    pub id: String,
    pub name: String,
    pub icon: String,
    /// Hex accent colour.
    pub color: String,
}

// =============================================================================
// ORDERS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image_url: String,
    pub category: String,
    pub is_vegetarian: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub menu_item: MenuItem,
    pub quantity: u32,
    pub special_instructions: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    ReadyForPickup,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Statuses a restaurant still has to act on.
    #[must_use]
    pub fn needs_restaurant_action(self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed | Self::Preparing)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub restaurant_name: String,
    pub items: Vec<OrderItem>,
    pub status: OrderStatus,
    pub total_amount: f64,
    pub created_at: String,
    pub estimated_delivery: Option<String>,
    pub delivery_address: Option<String>,
}

// =============================================================================
// DELIVERIES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryRequest {
    pub id: String,
    pub order_number: String,
    pub restaurant_name: String,
    pub customer_name: String,
    pub pickup_address: String,
    pub delivery_address: String,
    pub distance: String,
    pub estimated_earnings: f64,
    pub items: Vec<OrderItem>,
    pub special_instructions: Option<String>,
}

#[cfg(test)]
#[path = "model_test.rs"]
mod tests;
