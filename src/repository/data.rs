//! Data repository: restaurant search over HTTP plus fixture-backed listings.
//!
//! Restaurants are the only listing the API serves today. Categories,
//! restaurant orders, delivery requests and user orders come from
//! [`super::fixtures`] after a fixed delay that stands in for a round trip.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::fixtures;
use crate::error::ClientError;
use crate::model::{Coordinates, DeliveryRequest, FoodCategory, Order, Restaurant};
use crate::net::types::RestaurantsEnvelope;
use crate::net::{ApiRequest, RawResponse, Transport};
use crate::session::SessionManager;

const RESTAURANTS_PATH: &str = "restaurants";

// =============================================================================
// FIXTURE LATENCY
// =============================================================================

/// Artificial delay per fixture listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixtureLatency {
    pub categories: Duration,
    pub restaurant_orders: Duration,
    pub delivery_requests: Duration,
    pub user_orders: Duration,
}

impl FixtureLatency {
    #[must_use]
    pub const fn simulated() -> Self {
        Self {
            categories: Duration::from_millis(500),
            restaurant_orders: Duration::from_millis(800),
            delivery_requests: Duration::from_millis(600),
            user_orders: Duration::from_millis(700),
        }
    }

    #[must_use]
    pub const fn none() -> Self {
        Self {
            categories: Duration::ZERO,
            restaurant_orders: Duration::ZERO,
            delivery_requests: Duration::ZERO,
            user_orders: Duration::ZERO,
        }
    }
}

impl Default for FixtureLatency {
    fn default() -> Self {
        Self::simulated()
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

// =============================================================================
// REPOSITORY
// =============================================================================

pub struct DataRepository {
    transport: Arc<dyn Transport>,
    session: Arc<SessionManager>,
    location: Coordinates,
    latency: FixtureLatency,
}

impl DataRepository {
    pub fn new(transport: Arc<dyn Transport>, session: Arc<SessionManager>) -> Self {
        Self { transport, session, location: Coordinates::NEW_YORK, latency: FixtureLatency::default() }
    }

    /// Default search origin for [`DataRepository::get_restaurants`].
    #[must_use]
    pub fn with_location(mut self, location: Coordinates) -> Self {
        self.location = location;
        self
    }

    #[must_use]
    pub fn with_latency(mut self, latency: FixtureLatency) -> Self {
        self.latency = latency;
        self
    }

    #[must_use]
    pub fn location(&self) -> Coordinates {
        self.location
    }

    /// Restaurants near the configured default location.
    ///
    /// # Errors
    ///
    /// See [`DataRepository::get_restaurants_near`].
    pub async fn get_restaurants(&self) -> Result<Vec<Restaurant>, ClientError> {
        self.get_restaurants_near(self.location.latitude, self.location.longitude)
            .await
    }

    /// `GET /restaurants?lat=..&lon=..` with the stored bearer token.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Auth`] if no token is stored (no request is made)
    /// - a status-derived kind for non-2xx responses
    /// - [`ClientError::EmptyResponse`] for an empty or unreadable body
    /// - [`ClientError::Network`] if the request fails
    pub async fn get_restaurants_near(&self, latitude: f64, longitude: f64) -> Result<Vec<Restaurant>, ClientError> {
        let Some(token) = self.session.token().filter(|t| !t.trim().is_empty()) else {
            warn!("restaurant search without a stored token");
            return Err(ClientError::Auth("No authentication token found".to_owned()));
        };

        let request = ApiRequest::get(RESTAURANTS_PATH)
            .with_query("lat", latitude)
            .with_query("lon", longitude)
            .with_bearer(token);

        let response = self.transport.send(request).await.map_err(|e| {
            warn!(error = %e, "restaurant search failed");
            ClientError::Network(format!("Network error: {e}"))
        })?;

        let restaurants = interpret_restaurants_response(&response)?;
        info!(count = restaurants.len(), latitude, longitude, "restaurants loaded");
        Ok(restaurants)
    }

    /// # Errors
    ///
    /// Never fails today; the `Result` mirrors the network-backed calls.
    pub async fn get_food_categories(&self) -> Result<Vec<FoodCategory>, ClientError> {
        pause(self.latency.categories).await;
        debug!("food categories served from fixtures");
        Ok(fixtures::food_categories())
    }

    /// # Errors
    ///
    /// Never fails today; the `Result` mirrors the network-backed calls.
    pub async fn get_restaurant_orders(&self) -> Result<Vec<Order>, ClientError> {
        pause(self.latency.restaurant_orders).await;
        debug!("restaurant orders served from fixtures");
        Ok(fixtures::restaurant_orders())
    }

    /// # Errors
    ///
    /// Never fails today; the `Result` mirrors the network-backed calls.
    pub async fn get_delivery_requests(&self) -> Result<Vec<DeliveryRequest>, ClientError> {
        pause(self.latency.delivery_requests).await;
        debug!("delivery requests served from fixtures");
        Ok(fixtures::delivery_requests())
    }

    /// # Errors
    ///
    /// Never fails today; the `Result` mirrors the network-backed calls.
    pub async fn get_user_orders(&self) -> Result<Vec<Order>, ClientError> {
        pause(self.latency.user_orders).await;
        debug!("user orders served from fixtures");
        Ok(fixtures::user_orders())
    }
}

pub(crate) fn interpret_restaurants_response(response: &RawResponse) -> Result<Vec<Restaurant>, ClientError> {
    if !response.is_success() {
        let detail = response
            .reason
            .clone()
            .unwrap_or_else(|| response.server_message());
        warn!(status = response.status, "restaurant search rejected");
        return Err(ClientError::from_status(
            response.status,
            format!("Failed to fetch restaurants: {} {detail}", response.status),
        ));
    }

    if response.body.trim().is_empty() {
        return Err(ClientError::EmptyResponse("Empty response from server".to_owned()));
    }

    let envelope: RestaurantsEnvelope = serde_json::from_str(&response.body).map_err(|e| {
        warn!(error = %e, "restaurant payload unreadable");
        ClientError::EmptyResponse("Empty response from server".to_owned())
    })?;

    Ok(envelope.data.into_iter().map(Restaurant::from).collect())
}

#[cfg(test)]
#[path = "data_test.rs"]
mod tests;
