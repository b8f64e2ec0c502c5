//! Home screen state for all three roles.
//!
//! DESIGN
//! ======
//! One state struct carries the customer, restaurant and rider sections;
//! `load()` fills only the section for the session's role. Order and delivery
//! edits are local to the screen until the API can accept them.
//!
//! `HomeScreen::new` does not fetch anything. Call `load()` (or send
//! `HomeEvent::Refresh`) once the screen is shown.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::model::{DeliveryRequest, FoodCategory, Order, OrderStatus, Restaurant};
use crate::repository::DataRepository;
use crate::session::{SessionManager, UserRole};

pub const DEFAULT_LOCATION_LABEL: &str = "Current Location";

// Rider summary figures shown until the API reports real ones.
pub const RIDER_TODAY_DELIVERIES: u32 = 8;
pub const RIDER_TODAY_EARNINGS: f64 = 67.50;

const CUSTOMER_LOAD_FAILED: &str = "Failed to load restaurant data";
const RESTAURANT_LOAD_FAILED: &str = "Failed to load order data";
const RIDER_LOAD_FAILED: &str = "Failed to load delivery data";

#[derive(Debug, Clone, PartialEq)]
pub struct HomeState {
    pub is_loading: bool,
    pub error_message: Option<String>,
    pub search_query: String,
    pub selected_category: Option<String>,

    // customer
    pub restaurants: Vec<Restaurant>,
    pub categories: Vec<FoodCategory>,
    pub recent_orders: Vec<Order>,
    pub current_location: String,

    // restaurant owner
    pub pending_orders: Vec<Order>,
    pub is_restaurant_open: bool,
    pub today_earnings: f64,
    pub today_orders_count: usize,

    // rider
    pub available_deliveries: Vec<DeliveryRequest>,
    pub is_rider_online: bool,
    pub today_deliveries: u32,
    pub today_earnings_rider: f64,
    pub current_delivery: Option<DeliveryRequest>,
}

impl Default for HomeState {
    fn default() -> Self {
        Self {
            is_loading: false,
            error_message: None,
            search_query: String::new(),
            selected_category: None,
            restaurants: Vec::new(),
            categories: Vec::new(),
            recent_orders: Vec::new(),
            current_location: DEFAULT_LOCATION_LABEL.to_owned(),
            pending_orders: Vec::new(),
            is_restaurant_open: true,
            today_earnings: 0.0,
            today_orders_count: 0,
            available_deliveries: Vec::new(),
            is_rider_online: false,
            today_deliveries: 0,
            today_earnings_rider: 0.0,
            current_delivery: None,
        }
    }
}

impl HomeState {
    /// Restaurants matching the search query (name or description,
    /// case-insensitive) and the selected category (exact).
    #[must_use]
    pub fn filtered_restaurants(&self) -> Vec<Restaurant> {
        let query = self.search_query.trim().to_lowercase();
        self.restaurants
            .iter()
            .filter(|r| {
                query.is_empty()
                    || r.name.to_lowercase().contains(&query)
                    || r.description.to_lowercase().contains(&query)
            })
            .filter(|r| {
                self.selected_category
                    .as_ref()
                    .is_none_or(|category| r.categories.contains(category))
            })
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum HomeEvent {
    Refresh,
    SearchQueryChanged(String),
    CategorySelected(Option<String>),
    ClearError,
    OrderStatusChanged { order_id: String, status: OrderStatus },
    OrderAccepted(String),
    OrderRejected(String),
    RestaurantStatusToggled(bool),
    RiderStatusToggled(bool),
    DeliveryAccepted(String),
    DeliveryCompleted(String),
}

pub struct HomeScreen {
    data: Arc<DataRepository>,
    session: Arc<SessionManager>,
    state: watch::Sender<HomeState>,
}

impl HomeScreen {
    pub fn new(data: Arc<DataRepository>, session: Arc<SessionManager>) -> Self {
        Self { data, session, state: watch::channel(HomeState::default()).0 }
    }

    #[must_use]
    pub fn state(&self) -> HomeState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<HomeState> {
        self.state.subscribe()
    }

    #[must_use]
    pub fn filtered_restaurants(&self) -> Vec<Restaurant> {
        self.state.borrow().filtered_restaurants()
    }

    pub async fn handle(&self, event: HomeEvent) {
        match event {
            HomeEvent::Refresh => self.load().await,
            HomeEvent::SearchQueryChanged(query) => self.state.send_modify(|s| s.search_query = query),
            HomeEvent::CategorySelected(category) => self.state.send_modify(|s| s.selected_category = category),
            HomeEvent::ClearError => self.state.send_modify(|s| s.error_message = None),
            HomeEvent::OrderStatusChanged { order_id, status } => self.update_order_status(&order_id, status),
            HomeEvent::OrderAccepted(order_id) => self.update_order_status(&order_id, OrderStatus::Confirmed),
            HomeEvent::OrderRejected(order_id) => self.update_order_status(&order_id, OrderStatus::Cancelled),
            HomeEvent::RestaurantStatusToggled(open) => self.state.send_modify(|s| s.is_restaurant_open = open),
            HomeEvent::RiderStatusToggled(online) => self.state.send_modify(|s| s.is_rider_online = online),
            HomeEvent::DeliveryAccepted(delivery_id) => self.accept_delivery(&delivery_id),
            HomeEvent::DeliveryCompleted(delivery_id) => self.complete_delivery(&delivery_id),
        }
    }

    /// Load the section for the session's current role.
    pub async fn load(&self) {
        self.state.send_modify(|s| {
            s.is_loading = true;
            s.error_message = None;
        });

        let role = self.session.user_role();
        debug!(%role, "loading home");
        match role {
            UserRole::Customer => self.load_customer().await,
            UserRole::RestaurantOwner => self.load_restaurant().await,
            UserRole::Rider => self.load_rider().await,
        }
    }

    async fn load_customer(&self) {
        let (restaurants, categories, orders) = tokio::join!(
            self.data.get_restaurants(),
            self.data.get_food_categories(),
            self.data.get_user_orders(),
        );
        match (restaurants, categories, orders) {
            (Ok(restaurants), Ok(categories), Ok(orders)) => {
                info!(restaurants = restaurants.len(), "customer home loaded");
                self.state.send_modify(|s| {
                    s.is_loading = false;
                    s.restaurants = restaurants;
                    s.categories = categories;
                    s.recent_orders = orders;
                });
            }
            (restaurants, categories, orders) => {
                let cause = restaurants.err().or(categories.err()).or(orders.err());
                warn!(cause = ?cause.map(|e| e.to_string()), "customer home failed");
                self.fail(CUSTOMER_LOAD_FAILED);
            }
        }
    }

    async fn load_restaurant(&self) {
        match self.data.get_restaurant_orders().await {
            Ok(orders) => {
                let pending: Vec<Order> = orders
                    .iter()
                    .filter(|o| o.status.needs_restaurant_action())
                    .cloned()
                    .collect();
                let earnings: f64 = orders.iter().map(|o| o.total_amount).sum();
                info!(orders = orders.len(), pending = pending.len(), "restaurant home loaded");
                self.state.send_modify(|s| {
                    s.is_loading = false;
                    s.pending_orders = pending;
                    s.today_orders_count = orders.len();
                    s.today_earnings = earnings;
                });
            }
            Err(e) => {
                warn!(error = %e, "restaurant home failed");
                self.fail(RESTAURANT_LOAD_FAILED);
            }
        }
    }

    async fn load_rider(&self) {
        match self.data.get_delivery_requests().await {
            Ok(deliveries) => {
                info!(deliveries = deliveries.len(), "rider home loaded");
                self.state.send_modify(|s| {
                    s.is_loading = false;
                    s.available_deliveries = deliveries;
                    s.today_deliveries = RIDER_TODAY_DELIVERIES;
                    s.today_earnings_rider = RIDER_TODAY_EARNINGS;
                });
            }
            Err(e) => {
                warn!(error = %e, "rider home failed");
                self.fail(RIDER_LOAD_FAILED);
            }
        }
    }

    fn fail(&self, message: &str) {
        self.state.send_modify(|s| {
            s.is_loading = false;
            s.error_message = Some(message.to_owned());
        });
    }

    /// Cancelled orders leave the pending list.
    fn update_order_status(&self, order_id: &str, status: OrderStatus) {
        self.state.send_modify(|s| {
            for order in s.pending_orders.iter_mut().filter(|o| o.id == order_id) {
                order.status = status;
            }
            s.pending_orders.retain(|o| o.status != OrderStatus::Cancelled);
        });
    }

    fn accept_delivery(&self, delivery_id: &str) {
        self.state.send_if_modified(|s| {
            let Some(index) = s.available_deliveries.iter().position(|d| d.id == delivery_id) else {
                return false;
            };
            s.current_delivery = Some(s.available_deliveries.remove(index));
            true
        });
    }

    /// Only the delivery in progress can be completed.
    fn complete_delivery(&self, delivery_id: &str) {
        self.state.send_if_modified(|s| {
            let Some(current) = s.current_delivery.take_if(|d| d.id == delivery_id) else {
                return false;
            };
            s.today_deliveries += 1;
            s.today_earnings_rider += current.estimated_earnings;
            true
        });
    }
}

#[cfg(test)]
#[path = "home_test.rs"]
mod tests;
