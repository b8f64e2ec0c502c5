//! FoodHub client core: session, API repositories and screen state for the
//! customer, restaurant and rider apps.

pub mod app;
pub mod config;
pub mod error;
pub mod model;
pub mod net;
pub mod repository;
pub mod screens;
pub mod session;
pub mod store;

pub use app::{AppContext, StartupError};
pub use config::ClientConfig;
pub use error::ClientError;
