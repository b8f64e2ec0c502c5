//! Repositories: the boundary between screens and the outside world.
//!
//! Every operation returns `Result<_, ClientError>` whose error text is ready
//! to show to a user.

pub mod auth;
pub mod data;
pub mod fixtures;

pub use auth::AuthRepository;
pub use data::{DataRepository, FixtureLatency};
