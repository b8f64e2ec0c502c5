//! Screen state holders.
//!
//! ARCHITECTURE
//! ============
//! Each screen owns a `watch` channel holding its whole state. A UI reads the
//! current value or subscribes for changes, and feeds user input back through
//! `handle(event)`. Every write replaces the full state, so when two actions
//! race the later write wins.
//!
//! Screens hold no locks across `.await`: they snapshot what they need, await
//! the repository, then apply the result with `send_modify`.

pub mod home;
pub mod login;
pub mod signup;

pub use home::{HomeEvent, HomeScreen, HomeState};
pub use login::{LoginEvent, LoginScreen, LoginState};
pub use signup::{SignupEvent, SignupScreen, SignupState};

pub(crate) const FILL_ALL_FIELDS: &str = "Please fill in all fields";
