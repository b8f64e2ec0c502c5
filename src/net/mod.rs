//! Networking: the HTTP transport seam and the API wire schema.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transport` performs HTTP exchanges, `types` defines request and response
//! bodies. Status-code policy lives in the repositories, not here.

pub mod transport;
pub mod types;

pub use transport::{ApiRequest, HttpTransport, Method, PACKAGE_NAME_HEADER, RawResponse, Transport, TransportError};
pub use types::{AuthResponse, LoginRequest, OAuthRequest, SignupRequest, UserData};
