//! Composition root.
//!
//! SYSTEM CONTEXT
//! ==============
//! `AppContext` owns one of each shared service (session, transport,
//! repositories) and hands out screens wired to them. Nothing here is global;
//! a process that wants two sessions builds two contexts.

use std::sync::Arc;

use crate::config::{ClientConfig, ConfigError};
use crate::net::{HttpTransport, Transport, TransportError};
use crate::repository::{AuthRepository, DataRepository, FixtureLatency};
use crate::screens::{HomeScreen, LoginScreen, SignupScreen};
use crate::session::SessionManager;
use crate::store::{FileStore, KeyValueStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("session store unavailable: {0}")]
    Store(#[from] StoreError),
    #[error("transport setup failed: {0}")]
    Transport(#[from] TransportError),
}

#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<ClientConfig>,
    pub session: Arc<SessionManager>,
    pub auth: Arc<AuthRepository>,
    pub data: Arc<DataRepository>,
}

impl AppContext {
    /// Open the file-backed session store and the HTTP transport for `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created or read, or
    /// the HTTP client cannot be built.
    pub fn from_config(config: ClientConfig) -> Result<Self, StartupError> {
        let store = FileStore::open(&config.data_dir, &config.session_namespace)?;
        tracing::info!(path = %store.path().display(), "session store opened");
        let transport = HttpTransport::new(&config)?;
        tracing::info!(base_url = transport.base_url(), app_id = %config.app_id, "api client ready");
        Ok(Self::with_parts(config, Arc::new(store), Arc::new(transport)))
    }

    /// Wire a context from already-built parts.
    #[must_use]
    pub fn with_parts(config: ClientConfig, store: Arc<dyn KeyValueStore>, transport: Arc<dyn Transport>) -> Self {
        let session = Arc::new(SessionManager::new(store, config.app_id.clone()));
        let auth = Arc::new(AuthRepository::new(transport.clone()));
        let latency = if config.simulated_latency {
            FixtureLatency::simulated()
        } else {
            FixtureLatency::none()
        };
        let data = DataRepository::new(transport, session.clone())
            .with_location(config.default_location)
            .with_latency(latency);
        Self { config: Arc::new(config), session, auth, data: Arc::new(data) }
    }

    #[must_use]
    pub fn login_screen(&self) -> LoginScreen {
        LoginScreen::new(self.auth.clone(), self.session.clone())
    }

    #[must_use]
    pub fn signup_screen(&self) -> SignupScreen {
        SignupScreen::new(self.auth.clone(), self.session.clone())
    }

    #[must_use]
    pub fn home_screen(&self) -> HomeScreen {
        HomeScreen::new(self.data.clone(), self.session.clone())
    }
}

#[cfg(test)]
#[path = "app_test.rs"]
mod tests;
