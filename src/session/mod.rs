//! Local session: auth token, user snapshot and role.
//!
//! SYSTEM CONTEXT
//! ==============
//! One `SessionManager` is built by the composition root and shared by `Arc`
//! with the repositories and screens. It is the only writer of the session
//! keys in its store namespace.
//!
//! DESIGN
//! ======
//! Two observables (`logged_in`, `role`) are seeded once from the store at
//! construction and afterwards change only through the mutators here, so
//! `is_logged_in()` never re-reads the store. They are `watch` channels:
//! current value plus change notification for subscribers.
//!
//! Store failures on write are logged and swallowed; the observables still
//! update, matching an asynchronous preferences commit. `clear_session` is
//! fire-and-forget for the same reason.

pub mod role;

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

pub use role::UserRole;

use crate::error::ClientError;
use crate::net::types::UserData;
use crate::store::{Edit, KeyValueStore};

pub const KEY_AUTH_TOKEN: &str = "auth_token";
pub const KEY_USER_DATA: &str = "user_data";
pub const KEY_USER_TYPE: &str = "user_type";
pub const KEY_IS_LOGGED: &str = "key_is_logged";
pub const KEY_LOGIN_TIMESTAMP: &str = "key_login_timestamp";
pub const KEY_RESTAURANT_ID: &str = "restaurant_id";

pub struct SessionManager {
    store: Arc<dyn KeyValueStore>,
    app_id: String,
    logged_in: watch::Sender<bool>,
    role: watch::Sender<UserRole>,
}

impl SessionManager {
    /// Build a session over `store`, seeding the observables from it.
    ///
    /// `app_id` is the distribution channel identifier that picks the role
    /// used when none has been stored.
    pub fn new(store: Arc<dyn KeyValueStore>, app_id: impl Into<String>) -> Self {
        let app_id = app_id.into();
        let logged_in = has_valid_session(store.as_ref());
        let role = resolve_role(store.as_ref(), &app_id);
        info!(logged_in, role = role.as_str(), "session restored");
        Self { store, app_id, logged_in: watch::channel(logged_in).0, role: watch::channel(role).0 }
    }

    // =========================================================================
    // MUTATORS
    // =========================================================================

    /// Persist `token` and mark the session logged in.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] for an empty or blank token; nothing
    /// is written in that case.
    pub fn store_token(&self, token: &str) -> Result<(), ClientError> {
        if token.trim().is_empty() {
            return Err(ClientError::Validation("Token cannot be null or empty".to_owned()));
        }
        let edit = Edit::new()
            .put_string(KEY_AUTH_TOKEN, token)
            .put_bool(KEY_IS_LOGGED, true)
            .put_long(KEY_LOGIN_TIMESTAMP, now_millis());
        if let Err(e) = self.store.apply(edit) {
            warn!(error = %e, "failed to persist auth token");
        }
        self.logged_in.send_replace(true);
        info!("auth token stored");
        Ok(())
    }

    /// Persist a user snapshot and the role derived from it.
    pub fn store_user_data(&self, user: &UserData) {
        let role = UserRole::from_api_role(&user.role);
        let blob = match serde_json::to_string(user) {
            Ok(blob) => blob,
            Err(e) => {
                warn!(error = %e, "failed to serialize user data");
                return;
            }
        };
        let mut edit = Edit::new()
            .put_string(KEY_USER_DATA, blob)
            .put_string(KEY_USER_TYPE, role.as_str());
        edit = match user.restaurant_id.as_deref().filter(|id| !id.is_empty()) {
            Some(restaurant_id) => edit.put_string(KEY_RESTAURANT_ID, restaurant_id),
            None => edit.remove(KEY_RESTAURANT_ID),
        };
        if let Err(e) = self.store.apply(edit) {
            warn!(error = %e, "failed to persist user data");
        }
        self.role.send_replace(role);
        info!(user_id = %user.id, role = role.as_str(), "user data stored");
    }

    /// Persist an explicitly selected role.
    ///
    /// Also drops any stored profile and restaurant id.
    pub fn store_user_role(&self, role: UserRole) {
        let edit = Edit::new()
            .put_string(KEY_USER_TYPE, role.as_str())
            .remove(KEY_USER_DATA)
            .remove(KEY_RESTAURANT_ID);
        if let Err(e) = self.store.apply(edit) {
            warn!(error = %e, "failed to persist user role");
        }
        self.role.send_replace(role);
    }

    /// Persist the owner's restaurant id; a blank id is ignored.
    pub fn store_restaurant_id(&self, restaurant_id: &str) {
        if restaurant_id.trim().is_empty() {
            warn!("ignoring blank restaurant id");
            return;
        }
        if let Err(e) = self.store.apply(Edit::new().put_string(KEY_RESTAURANT_ID, restaurant_id)) {
            warn!(error = %e, "failed to persist restaurant id");
        }
    }

    /// Erase every persisted key and reset the observables to logged out.
    pub fn clear_session(&self) {
        if let Err(e) = self.store.apply(Edit::new().clear()) {
            warn!(error = %e, "failed to clear session store");
        }
        self.logged_in.send_replace(false);
        self.role.send_replace(self.default_role());
        info!("session cleared");
    }

    // =========================================================================
    // STORE READS
    // =========================================================================

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.store.get_string(KEY_AUTH_TOKEN)
    }

    /// The stored user snapshot; a corrupt blob reads as absent.
    #[must_use]
    pub fn user_data(&self) -> Option<UserData> {
        let blob = self.store.get_string(KEY_USER_DATA)?;
        match serde_json::from_str(&blob) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!(error = %e, "stored user data is unreadable");
                None
            }
        }
    }

    /// Role from the store, falling back to the channel default when unset
    /// and to `Customer` when the stored name is unrecognized.
    #[must_use]
    pub fn user_role(&self) -> UserRole {
        resolve_role(self.store.as_ref(), &self.app_id)
    }

    #[must_use]
    pub fn restaurant_id(&self) -> Option<String> {
        self.store.get_string(KEY_RESTAURANT_ID)
    }

    /// Milliseconds since the Unix epoch at the last successful `store_token`.
    #[must_use]
    pub fn login_timestamp(&self) -> Option<i64> {
        self.store.get_long(KEY_LOGIN_TIMESTAMP)
    }

    // =========================================================================
    // OBSERVABLES
    // =========================================================================

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        *self.logged_in.borrow()
    }

    #[must_use]
    pub fn subscribe_logged_in(&self) -> watch::Receiver<bool> {
        self.logged_in.subscribe()
    }

    #[must_use]
    pub fn current_role(&self) -> UserRole {
        *self.role.borrow()
    }

    #[must_use]
    pub fn subscribe_role(&self) -> watch::Receiver<UserRole> {
        self.role.subscribe()
    }

    #[must_use]
    pub fn default_role(&self) -> UserRole {
        UserRole::from_app_id(&self.app_id)
    }
}

fn has_valid_session(store: &dyn KeyValueStore) -> bool {
    let has_token = store.get_string(KEY_AUTH_TOKEN).is_some_and(|t| !t.is_empty());
    has_token && store.get_bool(KEY_IS_LOGGED).unwrap_or(false)
}

fn resolve_role(store: &dyn KeyValueStore, app_id: &str) -> UserRole {
    match store.get_string(KEY_USER_TYPE) {
        Some(stored) => UserRole::from_stored(&stored).unwrap_or_else(|| {
            warn!(stored = %stored, "unrecognized stored role, using customer");
            UserRole::Customer
        }),
        None => UserRole::from_app_id(app_id),
    }
}

fn now_millis() -> i64 {
    let nanos = time::OffsetDateTime::now_utc().unix_timestamp_nanos();
    i64::try_from(nanos / 1_000_000).unwrap_or(i64::MAX)
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
