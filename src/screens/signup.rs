//! Signup screen state and form validation.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use super::FILL_ALL_FIELDS;
use crate::repository::AuthRepository;
use crate::session::{SessionManager, UserRole};

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupState {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub selected_role: UserRole,
    pub is_loading: bool,
    pub is_signup_successful: bool,
    pub error_message: Option<String>,
}

impl SignupState {
    /// First failing form rule, checked in display order.
    #[must_use]
    pub fn validation_error(&self) -> Option<&'static str> {
        let fields = [&self.name, &self.email, &self.password, &self.confirm_password];
        if fields.iter().any(|f| f.trim().is_empty()) {
            return Some(FILL_ALL_FIELDS);
        }
        if !is_valid_email(self.email.trim()) {
            return Some("Please enter a valid email address");
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Some("Password must be at least 6 characters");
        }
        if self.password != self.confirm_password {
            return Some("Passwords do not match");
        }
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupEvent {
    NameChanged(String),
    EmailChanged(String),
    PasswordChanged(String),
    ConfirmPasswordChanged(String),
    RoleChanged(UserRole),
    SignupClicked,
    DismissError,
}

pub struct SignupScreen {
    auth: Arc<AuthRepository>,
    session: Arc<SessionManager>,
    state: watch::Sender<SignupState>,
}

impl SignupScreen {
    pub fn new(auth: Arc<AuthRepository>, session: Arc<SessionManager>) -> Self {
        let initial = SignupState { selected_role: session.current_role(), ..SignupState::default() };
        Self { auth, session, state: watch::channel(initial).0 }
    }

    #[must_use]
    pub fn state(&self) -> SignupState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SignupState> {
        self.state.subscribe()
    }

    pub async fn handle(&self, event: SignupEvent) {
        match event {
            SignupEvent::NameChanged(v) => self.edit(|s| s.name = v),
            SignupEvent::EmailChanged(v) => self.edit(|s| s.email = v),
            SignupEvent::PasswordChanged(v) => self.edit(|s| s.password = v),
            SignupEvent::ConfirmPasswordChanged(v) => self.edit(|s| s.confirm_password = v),
            SignupEvent::RoleChanged(role) => self.edit(|s| s.selected_role = role),
            SignupEvent::SignupClicked => self.signup().await,
            SignupEvent::DismissError => self.state.send_modify(|s| s.error_message = None),
        }
    }

    /// Apply a field edit and clear any shown error.
    fn edit(&self, apply: impl FnOnce(&mut SignupState)) {
        self.state.send_modify(|s| {
            apply(s);
            s.error_message = None;
        });
    }

    async fn signup(&self) {
        let snapshot = self.state();
        if let Some(message) = snapshot.validation_error() {
            self.state.send_modify(|s| s.error_message = Some(message.to_owned()));
            return;
        }

        self.state.send_modify(|s| {
            s.is_loading = true;
            s.error_message = None;
        });

        let result = self
            .auth
            .signup(
                snapshot.name.trim(),
                snapshot.email.trim(),
                &snapshot.password,
                snapshot.selected_role,
            )
            .await;

        let outcome = result.and_then(|auth| {
            self.session.store_token(&auth.token)?;
            match &auth.user {
                Some(user) => self.session.store_user_data(user),
                None => self.session.store_user_role(snapshot.selected_role),
            }
            Ok(())
        });

        match outcome {
            Ok(()) => {
                info!(role = %snapshot.selected_role, "signup complete");
                self.state.send_modify(|s| {
                    s.is_loading = false;
                    s.is_signup_successful = true;
                });
            }
            Err(e) => {
                warn!(code = e.error_code(), "signup failed");
                self.state.send_modify(|s| {
                    s.is_loading = false;
                    s.error_message = Some(e.to_string());
                });
            }
        }
    }
}

/// Loose structural check: one `@`, a non-empty local part, and a dotted
/// domain whose labels are non-empty and alphanumeric or `-`.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') || email.chars().any(char::is_whitespace) {
        return false;
    }
    let local_ok = local
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c));
    let labels: Vec<&str> = domain.split('.').collect();
    let domain_ok = labels.len() >= 2
        && labels
            .iter()
            .all(|l| !l.is_empty() && l.chars().all(|c| c.is_ascii_alphanumeric() || c == '-'));
    local_ok && domain_ok
}

#[cfg(test)]
#[path = "signup_test.rs"]
mod tests;
