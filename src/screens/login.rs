//! Login screen state.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use super::FILL_ALL_FIELDS;
use crate::repository::AuthRepository;
use crate::session::{SessionManager, UserRole};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginState {
    pub username: String,
    pub password: String,
    pub is_loading: bool,
    pub error_message: Option<String>,
    pub is_login_successful: bool,
    pub selected_role: UserRole,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginEvent {
    UsernameChanged(String),
    PasswordChanged(String),
    RoleChanged(UserRole),
    LoginClicked,
    ClearError,
    DismissError,
}

pub struct LoginScreen {
    auth: Arc<AuthRepository>,
    session: Arc<SessionManager>,
    state: watch::Sender<LoginState>,
}

impl LoginScreen {
    pub fn new(auth: Arc<AuthRepository>, session: Arc<SessionManager>) -> Self {
        let initial = LoginState { selected_role: session.current_role(), ..LoginState::default() };
        Self { auth, session, state: watch::channel(initial).0 }
    }

    #[must_use]
    pub fn state(&self) -> LoginState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<LoginState> {
        self.state.subscribe()
    }

    pub async fn handle(&self, event: LoginEvent) {
        match event {
            LoginEvent::UsernameChanged(username) => self.state.send_modify(|s| {
                s.username = username;
                s.error_message = None;
            }),
            LoginEvent::PasswordChanged(password) => self.state.send_modify(|s| {
                s.password = password;
                s.error_message = None;
            }),
            LoginEvent::RoleChanged(role) => self.state.send_modify(|s| {
                s.selected_role = role;
                s.error_message = None;
            }),
            LoginEvent::LoginClicked => self.login().await,
            LoginEvent::ClearError | LoginEvent::DismissError => {
                self.state.send_modify(|s| s.error_message = None);
            }
        }
    }

    async fn login(&self) {
        let snapshot = self.state();
        if snapshot.username.trim().is_empty() || snapshot.password.trim().is_empty() {
            self.state.send_modify(|s| s.error_message = Some(FILL_ALL_FIELDS.to_owned()));
            return;
        }

        self.state.send_modify(|s| {
            s.is_loading = true;
            s.error_message = None;
        });

        let result = self.auth.login(snapshot.username.trim(), &snapshot.password).await;
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
                info!(role = %self.session.current_role(), "login complete");
                self.state.send_modify(|s| {
                    s.is_loading = false;
                    s.is_login_successful = true;
                    s.error_message = None;
                });
            }
            Err(e) => {
                warn!(code = e.error_code(), "login failed");
                self.state.send_modify(|s| {
                    s.is_loading = false;
                    s.error_message = Some(e.to_string());
                });
            }
        }
    }
}

#[cfg(test)]
#[path = "login_test.rs"]
mod tests;
