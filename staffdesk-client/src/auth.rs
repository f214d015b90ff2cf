//! Session token handling and the login exchange
//!
//! Token acquisition and renewal belong to whoever implements
//! [`TokenProvider`]; the network client only asks for the current value.

use std::fmt;
use std::sync::{Arc, RwLock};

use crate::error::{ClientError, FailureKind, Operation};
use crate::http::NetworkHttpClient;

/// Source of the bearer token attached to every API request
pub trait TokenProvider: Send + Sync + fmt::Debug {
    /// Current token, or `None` to send the request unauthenticated
    fn token(&self) -> Option<String>;
}

/// Fixed token, e.g. from configuration
#[derive(Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StaticToken(***)")
    }
}

impl TokenProvider for StaticToken {
    fn token(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Token slot shared between the login flow and the network client
#[derive(Clone, Default)]
pub struct SessionToken {
    inner: Arc<RwLock<Option<String>>>,
}

impl SessionToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, token: Option<String>) {
        if let Ok(mut slot) = self.inner.write() {
            *slot = token;
        }
    }

    pub fn clear(&self) {
        self.set(None);
    }

    pub fn is_set(&self) -> bool {
        self.token().is_some()
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionToken")
            .field("is_set", &self.is_set())
            .finish()
    }
}

impl TokenProvider for SessionToken {
    fn token(&self) -> Option<String> {
        self.inner.read().ok().and_then(|slot| slot.clone())
    }
}

/// Progress of the login exchange
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoginState {
    #[default]
    Idle,
    Pending,
    Succeeded { message: String },
    Failed { message: String },
}

/// Login screen state: one request, no retry
#[derive(Debug, Default)]
pub struct AuthSession {
    token: SessionToken,
    state: LoginState,
}

impl AuthSession {
    pub fn new(token: SessionToken) -> Self {
        Self {
            token,
            state: LoginState::Idle,
        }
    }

    pub fn state(&self) -> &LoginState {
        &self.state
    }

    pub fn is_pending(&self) -> bool {
        self.state == LoginState::Pending
    }

    /// Slot to hand to [`NetworkHttpClient::with_token_provider`]
    pub fn token(&self) -> &SessionToken {
        &self.token
    }

    /// Exchange credentials for a token and store it in the session slot
    pub async fn login(
        &mut self,
        client: &NetworkHttpClient,
        username: &str,
        password: &str,
    ) -> &LoginState {
        self.state = LoginState::Pending;

        self.state = match client.login(username, password).await {
            Ok(resp) => {
                if resp.token.is_some() {
                    self.token.set(resp.token);
                }
                tracing::info!(username = %username, "Login succeeded");
                LoginState::Succeeded {
                    message: resp.message.unwrap_or_else(|| "Login successful!".into()),
                }
            }
            Err(e) => {
                tracing::warn!(username = %username, error = %e, "Login failed");
                LoginState::Failed {
                    message: login_failure_message(&e),
                }
            }
        };
        &self.state
    }

    /// Forget the token and return to the idle state
    pub fn logout(&mut self) {
        self.token.clear();
        self.state = LoginState::Idle;
    }
}

fn login_failure_message(err: &ClientError) -> String {
    match err.kind() {
        FailureKind::Rejected => err.to_string(),
        FailureKind::Unreachable => "No response from server".into(),
        FailureKind::Malformed => err.user_message(Operation::Login),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_token_is_shared_between_clones() {
        let slot = SessionToken::new();
        let reader = slot.clone();
        assert_eq!(reader.token(), None);

        slot.set(Some("sample-token".into()));
        assert_eq!(reader.token().as_deref(), Some("sample-token"));

        slot.clear();
        assert!(!reader.is_set());
    }

    #[test]
    fn test_debug_hides_token() {
        let token = StaticToken::new("secret");
        assert!(!format!("{token:?}").contains("secret"));
    }

    #[test]
    fn test_login_failure_wording() {
        let rejected = ClientError::Rejected {
            operation: Operation::Login,
            status: 401,
            message: "Invalid credentials".into(),
        };
        assert_eq!(login_failure_message(&rejected), "Invalid credentials");

        let empty = ClientError::EmptyResponse {
            operation: Operation::Login,
        };
        assert_eq!(login_failure_message(&empty), "No response from server");
    }
}
