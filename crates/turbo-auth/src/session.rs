//! Session management.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use turbo_commerce::clock::{Clock, Delay};
use turbo_commerce::Email;

use crate::password::PasswordPolicy;
use crate::token::{SessionToken, TokenClaims};
use crate::user::Role;
use crate::AuthError;

/// Default simulated login latency.
pub const DEFAULT_LOGIN_LATENCY: Duration = Duration::from_millis(250);

/// The signed-in user.
///
/// The role is derived from the email at each login and never edited
/// independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Display name (the email's local part).
    pub name: String,
    /// Email address.
    pub email: String,
    /// Role derived from the email.
    pub role: Role,
    /// Opaque token.
    pub token: SessionToken,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Mock login: validates credential shape and issues a session.
pub struct SessionManager {
    policy: PasswordPolicy,
    clock: Arc<dyn Clock>,
    delay: Arc<dyn Delay>,
    latency: Duration,
}

impl SessionManager {
    /// Create a session manager with the default password policy.
    pub fn new(clock: Arc<dyn Clock>, delay: Arc<dyn Delay>) -> Self {
        Self {
            policy: PasswordPolicy::default(),
            clock,
            delay,
            latency: DEFAULT_LOGIN_LATENCY,
        }
    }

    /// Override the simulated latency.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Attempt a login.
    ///
    /// Fails with [`AuthError::InvalidCredentials`] when the email is
    /// malformed or the password does not meet the policy; callers cannot
    /// tell which.
    #[instrument(skip_all)]
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        self.delay.sleep(self.latency).await;

        let Some(email) = Email::parse(email) else {
            warn!("login rejected");
            return Err(AuthError::InvalidCredentials);
        };
        if !self.policy.is_satisfied_by(password) {
            warn!("login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        let role = Role::for_email(&email);
        let token = SessionToken::issue(&TokenClaims {
            sub: email.as_str().to_string(),
            role,
            iat: self.clock.now_unix(),
        })?;

        info!(role = role.as_str(), "login accepted");
        Ok(Session {
            name: email.local_part().to_string(),
            email: email.as_str().to_string(),
            role,
            token,
        })
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("policy", &self.policy)
            .field("latency", &self.latency)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use turbo_commerce::clock::{FixedClock, NoDelay, TokioDelay};

    fn manager() -> SessionManager {
        SessionManager::new(Arc::new(FixedClock(1_700_000_000)), Arc::new(NoDelay))
    }

    #[tokio::test]
    async fn test_admin_login() {
        let session = manager().login("admin@x.com", "Passw0rd").await.unwrap();
        assert_eq!(session.role, Role::Admin);
        assert_eq!(session.name, "admin");
        assert_eq!(session.email, "admin@x.com");
        assert!(session.is_admin());
    }

    #[tokio::test]
    async fn test_customer_login() {
        let session = manager().login("shopper@x.com", "Passw0rd").await.unwrap();
        assert_eq!(session.role, Role::Customer);
        assert_eq!(session.name, "shopper");
    }

    #[tokio::test]
    async fn test_weak_password_rejected() {
        let err = manager().login("a@b.com", "weak").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
        assert_eq!(err.user_message(), "Invalid email or password.");
    }

    #[tokio::test]
    async fn test_non_ascii_letters_do_not_count() {
        let err = manager().login("a@b.com", "ÄÖÜäöü12").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_malformed_email_rejected() {
        let err = manager().login("not-an-email", "Passw0rd").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_token_is_deterministic_for_fixed_clock() {
        let a = manager().login("shopper@x.com", "Passw0rd").await.unwrap();
        let b = manager().login("shopper@x.com", "Passw0rd").await.unwrap();
        assert_eq!(a.token, b.token);

        let claims = a.token.claims().unwrap();
        assert_eq!(claims.sub, "shopper@x.com");
        assert_eq!(claims.role, Role::Customer);
        assert_eq!(claims.iat, 1_700_000_000);
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_waits_for_latency() {
        let manager =
            SessionManager::new(Arc::new(FixedClock(0)), Arc::new(TokioDelay));
        let start = tokio::time::Instant::now();
        manager.login("shopper@x.com", "Passw0rd").await.unwrap();
        assert!(start.elapsed() >= DEFAULT_LOGIN_LATENCY);
    }

    #[test]
    fn test_session_serialization() {
        let session = Session {
            name: "jane".to_string(),
            email: "jane@example.com".to_string(),
            role: Role::Customer,
            token: SessionToken::issue(&TokenClaims {
                sub: "jane@example.com".to_string(),
                role: Role::Customer,
                iat: 0,
            })
            .unwrap(),
        };
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["role"], "customer");
        assert_eq!(json["token"], session.token.as_str());

        let back: Session = serde_json::from_value(json).unwrap();
        assert_eq!(back, session);
    }
}
