//! # Session State
//!
//! Holds the signed-in user, if any.
//!
//! ```text
//! login(token) ──► TokenDecoder ──► Some(AuthenticatedUser)
//!                                        │
//!     current() / require_user() ◄───────┤  expired? cleared, None
//!     require_admin()            ◄───────┘  not admin? Forbidden
//!
//! logout() ──► None
//! ```
//!
//! Reads vastly outnumber sign-ins, so the user sits behind an `RwLock`.

use std::sync::{Arc, PoisonError, RwLock};

use chrono::Utc;
use legacyframe_core::Identity;
use tracing::{debug, info};

use crate::auth::{AuthError, AuthenticatedUser, TokenDecoder};

/// Thread-safe handle to the current session.
#[derive(Debug, Clone)]
pub struct SessionState {
    decoder: TokenDecoder,
    user: Arc<RwLock<Option<AuthenticatedUser>>>,
}

impl SessionState {
    /// Creates a signed-out session that decodes tokens with `decoder`.
    pub fn new(decoder: TokenDecoder) -> Self {
        SessionState {
            decoder,
            user: Arc::new(RwLock::new(None)),
        }
    }

    /// Signs in with a bearer token, replacing any previous user.
    ///
    /// Accepts either the raw token or a full `Bearer <token>` header value.
    /// A rejected token leaves the current session unchanged.
    pub fn login(&self, token: &str) -> Result<Identity, AuthError> {
        let token = crate::auth::extract_bearer_token(token).unwrap_or(token);
        let user = self.decoder.decode(token)?;
        let identity = user.identity.clone();

        *self.user.write().unwrap_or_else(PoisonError::into_inner) = Some(user);

        info!(email = %identity.email, is_admin = identity.is_admin, "Signed in");
        Ok(identity)
    }

    /// Signs out. Returns whether anyone was signed in.
    pub fn logout(&self) -> bool {
        let previous = self
            .user
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if let Some(user) = &previous {
            info!(email = %user.identity.email, "Signed out");
        }
        previous.is_some()
    }

    /// The signed-in identity, or `None`.
    ///
    /// A session whose token has expired is cleared here.
    pub fn current(&self) -> Option<Identity> {
        let expired = {
            let guard = self.user.read().unwrap_or_else(PoisonError::into_inner);
            match guard.as_ref() {
                None => return None,
                Some(user) if !user.is_expired_at(Utc::now()) => {
                    return Some(user.identity.clone());
                }
                Some(user) => user.identity.email.clone(),
            }
        };

        debug!(email = %expired, "Session expired");
        self.logout();
        None
    }

    /// The signed-in identity, or [`AuthError::Unauthenticated`].
    pub fn require_user(&self) -> Result<Identity, AuthError> {
        self.current().ok_or(AuthError::Unauthenticated)
    }

    /// The signed-in admin, or an error saying why not.
    pub fn require_admin(&self) -> Result<Identity, AuthError> {
        let identity = self.require_user()?;
        if identity.is_admin {
            Ok(identity)
        } else {
            Err(AuthError::Forbidden)
        }
    }

    /// Stores an already decoded user.
    #[cfg(test)]
    pub(crate) fn set_user(&self, user: AuthenticatedUser) {
        *self.user.write().unwrap_or_else(PoisonError::into_inner) = Some(user);
    }
}
