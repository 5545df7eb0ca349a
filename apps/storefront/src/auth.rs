//! Token decoding.
//!
//! Turns the auth service's JWT into an [`Identity`]. The storefront never
//! issues tokens; it only reads them.
//!
//! ## Claim Forms
//! The auth service has shipped three ways of marking an admin, all accepted:
//! ```json
//! { "email": "ana@example.com", "isAdmin": true }
//! { "email": "ana@example.com", "role": "admin" }
//! { "email": "ana@example.com", "roles": ["customer", "admin"] }
//! ```

use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use legacyframe_core::validation::validate_email;
use legacyframe_core::Identity;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Role name that grants admin access.
const ADMIN_ROLE: &str = "admin";

/// JWT claims read from the auth service's token.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// User email; orders are keyed by it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Explicit admin flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,

    /// Single role name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Role list
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<String>,

    /// Expiration (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl Claims {
    /// Whether any of the claim forms marks the user as an admin.
    pub fn grants_admin(&self) -> bool {
        self.is_admin == Some(true)
            || self
                .role
                .as_deref()
                .is_some_and(|role| role.eq_ignore_ascii_case(ADMIN_ROLE))
            || self
                .roles
                .iter()
                .any(|role| role.eq_ignore_ascii_case(ADMIN_ROLE))
    }
}

/// A decoded token: who the user is and until when.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub identity: Identity,
    pub expires_at: Option<DateTime<Utc>>,
}

impl AuthenticatedUser {
    /// Whether the token has expired as of `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|exp| exp <= now)
    }
}

/// Token and session errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("No token provided")]
    MissingToken,

    #[error("Invalid token: {0}")]
    Malformed(String),

    #[error("Token has expired")]
    Expired,

    #[error("Token has no email claim")]
    MissingEmail,

    #[error("Token email is invalid: {0}")]
    InvalidEmail(String),

    #[error("Sign in to continue")]
    Unauthenticated,

    #[error("Admin access required")]
    Forbidden,
}

/// Decodes bearer tokens into identities.
///
/// With a shared secret the HS256 signature and `exp` are verified. Without
/// one, as in a browser that never sees the secret, the payload is read
/// unverified but an expired token is still refused.
#[derive(Clone)]
pub struct TokenDecoder {
    secret: Option<String>,
}

impl std::fmt::Debug for TokenDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenDecoder")
            .field("verifies_signature", &self.secret.is_some())
            .finish()
    }
}

impl TokenDecoder {
    /// Creates a decoder that verifies signatures with `secret`.
    pub fn with_secret(secret: impl Into<String>) -> Self {
        TokenDecoder {
            secret: Some(secret.into()),
        }
    }

    /// Creates a decoder that reads claims without verifying signatures.
    pub fn unverified() -> Self {
        TokenDecoder { secret: None }
    }

    /// Creates a decoder from an optional secret.
    pub fn new(secret: Option<String>) -> Self {
        TokenDecoder { secret }
    }

    /// Whether signatures are checked.
    pub fn verifies_signature(&self) -> bool {
        self.secret.is_some()
    }

    /// Decodes `token` and derives the user's identity.
    pub fn decode(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AuthError::MissingToken);
        }

        let claims = self.decode_claims(token)?;

        let expires_at = match claims.exp {
            Some(exp) => Some(
                Utc.timestamp_opt(exp, 0)
                    .single()
                    .ok_or_else(|| AuthError::Malformed(format!("exp out of range: {exp}")))?,
            ),
            None => None,
        };

        let email = claims
            .email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
            .ok_or(AuthError::MissingEmail)?;
        validate_email(email).map_err(|e| AuthError::InvalidEmail(e.to_string()))?;

        let user = AuthenticatedUser {
            identity: Identity::new(email, claims.grants_admin()),
            expires_at,
        };

        if user.is_expired_at(Utc::now()) {
            return Err(AuthError::Expired);
        }

        debug!(
            email = %user.identity.email,
            is_admin = user.identity.is_admin,
            verified = self.verifies_signature(),
            "Token decoded"
        );
        Ok(user)
    }

    fn decode_claims(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_aud = false;

        let key = match &self.secret {
            Some(secret) => DecodingKey::from_secret(secret.as_bytes()),
            None => {
                validation.insecure_disable_signature_validation();
                validation.required_spec_claims.clear();
                validation.validate_exp = false;
                DecodingKey::from_secret(&[])
            }
        };

        decode::<Claims>(token, &key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
                _ => AuthError::Malformed(e.to_string()),
            })
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header value.
pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    auth_header
        .trim()
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
