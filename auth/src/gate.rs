use thiserror::Error;

use crate::jwt::Claims;
use crate::jwt::TokenError;
use crate::jwt::TokenIssuer;

/// Role-gated request authorization.
///
/// Decides, from the raw `Authorization` header value and an optional
/// required role name, whether a request may proceed. Role matching is flat
/// string equality: `admin` does not satisfy a `member` requirement or vice
/// versa.
#[derive(Clone)]
pub struct AuthorizationGate {
    issuer: TokenIssuer,
}

/// Authorization failures.
#[derive(Debug, Error)]
pub enum GateError {
    #[error("Missing authorization token")]
    MissingToken,

    #[error("Malformed authorization header, expected: Bearer <token>")]
    MalformedHeader,

    #[error("Invalid or expired token: {0}")]
    Token(#[from] TokenError),

    #[error("Role {role} may not access this resource")]
    InsufficientAccess {
        /// Role the caller actually holds
        role: String,
    },
}

impl AuthorizationGate {
    pub fn new(issuer: TokenIssuer) -> Self {
        Self { issuer }
    }

    /// Authorize a request from its `Authorization` header value.
    ///
    /// On success returns the token claims so the caller can attach the
    /// resolved identity to the request context.
    ///
    /// # Errors
    /// * `MissingToken` - No authorization header present
    /// * `MalformedHeader` - Header lacks the `Bearer ` prefix
    /// * `Token` - Signature invalid, payload malformed, or token expired
    /// * `InsufficientAccess` - Token role differs from the required role
    pub fn authorize(
        &self,
        authorization: Option<&str>,
        required_role: Option<&str>,
    ) -> Result<Claims, GateError> {
        let header = authorization.ok_or(GateError::MissingToken)?;
        let token = header
            .strip_prefix("Bearer ")
            .ok_or(GateError::MalformedHeader)?;

        let claims = self.issuer.parse(token)?;

        if let Some(required) = required_role {
            if claims.role != required {
                return Err(GateError::InsufficientAccess {
                    role: claims.role,
                });
            }
        }

        Ok(claims)
    }
}
