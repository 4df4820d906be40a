use chrono::DateTime;
use chrono::TimeZone;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::TokenError;

/// Payload carried by a signed access token.
///
/// Identity and role travel in the token itself; the server keeps no session
/// state. `sub` holds the identity id as a string per JWT convention.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject: identity id
    pub sub: String,

    /// Role id of the identity at issuance time
    pub role_id: i64,

    /// Role name, matched verbatim by the authorization gate
    pub role: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Parse the subject back into an identity id.
    ///
    /// # Errors
    /// * `MalformedClaim` - `sub` is not an integer
    pub fn identity_id(&self) -> Result<i64, TokenError> {
        self.sub
            .parse()
            .map_err(|_| TokenError::MalformedClaim(format!("sub: {}", self.sub)))
    }

    /// Expiration instant as a UTC timestamp.
    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.exp, 0).single().unwrap_or_default()
    }
}
