//! Authentication infrastructure for the rental service
//!
//! Provides the three building blocks the service composes at startup:
//! - Password hashing and verification (Argon2id)
//! - Signed access-token issuance and parsing (HS256 JWT with a fixed TTL)
//! - Role-gated request authorization over a bearer header
//!
//! The service defines its own domain types and adapts these primitives;
//! nothing in this crate touches storage or the network.
//!
//! # Examples
//!
//! ## Passwords
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Access tokens
//! ```
//! use auth::TokenIssuer;
//! use chrono::Duration;
//!
//! let issuer = TokenIssuer::new(b"secret_key_at_least_32_bytes_long!", Duration::hours(8));
//! let token = issuer.issue(1, 2, "member").unwrap();
//! let claims = issuer.parse(&token).unwrap();
//! assert_eq!(claims.role, "member");
//! ```
//!
//! ## Authorization
//! ```
//! use auth::{AuthorizationGate, TokenIssuer};
//! use chrono::Duration;
//!
//! let issuer = TokenIssuer::new(b"secret_key_at_least_32_bytes_long!", Duration::hours(8));
//! let gate = AuthorizationGate::new(issuer.clone());
//!
//! let token = issuer.issue(1, 1, "admin").unwrap();
//! let header = format!("Bearer {token}");
//! let claims = gate.authorize(Some(&header), Some("admin")).unwrap();
//! assert_eq!(claims.identity_id().unwrap(), 1);
//! ```

pub mod gate;
pub mod jwt;
pub mod password;

pub use gate::AuthorizationGate;
pub use gate::GateError;
pub use jwt::Claims;
pub use jwt::TokenError;
pub use jwt::TokenIssuer;
pub use password::PasswordError;
pub use password::PasswordHasher;
