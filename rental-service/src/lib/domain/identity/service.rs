use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::TokenIssuer;
use tokio::time::timeout;

use crate::domain::identity::models::AccessToken;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::identity::errors::IdentityError;
use crate::identity::ports::IdentityRepository;
use crate::identity::ports::IdentityServicePort;
use crate::identity::ports::RoleRepository;

/// Authentication service.
///
/// Orchestrates credential verification and token issuance over the
/// identity and role repositories. Token work is pure; only repository
/// calls suspend, and each one is bounded by the configured deadline.
pub struct IdentityService<IR, RR>
where
    IR: IdentityRepository,
    RR: RoleRepository,
{
    identities: Arc<IR>,
    roles: Arc<RR>,
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
    query_timeout: Duration,
}

impl<IR, RR> IdentityService<IR, RR>
where
    IR: IdentityRepository,
    RR: RoleRepository,
{
    pub fn new(
        identities: Arc<IR>,
        roles: Arc<RR>,
        token_issuer: TokenIssuer,
        query_timeout: Duration,
    ) -> Self {
        Self {
            identities,
            roles,
            password_hasher: PasswordHasher::new(),
            token_issuer,
            query_timeout,
        }
    }

    async fn bounded<T>(
        &self,
        operation: impl Future<Output = Result<T, IdentityError>>,
    ) -> Result<T, IdentityError> {
        timeout(self.query_timeout, operation)
            .await
            .map_err(|_| IdentityError::Timeout)?
    }
}

#[async_trait]
impl<IR, RR> IdentityServicePort for IdentityService<IR, RR>
where
    IR: IdentityRepository,
    RR: RoleRepository,
{
    async fn login(&self, email: &str, password: &str) -> Result<AccessToken, IdentityError> {
        let identity = self
            .bounded(self.identities.find_by_email(email))
            .await?
            .ok_or_else(|| IdentityError::EmailNotRegistered(email.to_string()))?;

        let verified = self
            .password_hasher
            .verify(password, &identity.password_hash)?;
        if !verified {
            tracing::debug!(email = %identity.email, "Password mismatch on login");
            return Err(IdentityError::InsufficientCredential);
        }

        let role = self
            .bounded(self.roles.find_by_id(identity.role_id))
            .await?
            .ok_or(IdentityError::RoleNotFound(identity.role_id.0))?;

        let access_token = self
            .token_issuer
            .issue(identity.id.0, role.id.0, &role.name)?;

        Ok(AccessToken { access_token })
    }

    async fn get_current_user(&self, id: IdentityId) -> Result<Identity, IdentityError> {
        self.bounded(self.identities.find_by_id(id))
            .await?
            .ok_or(IdentityError::NotFound(id.0))
    }
}
