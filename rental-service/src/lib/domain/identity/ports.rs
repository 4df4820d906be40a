use async_trait::async_trait;

use crate::domain::identity::models::AccessToken;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::Role;
use crate::domain::identity::models::RoleId;
use crate::identity::errors::IdentityError;

/// Port for authentication operations.
#[async_trait]
pub trait IdentityServicePort: Send + Sync + 'static {
    /// Verify credentials and mint a signed access token.
    ///
    /// # Errors
    /// * `EmailNotRegistered` - No identity stored under this email
    /// * `InsufficientCredential` - Password does not match the stored hash
    /// * `Database` / `Timeout` - Persistence failed or exceeded its deadline
    async fn login(&self, email: &str, password: &str) -> Result<AccessToken, IdentityError>;

    /// Retrieve the identity behind an authenticated request.
    ///
    /// # Errors
    /// * `NotFound` - Identity does not exist
    /// * `Database` / `Timeout` - Persistence failed or exceeded its deadline
    async fn get_current_user(&self, id: IdentityId) -> Result<Identity, IdentityError>;
}

/// Persistence operations for identities.
///
/// Absence is signaled by `None`, never by an error.
#[async_trait]
pub trait IdentityRepository: Send + Sync + 'static {
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, IdentityError>;

    async fn find_by_id(&self, id: IdentityId) -> Result<Option<Identity>, IdentityError>;
}

/// Persistence operations for role reference data.
#[async_trait]
pub trait RoleRepository: Send + Sync + 'static {
    async fn find_by_id(&self, id: RoleId) -> Result<Option<Role>, IdentityError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, IdentityError>;
}
