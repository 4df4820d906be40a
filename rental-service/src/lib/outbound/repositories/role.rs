use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::identity::models::Role;
use crate::domain::identity::models::RoleId;
use crate::identity::errors::IdentityError;
use crate::identity::ports::RoleRepository;

pub struct PostgresRoleRepository {
    pool: PgPool,
}

impl PostgresRoleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct RoleRow {
    id: i64,
    name: String,
}

impl From<RoleRow> for Role {
    fn from(row: RoleRow) -> Self {
        Role {
            id: RoleId(row.id),
            name: row.name,
        }
    }
}

#[async_trait]
impl RoleRepository for PostgresRoleRepository {
    async fn find_by_id(&self, id: RoleId) -> Result<Option<Role>, IdentityError> {
        sqlx::query_as::<_, RoleRow>("SELECT id, name FROM roles WHERE id = $1")
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map(|row| row.map(Role::from))
            .map_err(|e| IdentityError::Database(e.to_string()))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, IdentityError> {
        sqlx::query_as::<_, RoleRow>("SELECT id, name FROM roles WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map(|row| row.map(Role::from))
            .map_err(|e| IdentityError::Database(e.to_string()))
    }
}
