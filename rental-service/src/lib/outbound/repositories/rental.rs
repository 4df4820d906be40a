use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;

use crate::domain::car::models::Car;
use crate::domain::car::models::CarId;
use crate::domain::identity::models::IdentityId;
use crate::domain::rental::models::NewRental;
use crate::domain::rental::models::RentalId;
use crate::domain::rental::models::RentalRecord;
use crate::rental::errors::RentalError;
use crate::rental::ports::RentalRepository;

/// Postgres error code for an exclusion-constraint violation, raised by
/// `rentals_no_overlap` when two rentals of one car would overlap.
const EXCLUSION_VIOLATION: &str = "23P01";

pub struct PostgresRentalRepository {
    pool: PgPool,
}

impl PostgresRentalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct RentalRow {
    id: i64,
    identity_id: i64,
    car_id: i64,
    rent_started_at: DateTime<Utc>,
    rent_ended_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl From<RentalRow> for RentalRecord {
    fn from(row: RentalRow) -> Self {
        RentalRecord {
            id: RentalId(row.id),
            identity_id: IdentityId(row.identity_id),
            car_id: CarId(row.car_id),
            rent_started_at: row.rent_started_at,
            rent_ended_at: row.rent_ended_at,
            created_at: row.created_at,
        }
    }
}

fn is_exclusion_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|db_err| db_err.code())
        .map(|code| code == EXCLUSION_VIOLATION)
        .unwrap_or(false)
}

#[async_trait]
impl RentalRepository for PostgresRentalRepository {
    async fn find_active_for_car(
        &self,
        car_id: CarId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Option<RentalRecord>, RentalError> {
        let row = sqlx::query_as::<_, RentalRow>(
            r#"
            SELECT id, identity_id, car_id, rent_started_at, rent_ended_at, created_at
            FROM rentals
            WHERE car_id = $1
              AND rent_started_at < $3
              AND (rent_ended_at IS NULL OR rent_ended_at > $2)
            ORDER BY rent_started_at
            LIMIT 1
            "#,
        )
        .bind(car_id.0)
        .bind(start)
        .bind(end)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RentalError::Database(e.to_string()))?;

        Ok(row.map(RentalRecord::from))
    }

    /// Check-then-insert inside one transaction. The car row is locked so
    /// racing bookings on one car serialize here, and the exclusion
    /// constraint backstops anything the lock cannot see.
    async fn create(&self, car: &Car, rental: NewRental) -> Result<RentalRecord, RentalError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RentalError::Database(e.to_string()))?;

        let locked = sqlx::query_scalar::<_, i64>("SELECT id FROM cars WHERE id = $1 FOR UPDATE")
            .bind(rental.car_id.0)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| RentalError::Database(e.to_string()))?;
        if locked.is_none() {
            return Err(RentalError::CarNotFound(rental.car_id.0));
        }

        let conflicting = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT id
            FROM rentals
            WHERE car_id = $1
              AND rent_started_at < $3
              AND (rent_ended_at IS NULL OR rent_ended_at > $2)
            LIMIT 1
            "#,
        )
        .bind(rental.car_id.0)
        .bind(rental.rent_started_at)
        .bind(rental.rent_ended_at)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| RentalError::Database(e.to_string()))?;
        if conflicting.is_some() {
            return Err(RentalError::CarAlreadyRented {
                car_name: car.name.clone(),
            });
        }

        let row = sqlx::query_as::<_, RentalRow>(
            r#"
            INSERT INTO rentals (identity_id, car_id, rent_started_at, rent_ended_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, identity_id, car_id, rent_started_at, rent_ended_at, created_at
            "#,
        )
        .bind(rental.identity_id.0)
        .bind(rental.car_id.0)
        .bind(rental.rent_started_at)
        .bind(rental.rent_ended_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_exclusion_violation(&e) {
                RentalError::CarAlreadyRented {
                    car_name: car.name.clone(),
                }
            } else {
                RentalError::Database(e.to_string())
            }
        })?;

        tx.commit()
            .await
            .map_err(|e| RentalError::Database(e.to_string()))?;

        Ok(RentalRecord::from(row))
    }
}
