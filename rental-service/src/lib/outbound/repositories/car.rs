use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;

use crate::car::errors::CarError;
use crate::car::ports::CarRepository;
use crate::domain::car::models::Car;
use crate::domain::car::models::CarId;
use crate::domain::car::models::CreateCarCommand;

/// Shared SELECT shape: availability is derived from the rental ledger at
/// read time, never stored on the car row.
const CAR_COLUMNS: &str = r#"
    c.id, c.name, c.price, c.size, c.image,
    EXISTS (
        SELECT 1 FROM rentals r
        WHERE r.car_id = c.id
          AND r.rent_started_at <= now()
          AND (r.rent_ended_at IS NULL OR r.rent_ended_at > now())
    ) AS is_currently_rented,
    c.created_at, c.updated_at
"#;

pub struct PostgresCarRepository {
    pool: PgPool,
}

impl PostgresCarRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CarRow {
    id: i64,
    name: String,
    price: i64,
    size: String,
    image: String,
    is_currently_rented: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CarRow> for Car {
    fn from(row: CarRow) -> Self {
        Car {
            id: CarId(row.id),
            name: row.name,
            price: row.price,
            size: row.size,
            image: row.image,
            is_currently_rented: row.is_currently_rented,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct InsertedCarRow {
    id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[async_trait]
impl CarRepository for PostgresCarRepository {
    async fn create(&self, command: CreateCarCommand) -> Result<Car, CarError> {
        let row = sqlx::query_as::<_, InsertedCarRow>(
            r#"
            INSERT INTO cars (name, price, size, image)
            VALUES ($1, $2, $3, $4)
            RETURNING id, created_at, updated_at
            "#,
        )
        .bind(&command.name)
        .bind(command.price)
        .bind(&command.size)
        .bind(&command.image)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| CarError::Database(e.to_string()))?;

        Ok(Car {
            id: CarId(row.id),
            name: command.name,
            price: command.price,
            size: command.size,
            image: command.image,
            is_currently_rented: false,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }

    async fn find_by_id(&self, id: CarId) -> Result<Option<Car>, CarError> {
        let query = format!("SELECT {CAR_COLUMNS} FROM cars c WHERE c.id = $1");

        sqlx::query_as::<_, CarRow>(&query)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map(|row| row.map(Car::from))
            .map_err(|e| CarError::Database(e.to_string()))
    }

    async fn list(&self, offset: u64, limit: u32) -> Result<Vec<Car>, CarError> {
        let query = format!("SELECT {CAR_COLUMNS} FROM cars c ORDER BY c.id OFFSET $1 LIMIT $2");

        let rows = sqlx::query_as::<_, CarRow>(&query)
            .bind(offset as i64)
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| CarError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(Car::from).collect())
    }

    async fn count(&self) -> Result<u64, CarError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM cars")
            .fetch_one(&self.pool)
            .await
            .map(|count| count as u64)
            .map_err(|e| CarError::Database(e.to_string()))
    }

    async fn update(&self, car: Car) -> Result<Car, CarError> {
        let result = sqlx::query(
            r#"
            UPDATE cars
            SET name = $2, price = $3, size = $4, image = $5, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(car.id.0)
        .bind(&car.name)
        .bind(car.price)
        .bind(&car.size)
        .bind(&car.image)
        .execute(&self.pool)
        .await
        .map_err(|e| CarError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(CarError::NotFound(car.id.0));
        }

        Ok(car)
    }

    async fn delete(&self, id: CarId) -> Result<(), CarError> {
        let result = sqlx::query("DELETE FROM cars WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| CarError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(CarError::NotFound(id.0));
        }

        Ok(())
    }
}
