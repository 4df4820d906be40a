use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use tokio::time::timeout;

use crate::car::ports::CarRepository;
use crate::domain::car::models::CarId;
use crate::domain::identity::models::IdentityId;
use crate::domain::rental::models::NewRental;
use crate::domain::rental::models::RentalRecord;
use crate::rental::errors::RentalError;
use crate::rental::ports::RentalRepository;
use crate::rental::ports::RentalServicePort;

/// Grace period for bookings whose start has just slipped into the past,
/// e.g. a client that stamped "now" and spent a few seconds in transit.
const PAST_START_TOLERANCE_SECS: i64 = 300;

/// Rental ledger.
///
/// Decides whether a car is available for a window and records the booking.
/// The repository-side insert re-checks availability atomically; the check
/// made here is only an early reject, so racing calls cannot double-book.
pub struct RentalService<CR, RR>
where
    CR: CarRepository,
    RR: RentalRepository,
{
    cars: Arc<CR>,
    rentals: Arc<RR>,
    query_timeout: Duration,
}

impl<CR, RR> RentalService<CR, RR>
where
    CR: CarRepository,
    RR: RentalRepository,
{
    pub fn new(cars: Arc<CR>, rentals: Arc<RR>, query_timeout: Duration) -> Self {
        Self {
            cars,
            rentals,
            query_timeout,
        }
    }

    async fn bounded<T>(
        &self,
        operation: impl Future<Output = Result<T, RentalError>>,
    ) -> Result<T, RentalError> {
        timeout(self.query_timeout, operation)
            .await
            .map_err(|_| RentalError::Timeout)?
    }

    fn resolve_window(
        rent_started_at: DateTime<Utc>,
        rent_ended_at: Option<DateTime<Utc>>,
    ) -> Result<DateTime<Utc>, RentalError> {
        let rent_ended_at =
            rent_ended_at.unwrap_or_else(|| rent_started_at + chrono::Duration::days(1));

        if rent_ended_at <= rent_started_at {
            return Err(RentalError::InvalidWindow(
                "rental must end after it starts".to_string(),
            ));
        }

        let earliest_start = Utc::now() - chrono::Duration::seconds(PAST_START_TOLERANCE_SECS);
        if rent_started_at < earliest_start {
            return Err(RentalError::InvalidWindow(
                "rental cannot start in the past".to_string(),
            ));
        }

        Ok(rent_ended_at)
    }
}

#[async_trait]
impl<CR, RR> RentalServicePort for RentalService<CR, RR>
where
    CR: CarRepository,
    RR: RentalRepository,
{
    async fn rent(
        &self,
        car_id: CarId,
        identity_id: IdentityId,
        rent_started_at: DateTime<Utc>,
        rent_ended_at: Option<DateTime<Utc>>,
    ) -> Result<RentalRecord, RentalError> {
        let rent_ended_at = Self::resolve_window(rent_started_at, rent_ended_at)?;

        let car = self
            .bounded(async { Ok(self.cars.find_by_id(car_id).await?) })
            .await?
            .ok_or(RentalError::CarNotFound(car_id.0))?;

        // Fast-path reject; the repository repeats this check atomically
        // with the insert.
        let conflicting = self
            .bounded(
                self.rentals
                    .find_active_for_car(car.id, rent_started_at, rent_ended_at),
            )
            .await?;
        if conflicting.is_some() {
            return Err(RentalError::CarAlreadyRented {
                car_name: car.name.clone(),
            });
        }

        let rental = NewRental {
            identity_id,
            car_id: car.id,
            rent_started_at,
            rent_ended_at,
        };

        let record = self.bounded(self.rentals.create(&car, rental)).await?;
        tracing::info!(
            rental_id = %record.id,
            car_id = %record.car_id,
            identity_id = %record.identity_id,
            "Car rented"
        );

        Ok(record)
    }
}
