use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::car::models::Car;
use crate::domain::car::models::CarId;
use crate::domain::identity::models::IdentityId;
use crate::domain::rental::models::NewRental;
use crate::domain::rental::models::RentalRecord;
use crate::rental::errors::RentalError;

/// Port for the rental ledger.
#[async_trait]
pub trait RentalServicePort: Send + Sync + 'static {
    /// Book a car for an identity over a window.
    ///
    /// When `rent_ended_at` is absent the window defaults to one day from
    /// the start.
    ///
    /// # Errors
    /// * `CarNotFound` - Car does not exist
    /// * `CarAlreadyRented` - An existing rental overlaps the window; no
    ///   record is created
    /// * `InvalidWindow` - Window is empty, inverted, or starts too far in
    ///   the past
    /// * `Database` / `Timeout` - Persistence failed or exceeded its deadline
    async fn rent(
        &self,
        car_id: CarId,
        identity_id: IdentityId,
        rent_started_at: DateTime<Utc>,
        rent_ended_at: Option<DateTime<Utc>>,
    ) -> Result<RentalRecord, RentalError>;
}

/// Persistence operations for rental records.
#[async_trait]
pub trait RentalRepository: Send + Sync + 'static {
    /// Find a rental of this car whose window overlaps `[start, end)`.
    /// Open-ended rentals overlap every window after their start.
    async fn find_active_for_car(
        &self,
        car_id: CarId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Option<RentalRecord>, RentalError>;

    /// Persist a booking.
    ///
    /// The overlap check and the insert must execute as one atomic unit:
    /// two racing bookings of the same car may not both succeed. The loser
    /// gets `CarAlreadyRented` built from `car`.
    async fn create(&self, car: &Car, rental: NewRental) -> Result<RentalRecord, RentalError>;
}
