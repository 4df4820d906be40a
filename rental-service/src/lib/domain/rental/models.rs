use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::car::models::CarId;
use crate::domain::identity::models::IdentityId;

/// Rental record unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RentalId(pub i64);

impl fmt::Display for RentalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A booking of one car by one identity for a time window.
///
/// Records are created by the ledger and never mutated afterwards. An
/// absent end together with a start at or before now denotes an active,
/// open-ended rental.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RentalRecord {
    pub id: RentalId,
    pub identity_id: IdentityId,
    pub car_id: CarId,
    pub rent_started_at: DateTime<Utc>,
    pub rent_ended_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// A booking about to be written. The end is already resolved: callers that
/// omitted one got the default window applied by the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewRental {
    pub identity_id: IdentityId,
    pub car_id: CarId,
    pub rent_started_at: DateTime<Utc>,
    pub rent_ended_at: DateTime<Utc>,
}
