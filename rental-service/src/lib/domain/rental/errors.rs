use thiserror::Error;

use crate::car::errors::CarError;

/// Error for rental-ledger operations.
///
/// `CarAlreadyRented` and `InvalidWindow` are expected outcomes of a
/// booking attempt; `Database` and `Timeout` are the transient class.
#[derive(Debug, Clone, Error)]
pub enum RentalError {
    #[error("Car not found: {0}")]
    CarNotFound(i64),

    #[error("{car_name} is already rented")]
    CarAlreadyRented {
        /// Name of the car the caller tried to double-book
        car_name: String,
    },

    #[error("Invalid rental window: {0}")]
    InvalidWindow(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Storage deadline exceeded")]
    Timeout,
}

impl From<CarError> for RentalError {
    fn from(err: CarError) -> Self {
        match err {
            CarError::NotFound(id) => RentalError::CarNotFound(id),
            CarError::Database(message) => RentalError::Database(message),
            CarError::Timeout => RentalError::Timeout,
        }
    }
}
