use async_trait::async_trait;

use crate::car::errors::CarError;
use crate::domain::car::models::Car;
use crate::domain::car::models::CarId;
use crate::domain::car::models::CarPage;
use crate::domain::car::models::CreateCarCommand;
use crate::domain::car::models::UpdateCarCommand;

/// Port for catalog operations.
#[async_trait]
pub trait CarServicePort: Send + Sync + 'static {
    /// Retrieve one car with its derived availability flag.
    ///
    /// # Errors
    /// * `NotFound` - Car does not exist
    async fn get_car(&self, id: CarId) -> Result<Car, CarError>;

    /// List one page of the catalog, newest entries last.
    async fn list_cars(&self, page: u32, page_size: u32) -> Result<CarPage, CarError>;

    async fn create_car(&self, command: CreateCarCommand) -> Result<Car, CarError>;

    /// Apply a partial update.
    ///
    /// # Errors
    /// * `NotFound` - Car does not exist
    async fn update_car(&self, id: CarId, command: UpdateCarCommand) -> Result<Car, CarError>;

    /// # Errors
    /// * `NotFound` - Car does not exist
    async fn delete_car(&self, id: CarId) -> Result<(), CarError>;
}

/// Persistence operations for the car catalog.
///
/// Absence is signaled by `None` on lookups; mutations of a missing row
/// surface `NotFound`.
#[async_trait]
pub trait CarRepository: Send + Sync + 'static {
    async fn create(&self, command: CreateCarCommand) -> Result<Car, CarError>;

    async fn find_by_id(&self, id: CarId) -> Result<Option<Car>, CarError>;

    async fn list(&self, offset: u64, limit: u32) -> Result<Vec<Car>, CarError>;

    async fn count(&self) -> Result<u64, CarError>;

    async fn update(&self, car: Car) -> Result<Car, CarError>;

    async fn delete(&self, id: CarId) -> Result<(), CarError>;
}
