use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::timeout;

use crate::car::errors::CarError;
use crate::car::ports::CarRepository;
use crate::car::ports::CarServicePort;
use crate::domain::car::models::Car;
use crate::domain::car::models::CarId;
use crate::domain::car::models::CarPage;
use crate::domain::car::models::CreateCarCommand;
use crate::domain::car::models::Pagination;
use crate::domain::car::models::UpdateCarCommand;

const MAX_PAGE_SIZE: u32 = 100;

/// Catalog service.
pub struct CarService<CR>
where
    CR: CarRepository,
{
    cars: Arc<CR>,
    query_timeout: Duration,
}

impl<CR> CarService<CR>
where
    CR: CarRepository,
{
    pub fn new(cars: Arc<CR>, query_timeout: Duration) -> Self {
        Self {
            cars,
            query_timeout,
        }
    }

    async fn bounded<T>(
        &self,
        operation: impl Future<Output = Result<T, CarError>>,
    ) -> Result<T, CarError> {
        timeout(self.query_timeout, operation)
            .await
            .map_err(|_| CarError::Timeout)?
    }
}

#[async_trait]
impl<CR> CarServicePort for CarService<CR>
where
    CR: CarRepository,
{
    async fn get_car(&self, id: CarId) -> Result<Car, CarError> {
        self.bounded(self.cars.find_by_id(id))
            .await?
            .ok_or(CarError::NotFound(id.0))
    }

    async fn list_cars(&self, page: u32, page_size: u32) -> Result<CarPage, CarError> {
        let page = page.max(1);
        let page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        let offset = u64::from(page - 1) * u64::from(page_size);

        let cars = self.bounded(self.cars.list(offset, page_size)).await?;
        let count = self.bounded(self.cars.count()).await?;

        Ok(CarPage {
            cars,
            pagination: Pagination::new(page, page_size, count),
        })
    }

    async fn create_car(&self, command: CreateCarCommand) -> Result<Car, CarError> {
        let car = self.bounded(self.cars.create(command)).await?;
        tracing::info!(car_id = %car.id, name = %car.name, "Car added to catalog");
        Ok(car)
    }

    async fn update_car(&self, id: CarId, command: UpdateCarCommand) -> Result<Car, CarError> {
        let mut car = self
            .bounded(self.cars.find_by_id(id))
            .await?
            .ok_or(CarError::NotFound(id.0))?;

        if let Some(name) = command.name {
            car.name = name;
        }
        if let Some(price) = command.price {
            car.price = price;
        }
        if let Some(size) = command.size {
            car.size = size;
        }
        if let Some(image) = command.image {
            car.image = image;
        }

        self.bounded(self.cars.update(car)).await
    }

    async fn delete_car(&self, id: CarId) -> Result<(), CarError> {
        self.bounded(self.cars.delete(id)).await?;
        tracing::info!(car_id = %id, "Car removed from catalog");
        Ok(())
    }
}
