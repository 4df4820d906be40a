use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::CarData;
use crate::domain::car::models::CreateCarCommand;
use crate::inbound::http::router::AppState;

pub async fn create_car(
    State(state): State<AppState>,
    Json(body): Json<CreateCarRequestBody>,
) -> Result<ApiSuccess<CarData>, ApiError> {
    state
        .car_service
        .create_car(body.into_command())
        .await
        .map_err(ApiError::from)
        .map(|ref car| ApiSuccess::new(StatusCode::CREATED, car.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateCarRequestBody {
    name: String,
    price: i64,
    size: String,
    image: String,
}

impl CreateCarRequestBody {
    fn into_command(self) -> CreateCarCommand {
        CreateCarCommand {
            name: self.name,
            price: self.price,
            size: self.size,
            image: self.image,
        }
    }
}
