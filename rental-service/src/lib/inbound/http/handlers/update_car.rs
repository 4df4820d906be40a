use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::CarData;
use crate::domain::car::models::CarId;
use crate::domain::car::models::UpdateCarCommand;
use crate::inbound::http::router::AppState;

pub async fn update_car(
    State(state): State<AppState>,
    Path(car_id): Path<i64>,
    Json(body): Json<UpdateCarRequestBody>,
) -> Result<ApiSuccess<CarData>, ApiError> {
    state
        .car_service
        .update_car(CarId(car_id), body.into_command())
        .await
        .map_err(ApiError::from)
        .map(|ref car| ApiSuccess::new(StatusCode::OK, car.into()))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateCarRequestBody {
    name: Option<String>,
    price: Option<i64>,
    size: Option<String>,
    image: Option<String>,
}

impl UpdateCarRequestBody {
    fn into_command(self) -> UpdateCarCommand {
        UpdateCarCommand {
            name: self.name,
            price: self.price,
            size: self.size,
            image: self.image,
        }
    }
}
