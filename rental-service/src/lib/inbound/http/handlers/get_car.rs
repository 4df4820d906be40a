use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::CarData;
use crate::domain::car::models::CarId;
use crate::inbound::http::router::AppState;

pub async fn get_car(
    State(state): State<AppState>,
    Path(car_id): Path<i64>,
) -> Result<ApiSuccess<CarData>, ApiError> {
    state
        .car_service
        .get_car(CarId(car_id))
        .await
        .map_err(ApiError::from)
        .map(|ref car| ApiSuccess::new(StatusCode::OK, car.into()))
}
