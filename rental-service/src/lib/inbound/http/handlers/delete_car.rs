use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::car::models::CarId;
use crate::inbound::http::router::AppState;

pub async fn delete_car(
    State(state): State<AppState>,
    Path(car_id): Path<i64>,
) -> Result<ApiSuccess<()>, ApiError> {
    state
        .car_service
        .delete_car(CarId(car_id))
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::NO_CONTENT, ()))
}
