use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::car::models::CarId;
use crate::domain::rental::models::RentalRecord;
use crate::inbound::http::middleware::AuthenticatedIdentity;
use crate::inbound::http::router::AppState;

pub async fn rent_car(
    State(state): State<AppState>,
    Path(car_id): Path<i64>,
    Extension(identity): Extension<AuthenticatedIdentity>,
    Json(body): Json<RentCarRequestBody>,
) -> Result<ApiSuccess<RentalData>, ApiError> {
    state
        .rental_service
        .rent(
            CarId(car_id),
            identity.id,
            body.rent_started_at,
            body.rent_ended_at,
        )
        .await
        .map_err(ApiError::from)
        .map(|ref record| ApiSuccess::new(StatusCode::CREATED, record.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentCarRequestBody {
    rent_started_at: DateTime<Utc>,
    #[serde(default)]
    rent_ended_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalData {
    pub id: i64,
    pub user_id: i64,
    pub car_id: i64,
    pub rent_started_at: DateTime<Utc>,
    pub rent_ended_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<&RentalRecord> for RentalData {
    fn from(record: &RentalRecord) -> Self {
        Self {
            id: record.id.0,
            user_id: record.identity_id.0,
            car_id: record.car_id.0,
            rent_started_at: record.rent_started_at,
            rent_ended_at: record.rent_ended_at,
            created_at: record.created_at,
        }
    }
}
