use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::CarData;
use crate::domain::car::models::CarPage;
use crate::domain::car::models::Pagination;
use crate::inbound::http::router::AppState;

pub async fn list_cars(
    State(state): State<AppState>,
    Query(params): Query<ListCarsParams>,
) -> Result<ApiSuccess<ListCarsResponseData>, ApiError> {
    state
        .car_service
        .list_cars(params.page, params.page_size)
        .await
        .map_err(ApiError::from)
        .map(|ref page| ApiSuccess::new(StatusCode::OK, page.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCarsParams {
    #[serde(default = "default_page")]
    page: u32,
    #[serde(default = "default_page_size")]
    page_size: u32,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    10
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListCarsResponseData {
    pub cars: Vec<CarData>,
    pub meta: ListCarsMeta,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListCarsMeta {
    pub pagination: PaginationData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationData {
    pub page: u32,
    pub page_count: u32,
    pub page_size: u32,
    pub count: u64,
}

impl From<Pagination> for PaginationData {
    fn from(pagination: Pagination) -> Self {
        Self {
            page: pagination.page,
            page_count: pagination.page_count,
            page_size: pagination.page_size,
            count: pagination.count,
        }
    }
}

impl From<&CarPage> for ListCarsResponseData {
    fn from(page: &CarPage) -> Self {
        Self {
            cars: page.cars.iter().map(CarData::from).collect(),
            meta: ListCarsMeta {
                pagination: page.pagination.into(),
            },
        }
    }
}
