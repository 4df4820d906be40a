use auth::GateError;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::car::errors::CarError;
use crate::domain::car::models::Car;
use crate::identity::errors::IdentityError;
use crate::rental::errors::RentalError;

pub mod create_car;
pub mod delete_car;
pub mod get_car;
pub mod list_cars;
pub mod login;
pub mod rent_car;
pub mod update_car;
pub mod whoami;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// Wire shape of every failure: a stable name, a human-readable message,
/// and details only where they carry actionable information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub name: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorBody {
    pub fn new(name: &'static str, message: impl Into<String>) -> Self {
        Self {
            name,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(ErrorBody),
    Unauthorized(ErrorBody),
    NotFound(ErrorBody),
    UnprocessableEntity(ErrorBody),
    InternalServerError(String),
    ServiceUnavailable(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct ErrorResponseBody {
    error: ErrorBody,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::BadRequest(body) => (StatusCode::BAD_REQUEST, body),
            ApiError::Unauthorized(body) => (StatusCode::UNAUTHORIZED, body),
            ApiError::NotFound(body) => (StatusCode::NOT_FOUND, body),
            ApiError::UnprocessableEntity(body) => (StatusCode::UNPROCESSABLE_ENTITY, body),
            ApiError::InternalServerError(message) => {
                tracing::error!(%message, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::new("InternalServerError", message),
                )
            }
            ApiError::ServiceUnavailable(message) => {
                tracing::warn!(%message, "Transient failure surfaced to caller");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorBody::new("ServiceUnavailableError", message),
                )
            }
        };

        (status, Json(ErrorResponseBody { error })).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::InternalServerError(e.to_string())
    }
}

impl From<IdentityError> for ApiError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::EmailNotRegistered(email) => ApiError::NotFound(
                ErrorBody::new("EmailNotRegisteredError", "Email is not registered")
                    .with_details(email),
            ),
            IdentityError::InsufficientCredential => ApiError::Unauthorized(ErrorBody::new(
                "InsufficientCredentialError",
                "Wrong email or password",
            )),
            IdentityError::NotFound(id) => ApiError::NotFound(
                ErrorBody::new("NotFoundError", "Identity not found").with_details(id.to_string()),
            ),
            IdentityError::InvalidEmail(e) => {
                ApiError::UnprocessableEntity(ErrorBody::new("ValidationError", e.to_string()))
            }
            IdentityError::Timeout => ApiError::ServiceUnavailable(err.to_string()),
            IdentityError::RoleNotFound(_)
            | IdentityError::Password(_)
            | IdentityError::Token(_)
            | IdentityError::Database(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<CarError> for ApiError {
    fn from(err: CarError) -> Self {
        match err {
            CarError::NotFound(id) => ApiError::NotFound(
                ErrorBody::new("CarNotFoundError", "Car not found").with_details(id.to_string()),
            ),
            CarError::Timeout => ApiError::ServiceUnavailable(err.to_string()),
            CarError::Database(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<RentalError> for ApiError {
    fn from(err: RentalError) -> Self {
        match err {
            RentalError::CarNotFound(id) => ApiError::NotFound(
                ErrorBody::new("CarNotFoundError", "Car not found").with_details(id.to_string()),
            ),
            RentalError::CarAlreadyRented { ref car_name } => ApiError::UnprocessableEntity(
                ErrorBody::new("CarAlreadyRentedError", err.to_string())
                    .with_details(car_name.clone()),
            ),
            RentalError::InvalidWindow(_) => ApiError::UnprocessableEntity(ErrorBody::new(
                "InvalidRentalWindowError",
                err.to_string(),
            )),
            RentalError::Timeout => ApiError::ServiceUnavailable(err.to_string()),
            RentalError::Database(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<GateError> for ApiError {
    fn from(err: GateError) -> Self {
        match err {
            GateError::MissingToken | GateError::MalformedHeader | GateError::Token(_) => {
                ApiError::Unauthorized(ErrorBody::new("AuthenticationError", err.to_string()))
            }
            GateError::InsufficientAccess { role } => ApiError::Unauthorized(
                ErrorBody::new(
                    "InsufficientAccessError",
                    "This role may not access the resource",
                )
                .with_details(role),
            ),
        }
    }
}

/// Catalog entry as rendered on the wire. Shared by every car handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarData {
    pub id: i64,
    pub name: String,
    pub price: i64,
    pub size: String,
    pub image: String,
    pub is_currently_rented: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Car> for CarData {
    fn from(car: &Car) -> Self {
        Self {
            id: car.id.0,
            name: car.name.clone(),
            price: car.price,
            size: car.size.clone(),
            image: car.image.clone(),
            is_currently_rented: car.is_currently_rented,
            created_at: car.created_at,
            updated_at: car.updated_at,
        }
    }
}
