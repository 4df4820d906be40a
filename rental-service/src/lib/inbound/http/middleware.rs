use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::RoleId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ErrorBody;
use crate::inbound::http::router::AppState;

/// Resolved identity stored in request extensions once a request passes the
/// authorization gate.
#[derive(Debug, Clone)]
pub struct AuthenticatedIdentity {
    pub id: IdentityId,
    pub role_id: RoleId,
    pub role: String,
}

/// State for one gated route group: the shared app state plus the role its
/// routes demand. `None` admits any authenticated caller.
#[derive(Clone)]
pub struct RoleGate {
    pub state: AppState,
    pub required_role: Option<&'static str>,
}

/// Middleware enforcing the authorization gate.
///
/// Extracts the bearer token, validates it, attaches the resolved identity
/// to the request, and rejects callers whose role does not match the gate.
pub async fn authorize(
    State(gate): State<RoleGate>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let claims = gate
        .state
        .gate
        .authorize(authorization, gate.required_role)
        .map_err(|e| {
            tracing::warn!(error = %e, "Request rejected by authorization gate");
            ApiError::from(e)
        })?;

    let identity_id = claims.identity_id().map_err(|e| {
        tracing::warn!(error = %e, "Token subject is not an identity id");
        ApiError::Unauthorized(ErrorBody::new("AuthenticationError", e.to_string()))
    })?;

    req.extensions_mut().insert(AuthenticatedIdentity {
        id: IdentityId(identity_id),
        role_id: RoleId(claims.role_id),
        role: claims.role,
    });

    Ok(next.run(req).await)
}
