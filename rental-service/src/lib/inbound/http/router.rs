use std::sync::Arc;
use std::time::Duration;

use auth::AuthorizationGate;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_car::create_car;
use super::handlers::delete_car::delete_car;
use super::handlers::get_car::get_car;
use super::handlers::list_cars::list_cars;
use super::handlers::login::login;
use super::handlers::rent_car::rent_car;
use super::handlers::update_car::update_car;
use super::handlers::whoami::whoami;
use super::middleware::authorize;
use super::middleware::RoleGate;
use crate::car::ports::CarServicePort;
use crate::identity::models::ROLE_ADMIN;
use crate::identity::models::ROLE_MEMBER;
use crate::identity::ports::IdentityServicePort;
use crate::rental::ports::RentalServicePort;

#[derive(Clone)]
pub struct AppState {
    pub identity_service: Arc<dyn IdentityServicePort>,
    pub car_service: Arc<dyn CarServicePort>,
    pub rental_service: Arc<dyn RentalServicePort>,
    pub gate: Arc<AuthorizationGate>,
}

pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/cars", get(list_cars))
        .route("/api/cars/:car_id", get(get_car));

    let authenticated_routes = Router::new()
        .route("/api/auth/whoami", get(whoami))
        .route_layer(middleware::from_fn_with_state(
            RoleGate {
                state: state.clone(),
                required_role: None,
            },
            authorize,
        ));

    let member_routes = Router::new()
        .route("/api/cars/:car_id/rent", post(rent_car))
        .route_layer(middleware::from_fn_with_state(
            RoleGate {
                state: state.clone(),
                required_role: Some(ROLE_MEMBER),
            },
            authorize,
        ));

    let admin_routes = Router::new()
        .route("/api/cars", post(create_car))
        .route("/api/cars/:car_id", put(update_car))
        .route("/api/cars/:car_id", delete(delete_car))
        .route_layer(middleware::from_fn_with_state(
            RoleGate {
                state: state.clone(),
                required_role: Some(ROLE_ADMIN),
            },
            authorize,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(authenticated_routes)
        .merge(member_routes)
        .merge(admin_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
