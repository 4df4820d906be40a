mod common;

use auth::TokenIssuer;
use axum::http::Method;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use common::TestApp;
use common::JWT_SECRET;
use common::MEMBER_EMAIL;
use common::PASSWORD;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_login_issues_a_parseable_token() {
    let app = TestApp::new();

    let (status, body) = app
        .request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": MEMBER_EMAIL, "password": PASSWORD })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);

    let token = body["accessToken"].as_str().expect("Missing accessToken");
    let claims = app.issuer.parse(token).expect("Token failed to parse");
    assert_eq!(claims.identity_id().unwrap(), 2);
    assert_eq!(claims.role, "member");
}

#[tokio::test]
async fn test_login_unknown_email_renders_404_with_the_email() {
    let app = TestApp::new();

    let (status, body) = app
        .request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": "abc@gmail.com", "password": "x" })),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["name"], "EmailNotRegisteredError");
    assert_eq!(body["error"]["details"], "abc@gmail.com");
}

#[tokio::test]
async fn test_login_wrong_password_renders_401() {
    let app = TestApp::new();

    let (status, body) = app
        .request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": MEMBER_EMAIL, "password": "wrong_password" })),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["name"], "InsufficientCredentialError");
}

#[tokio::test]
async fn test_whoami_returns_identity_without_the_hash() {
    let app = TestApp::new();
    let token = app.member_token().await;

    let (status, body) = app
        .request(Method::GET, "/api/auth/whoami", Some(&token), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 2);
    assert_eq!(body["email"], MEMBER_EMAIL);
    assert_eq!(body["roleId"], 2);
    assert!(body.get("passwordHash").is_none());
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_missing_token_renders_401() {
    let app = TestApp::new();

    let (status, body) = app
        .request(Method::GET, "/api/auth/whoami", None, None)
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["name"], "AuthenticationError");
}

#[tokio::test]
async fn test_expired_token_renders_401() {
    let app = TestApp::new();

    // Same key, but the expiry predates issuance.
    let stale_issuer = TokenIssuer::new(JWT_SECRET, chrono::Duration::seconds(-120));
    let token = stale_issuer.issue(2, 2, "member").unwrap();

    let (status, body) = app
        .request(Method::GET, "/api/auth/whoami", Some(&token), None)
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["name"], "AuthenticationError");
}

#[tokio::test]
async fn test_member_role_cannot_reach_admin_routes() {
    let app = TestApp::new();
    let token = app.member_token().await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/cars",
            Some(&token),
            Some(json!({
                "name": "toyota",
                "price": 12000,
                "size": "medium",
                "image": "test.png"
            })),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["name"], "InsufficientAccessError");
    assert_eq!(body["error"]["details"], "member");
}

#[tokio::test]
async fn test_admin_creates_a_car() {
    let app = TestApp::new();
    let token = app.admin_token().await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/cars",
            Some(&token),
            Some(json!({
                "name": "toyota",
                "price": 12000,
                "size": "medium",
                "image": "test.png"
            })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "toyota");
    assert_eq!(body["price"], 12000);
    assert_eq!(body["isCurrentlyRented"], false);
    assert!(body["id"].is_i64());
}

#[tokio::test]
async fn test_list_cars_paginates() {
    let app = TestApp::new();

    let (status, body) = app
        .request(Method::GET, "/api/cars?page=1&pageSize=1", None, None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cars"].as_array().unwrap().len(), 1);
    assert_eq!(body["meta"]["pagination"]["page"], 1);
    assert_eq!(body["meta"]["pagination"]["pageSize"], 1);
    assert_eq!(body["meta"]["pagination"]["pageCount"], 2);
    assert_eq!(body["meta"]["pagination"]["count"], 2);
}

#[tokio::test]
async fn test_get_car_not_found() {
    let app = TestApp::new();

    let (status, body) = app.request(Method::GET, "/api/cars/99", None, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["name"], "CarNotFoundError");
}

#[tokio::test]
async fn test_update_then_delete_car() {
    let app = TestApp::new();
    let token = app.admin_token().await;

    let (status, body) = app
        .request(
            Method::PUT,
            "/api/cars/1",
            Some(&token),
            Some(json!({ "price": 250000 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["price"], 250000);
    assert_eq!(body["name"], "Mazda RX4 Wag");

    let (status, _) = app
        .request(Method::DELETE, "/api/cars/1", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.request(Method::GET, "/api/cars/1", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_rent_defaults_to_one_day_and_marks_the_car_rented() {
    let app = TestApp::new();
    let token = app.member_token().await;

    let start = Utc::now();
    let (status, body) = app
        .request(
            Method::POST,
            "/api/cars/1/rent",
            Some(&token),
            Some(json!({ "rentStartedAt": start.to_rfc3339() })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["carId"], 1);
    assert_eq!(body["userId"], 2);

    let ended_at: DateTime<Utc> = body["rentEndedAt"]
        .as_str()
        .expect("Missing rentEndedAt")
        .parse()
        .expect("rentEndedAt is not a timestamp");
    assert_eq!(ended_at, start + chrono::Duration::days(1));

    // Availability is derived from the ledger.
    let (status, body) = app.request(Method::GET, "/api/cars/1", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isCurrentlyRented"], true);
}

#[tokio::test]
async fn test_renting_a_rented_car_renders_422() {
    let app = TestApp::new();
    let token = app.member_token().await;

    let start = Utc::now();
    let (status, _) = app
        .request(
            Method::POST,
            "/api/cars/1/rent",
            Some(&token),
            Some(json!({ "rentStartedAt": start.to_rfc3339() })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .request(
            Method::POST,
            "/api/cars/1/rent",
            Some(&token),
            Some(json!({ "rentStartedAt": start.to_rfc3339() })),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["name"], "CarAlreadyRentedError");
    assert_eq!(body["error"]["details"], "Mazda RX4 Wag");
}

#[tokio::test]
async fn test_rent_missing_car_renders_404() {
    let app = TestApp::new();
    let token = app.member_token().await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/cars/99/rent",
            Some(&token),
            Some(json!({ "rentStartedAt": Utc::now().to_rfc3339() })),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["name"], "CarNotFoundError");
}

#[tokio::test]
async fn test_rent_rejects_an_inverted_window() {
    let app = TestApp::new();
    let token = app.member_token().await;

    let start = Utc::now();
    let (status, body) = app
        .request(
            Method::POST,
            "/api/cars/1/rent",
            Some(&token),
            Some(json!({
                "rentStartedAt": start.to_rfc3339(),
                "rentEndedAt": (start - chrono::Duration::hours(1)).to_rfc3339()
            })),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["name"], "InvalidRentalWindowError");
}

#[tokio::test]
async fn test_concurrent_rentals_admit_exactly_one_winner() {
    let app = TestApp::new();
    let token = app.member_token().await;

    // Staggered starts that all fall inside each other's one-day default
    // windows: every pair overlaps, so only one booking may survive.
    let base = Utc::now() + chrono::Duration::hours(1);
    let mut handles = Vec::new();

    for i in 0..8 {
        let router = app.router.clone();
        let token = token.clone();
        let start = base + chrono::Duration::hours(i);

        handles.push(tokio::spawn(async move {
            let request = axum::http::Request::builder()
                .method(Method::POST)
                .uri("/api/cars/2/rent")
                .header("authorization", format!("Bearer {token}"))
                .header("content-type", "application/json")
                .body(axum::body::Body::from(
                    serde_json::to_vec(&json!({ "rentStartedAt": start.to_rfc3339() })).unwrap(),
                ))
                .unwrap();

            router.oneshot(request).await.unwrap().status()
        }));
    }

    let mut created = 0;
    let mut rejected = 0;
    for handle in handles {
        match handle.await.unwrap() {
            StatusCode::CREATED => created += 1,
            StatusCode::UNPROCESSABLE_ENTITY => rejected += 1,
            other => panic!("Unexpected status {other}"),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(rejected, 7);
}
