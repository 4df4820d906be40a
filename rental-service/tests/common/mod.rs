use std::sync::atomic::AtomicI64;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use auth::AuthorizationGate;
use auth::PasswordHasher;
use auth::TokenIssuer;
use axum::body::Body;
use axum::http::header;
use axum::http::Method;
use axum::http::Request;
use axum::http::StatusCode;
use axum::Router;
use chrono::DateTime;
use chrono::Utc;
use http_body_util::BodyExt;
use rental_service::car::errors::CarError;
use rental_service::car::ports::CarRepository;
use rental_service::car::service::CarService;
use rental_service::domain::car::models::Car;
use rental_service::domain::car::models::CarId;
use rental_service::domain::car::models::CreateCarCommand;
use rental_service::domain::identity::models::EmailAddress;
use rental_service::domain::identity::models::Identity;
use rental_service::domain::identity::models::IdentityId;
use rental_service::domain::identity::models::Role;
use rental_service::domain::identity::models::RoleId;
use rental_service::domain::identity::service::IdentityService;
use rental_service::domain::rental::models::NewRental;
use rental_service::domain::rental::models::RentalId;
use rental_service::domain::rental::models::RentalRecord;
use rental_service::domain::rental::service::RentalService;
use rental_service::identity::errors::IdentityError;
use rental_service::identity::ports::IdentityRepository;
use rental_service::identity::ports::RoleRepository;
use rental_service::inbound::http::router::create_router;
use rental_service::inbound::http::router::AppState;
use rental_service::rental::errors::RentalError;
use rental_service::rental::ports::RentalRepository;
use serde_json::Value;
use tower::ServiceExt;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-32-bytes!";
pub const ADMIN_EMAIL: &str = "admin@rental.test";
pub const MEMBER_EMAIL: &str = "member@rental.test";
pub const PASSWORD: &str = "pass_word!";

/// In-memory stand-in for the persistence layer, implementing every port
/// the domain services consume. The rental insert re-checks overlap under
/// one lock, mirroring the transactional guarantee of the real store.
pub struct InMemoryStore {
    identities: Vec<Identity>,
    roles: Vec<Role>,
    cars: Mutex<Vec<Car>>,
    rentals: Mutex<Vec<RentalRecord>>,
    next_car_id: AtomicI64,
    next_rental_id: AtomicI64,
}

fn overlaps(record: &RentalRecord, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
    record.rent_started_at < end && record.rent_ended_at.map_or(true, |ended| ended > start)
}

fn currently_rented(rentals: &[RentalRecord], car_id: CarId) -> bool {
    let now = Utc::now();
    rentals.iter().any(|record| {
        record.car_id == car_id
            && record.rent_started_at <= now
            && record.rent_ended_at.map_or(true, |ended| ended > now)
    })
}

impl InMemoryStore {
    pub fn seeded() -> Self {
        let hasher = PasswordHasher::new();
        let password_hash = hasher.hash(PASSWORD).expect("Failed to hash password");

        let roles = vec![
            Role {
                id: RoleId(1),
                name: "admin".to_string(),
            },
            Role {
                id: RoleId(2),
                name: "member".to_string(),
            },
        ];

        let identities = vec![
            Identity {
                id: IdentityId(1),
                email: EmailAddress::new(ADMIN_EMAIL.to_string()).unwrap(),
                password_hash: password_hash.clone(),
                role_id: RoleId(1),
                created_at: Utc::now(),
            },
            Identity {
                id: IdentityId(2),
                email: EmailAddress::new(MEMBER_EMAIL.to_string()).unwrap(),
                password_hash,
                role_id: RoleId(2),
                created_at: Utc::now(),
            },
        ];

        let cars = vec![
            Car {
                id: CarId(1),
                name: "Mazda RX4 Wag".to_string(),
                price: 300_000,
                size: "LARGE".to_string(),
                image: "https://source.unsplash.com/501x501".to_string(),
                is_currently_rented: false,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            Car {
                id: CarId(2),
                name: "Honda Civic".to_string(),
                price: 150_000,
                size: "MEDIUM".to_string(),
                image: "https://source.unsplash.com/502x502".to_string(),
                is_currently_rented: false,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
        ];

        Self {
            identities,
            roles,
            cars: Mutex::new(cars),
            rentals: Mutex::new(Vec::new()),
            next_car_id: AtomicI64::new(3),
            next_rental_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl IdentityRepository for InMemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, IdentityError> {
        Ok(self
            .identities
            .iter()
            .find(|identity| identity.email.as_str() == email)
            .cloned())
    }

    async fn find_by_id(&self, id: IdentityId) -> Result<Option<Identity>, IdentityError> {
        Ok(self
            .identities
            .iter()
            .find(|identity| identity.id == id)
            .cloned())
    }
}

#[async_trait]
impl RoleRepository for InMemoryStore {
    async fn find_by_id(&self, id: RoleId) -> Result<Option<Role>, IdentityError> {
        Ok(self.roles.iter().find(|role| role.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, IdentityError> {
        Ok(self.roles.iter().find(|role| role.name == name).cloned())
    }
}

#[async_trait]
impl CarRepository for InMemoryStore {
    async fn create(&self, command: CreateCarCommand) -> Result<Car, CarError> {
        let car = Car {
            id: CarId(self.next_car_id.fetch_add(1, Ordering::SeqCst)),
            name: command.name,
            price: command.price,
            size: command.size,
            image: command.image,
            is_currently_rented: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.cars.lock().unwrap().push(car.clone());
        Ok(car)
    }

    async fn find_by_id(&self, id: CarId) -> Result<Option<Car>, CarError> {
        let rentals = self.rentals.lock().unwrap();
        Ok(self
            .cars
            .lock()
            .unwrap()
            .iter()
            .find(|car| car.id == id)
            .cloned()
            .map(|mut car| {
                car.is_currently_rented = currently_rented(&rentals, car.id);
                car
            }))
    }

    async fn list(&self, offset: u64, limit: u32) -> Result<Vec<Car>, CarError> {
        let rentals = self.rentals.lock().unwrap();
        Ok(self
            .cars
            .lock()
            .unwrap()
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .map(|mut car| {
                car.is_currently_rented = currently_rented(&rentals, car.id);
                car
            })
            .collect())
    }

    async fn count(&self) -> Result<u64, CarError> {
        Ok(self.cars.lock().unwrap().len() as u64)
    }

    async fn update(&self, car: Car) -> Result<Car, CarError> {
        let mut cars = self.cars.lock().unwrap();
        match cars.iter_mut().find(|existing| existing.id == car.id) {
            Some(existing) => {
                *existing = car.clone();
                Ok(car)
            }
            None => Err(CarError::NotFound(car.id.0)),
        }
    }

    async fn delete(&self, id: CarId) -> Result<(), CarError> {
        let mut cars = self.cars.lock().unwrap();
        let before = cars.len();
        cars.retain(|car| car.id != id);
        if cars.len() == before {
            return Err(CarError::NotFound(id.0));
        }
        Ok(())
    }
}

#[async_trait]
impl RentalRepository for InMemoryStore {
    async fn find_active_for_car(
        &self,
        car_id: CarId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Option<RentalRecord>, RentalError> {
        Ok(self
            .rentals
            .lock()
            .unwrap()
            .iter()
            .find(|record| record.car_id == car_id && overlaps(record, start, end))
            .cloned())
    }

    async fn create(&self, car: &Car, rental: NewRental) -> Result<RentalRecord, RentalError> {
        // One lock covers the re-check and the insert, so racing bookings
        // of the same car cannot both pass.
        let mut rentals = self.rentals.lock().unwrap();

        let conflict = rentals.iter().any(|record| {
            record.car_id == rental.car_id
                && overlaps(record, rental.rent_started_at, rental.rent_ended_at)
        });
        if conflict {
            return Err(RentalError::CarAlreadyRented {
                car_name: car.name.clone(),
            });
        }

        let record = RentalRecord {
            id: RentalId(self.next_rental_id.fetch_add(1, Ordering::SeqCst)),
            identity_id: rental.identity_id,
            car_id: rental.car_id,
            rent_started_at: rental.rent_started_at,
            rent_ended_at: Some(rental.rent_ended_at),
            created_at: Utc::now(),
        };
        rentals.push(record.clone());
        Ok(record)
    }
}

/// Test application wiring the real router and services over the in-memory
/// store.
pub struct TestApp {
    pub router: Router,
    pub issuer: TokenIssuer,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::seeded());
        let issuer = TokenIssuer::new(JWT_SECRET, chrono::Duration::hours(8));
        let gate = Arc::new(AuthorizationGate::new(issuer.clone()));
        let query_timeout = Duration::from_secs(2);

        let state = AppState {
            identity_service: Arc::new(IdentityService::new(
                Arc::clone(&store),
                Arc::clone(&store),
                issuer.clone(),
                query_timeout,
            )),
            car_service: Arc::new(CarService::new(Arc::clone(&store), query_timeout)),
            rental_service: Arc::new(RentalService::new(
                Arc::clone(&store),
                Arc::clone(&store),
                query_timeout,
            )),
            gate,
        };

        Self {
            router: create_router(state),
            issuer,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&json).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read response body")
            .to_bytes();

        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("Response body is not JSON")
        };

        (status, json)
    }

    pub async fn login(&self, email: &str, password: &str) -> String {
        let (status, body) = self
            .request(
                Method::POST,
                "/api/auth/login",
                None,
                Some(serde_json::json!({ "email": email, "password": password })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "Login failed: {body}");
        body["accessToken"].as_str().expect("Missing token").to_string()
    }

    pub async fn admin_token(&self) -> String {
        self.login(ADMIN_EMAIL, PASSWORD).await
    }

    pub async fn member_token(&self) -> String {
        self.login(MEMBER_EMAIL, PASSWORD).await
    }
}
