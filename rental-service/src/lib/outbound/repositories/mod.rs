pub mod car;
pub mod identity;
pub mod rental;
pub mod role;

pub use car::PostgresCarRepository;
pub use identity::PostgresIdentityRepository;
pub use rental::PostgresRentalRepository;
pub use role::PostgresRoleRepository;
