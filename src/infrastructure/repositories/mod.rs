// Repository implementations (data access layer)
// Adapters that implement domain repository interfaces

pub mod in_memory_registration_repository;
pub mod postgres_registration_repository;

pub use in_memory_registration_repository::InMemoryRegistrationRepository;
pub use postgres_registration_repository::PostgresRegistrationRepository;
