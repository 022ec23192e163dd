// Repository ports (interfaces implemented by the infrastructure layer)

pub mod registration_repository;

pub use registration_repository::{
    RegistrationRepository, RepositoryError, RepositoryResult,
};
