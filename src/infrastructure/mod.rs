// Infrastructure layer module
// Contains the store connector and repository adapters
// Follows Hexagonal Architecture

pub mod repositories;
pub mod store;

pub use store::StoreConnector;
