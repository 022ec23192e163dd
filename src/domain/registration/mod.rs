// Registration domain module
// Contains the registration aggregate root, its value objects and the event catalog

#![allow(clippy::module_inception)]

pub mod catalog;
pub mod registration;
pub mod value_objects;

// Re-export main types for convenience
pub use catalog::{EventInfo, EVENT_CATALOG};
pub use registration::Registration;
pub use value_objects::{Participant, RegistrationId};
