// HTTP handlers (driving adapters)

pub mod events;
pub mod health;
pub mod registrations;
