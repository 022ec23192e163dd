use std::sync::Arc;

use crate::domain::repositories::RegistrationRepository;

/// Shared state handed to every handler
///
/// Handlers only see the repository port, never the store itself.
#[derive(Clone)]
pub struct AppState {
    pub registrations: Arc<dyn RegistrationRepository>,
}

impl AppState {
    pub fn new(registrations: Arc<dyn RegistrationRepository>) -> Self {
        Self { registrations }
    }
}
