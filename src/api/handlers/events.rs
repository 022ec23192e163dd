use axum::Json;

use crate::api::responses::Envelope;
use crate::domain::registration::{EventInfo, EVENT_CATALOG};

/// List the known events with their advisory team sizes
///
/// GET /events
pub async fn list_events() -> Json<Envelope<&'static [EventInfo]>> {
    Json(Envelope::ok(EVENT_CATALOG))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lists_catalog_in_order() {
        let Json(envelope) = list_events().await;

        assert!(envelope.success);
        assert_eq!(envelope.data.len(), EVENT_CATALOG.len());
        assert_eq!(envelope.data[0].name, "Treasure Hunt");
    }
}
