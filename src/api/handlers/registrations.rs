use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::api::errors::ApiError;
use crate::api::responses::{Envelope, MessageResponse};
use crate::api::state::AppState;
use crate::domain::registration::catalog;
use crate::domain::registration::value_objects::validate_participants;
use crate::domain::registration::{Participant, Registration};
use crate::domain::repositories::{RepositoryError, RepositoryResult};
use crate::export;

/// Query string of list and export requests
#[derive(Debug, Default, Deserialize)]
pub struct EventFilter {
    pub event: Option<String>,
}

impl EventFilter {
    /// The requested event, trimmed; a blank value means no filter
    ///
    /// List and export both read the filter through here, so the report
    /// title always names the same event the rows were selected by.
    pub fn event(&self) -> Option<&str> {
        self.event
            .as_deref()
            .map(str::trim)
            .filter(|event| !event.is_empty())
    }
}

/// Query string of delete requests
#[derive(Debug, Default, Deserialize)]
pub struct DeleteParams {
    pub id: Option<String>,
}

/// Request body for replacing a registration's participants
#[derive(Debug, Deserialize)]
pub struct UpdateRegistrationRequest {
    pub id: Option<String>,
    pub participants: Option<Vec<Participant>>,
}

/// Treats absent and blank ids alike
fn required_id(id: Option<&str>) -> Option<&str> {
    id.map(str::trim).filter(|id| !id.is_empty())
}

async fn load_registrations(
    state: &AppState,
    event: Option<&str>,
) -> RepositoryResult<Vec<Registration>> {
    match event {
        Some(event) => {
            if !catalog::is_known_event(event) {
                tracing::debug!(event, "Filtering by an event outside the catalog");
            }
            state.registrations.list_by_event(event).await
        }
        None => state.registrations.list_all().await,
    }
}

/// List registrations, optionally filtered by event
///
/// GET /registrations?event=<name>
pub async fn list_registrations(
    State(state): State<AppState>,
    Query(filter): Query<EventFilter>,
) -> Result<Json<Envelope<Vec<Registration>>>, ApiError> {
    let registrations = load_registrations(&state, filter.event())
        .await
        .map_err(|e| {
            tracing::error!("Error fetching registrations: {}", e);
            ApiError::internal_server_error("Failed to fetch data")
        })?;

    Ok(Json(Envelope::ok(registrations)))
}

/// Delete a registration
///
/// DELETE /registrations?id=<id>
///
/// Deleting an id that no longer exists still confirms success.
pub async fn delete_registration(
    State(state): State<AppState>,
    Query(params): Query<DeleteParams>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = required_id(params.id.as_deref()).ok_or_else(|| ApiError::bad_request("Missing ID"))?;

    state.registrations.delete_by_id(id).await.map_err(|e| {
        tracing::error!("Error deleting registration {}: {}", id, e);
        ApiError::internal_server_error("Delete failed")
    })?;

    tracing::info!(id, "Registration deleted");
    Ok(Json(MessageResponse::new("Deleted successfully")))
}

/// Replace the participants of a registration
///
/// PUT /registrations
pub async fn update_registration(
    State(state): State<AppState>,
    payload: Result<Json<UpdateRegistrationRequest>, JsonRejection>,
) -> Result<Json<Envelope<Registration>>, ApiError> {
    let Json(req) = payload.map_err(|e| {
        tracing::debug!("Rejected update body: {}", e);
        ApiError::bad_request("Missing data")
    })?;

    let (id, participants) = match (required_id(req.id.as_deref()), req.participants) {
        (Some(id), Some(participants)) => (id.to_string(), participants),
        _ => return Err(ApiError::bad_request("Missing data")),
    };

    validate_participants(&participants).map_err(|e| ApiError::bad_request(e))?;

    let updated = state
        .registrations
        .update_participants(&id, participants)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound(_) => ApiError::not_found("Registration not found"),
            other => {
                tracing::error!("Error updating registration {}: {}", id, other);
                ApiError::internal_server_error("Update failed")
            }
        })?;

    tracing::info!(%id, participants = updated.participants().len(), "Registration updated");
    Ok(Json(Envelope::ok(updated)))
}

/// Download the team-grouped report as a PDF
///
/// GET /registrations/export?event=<name>
pub async fn export_report(
    State(state): State<AppState>,
    Query(filter): Query<EventFilter>,
) -> Result<Response, ApiError> {
    let event = filter.event();

    let registrations = load_registrations(&state, event).await.map_err(|e| {
        tracing::error!("Error fetching registrations for export: {}", e);
        ApiError::internal_server_error("Export failed")
    })?;

    let report = export::export_registrations(event, &registrations).map_err(|e| {
        tracing::error!("Error rendering registration report: {}", e);
        ApiError::internal_server_error("Export failed")
    })?;

    let disposition = format!("attachment; filename=\"{}\"", report.file_name);
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        report.bytes,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::registration::RegistrationId;
    use crate::domain::repositories::registration_repository::MockRegistrationRepository;
    use axum::http::StatusCode;
    use std::sync::Arc;

    fn state_with(repo: MockRegistrationRepository) -> State<AppState> {
        State(AppState::new(Arc::new(repo)))
    }

    fn participant(name: &str) -> Participant {
        Participant::new(name, "XII-B", "9876543210").unwrap()
    }

    fn registration(team: &str, event: &str) -> Registration {
        Registration::from_persistence(
            RegistrationId::generate(),
            team.to_string(),
            event.to_string(),
            vec![participant("Asha")],
        )
    }

    fn filter(event: Option<&str>) -> Query<EventFilter> {
        Query(EventFilter {
            event: event.map(str::to_string),
        })
    }

    #[tokio::test]
    async fn list_without_filter_uses_list_all() {
        let mut repo = MockRegistrationRepository::new();
        let records = vec![registration("A", "Quiz"), registration("B", "Coding")];
        let expected = records.clone();
        repo.expect_list_all()
            .times(1)
            .returning(move || Ok(records.clone()));
        repo.expect_list_by_event().never();

        let Json(envelope) = list_registrations(state_with(repo), filter(None))
            .await
            .unwrap();

        assert!(envelope.success);
        assert_eq!(envelope.data, expected);
    }

    #[tokio::test]
    async fn list_with_filter_uses_list_by_event() {
        let mut repo = MockRegistrationRepository::new();
        repo.expect_list_by_event()
            .withf(|event| event == "Quiz")
            .times(1)
            .returning(|_| Ok(vec![registration("A", "Quiz")]));
        repo.expect_list_all().never();

        let Json(envelope) = list_registrations(state_with(repo), filter(Some("Quiz")))
            .await
            .unwrap();

        assert_eq!(envelope.data.len(), 1);
    }

    #[tokio::test]
    async fn list_with_empty_filter_lists_everything() {
        let mut repo = MockRegistrationRepository::new();
        repo.expect_list_all().times(1).returning(|| Ok(Vec::new()));
        repo.expect_list_by_event().never();

        let result = list_registrations(state_with(repo), filter(Some(""))).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn list_with_whitespace_filter_lists_everything() {
        let mut repo = MockRegistrationRepository::new();
        repo.expect_list_all()
            .times(1)
            .returning(|| Ok(vec![registration("A", "Quiz")]));
        repo.expect_list_by_event().never();

        let Json(envelope) = list_registrations(state_with(repo), filter(Some("   ")))
            .await
            .unwrap();

        assert_eq!(envelope.data.len(), 1);
    }

    #[tokio::test]
    async fn list_filter_is_trimmed_before_lookup() {
        let mut repo = MockRegistrationRepository::new();
        repo.expect_list_by_event()
            .withf(|event| event == "Quiz")
            .times(1)
            .returning(|_| Ok(vec![registration("A", "Quiz")]));
        repo.expect_list_all().never();

        let Json(envelope) = list_registrations(state_with(repo), filter(Some(" Quiz ")))
            .await
            .unwrap();

        assert_eq!(envelope.data.len(), 1);
    }

    #[tokio::test]
    async fn list_failure_is_generic_server_error() {
        let mut repo = MockRegistrationRepository::new();
        repo.expect_list_all()
            .returning(|| Err(RepositoryError::Connection("password=secret".to_string())));

        let err = list_registrations(state_with(repo), filter(None))
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Failed to fetch data");
    }

    #[tokio::test]
    async fn delete_without_id_never_touches_repository() {
        let mut repo = MockRegistrationRepository::new();
        repo.expect_delete_by_id().never();

        let err = delete_registration(state_with(repo), Query(DeleteParams { id: None }))
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Missing ID");
    }

    #[tokio::test]
    async fn delete_with_blank_id_is_bad_request() {
        let mut repo = MockRegistrationRepository::new();
        repo.expect_delete_by_id().never();

        let err = delete_registration(
            state_with(repo),
            Query(DeleteParams {
                id: Some("  ".to_string()),
            }),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn delete_confirms_success() {
        let mut repo = MockRegistrationRepository::new();
        repo.expect_delete_by_id()
            .withf(|id| id == "abc")
            .times(1)
            .returning(|_| Ok(()));

        let Json(body) = delete_registration(
            state_with(repo),
            Query(DeleteParams {
                id: Some("abc".to_string()),
            }),
        )
        .await
        .unwrap();

        assert_eq!(body.message, "Deleted successfully");
    }

    #[tokio::test]
    async fn delete_failure_is_server_error() {
        let mut repo = MockRegistrationRepository::new();
        repo.expect_delete_by_id()
            .returning(|_| Err(RepositoryError::Store("disk full".to_string())));

        let err = delete_registration(
            state_with(repo),
            Query(DeleteParams {
                id: Some("abc".to_string()),
            }),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Delete failed");
    }

    #[tokio::test]
    async fn update_missing_fields_is_bad_request() {
        for req in [
            UpdateRegistrationRequest {
                id: None,
                participants: Some(vec![participant("Asha")]),
            },
            UpdateRegistrationRequest {
                id: Some("abc".to_string()),
                participants: None,
            },
            UpdateRegistrationRequest {
                id: Some(String::new()),
                participants: Some(Vec::new()),
            },
        ] {
            let mut repo = MockRegistrationRepository::new();
            repo.expect_update_participants().never();

            let err = update_registration(state_with(repo), Ok(Json(req)))
                .await
                .unwrap_err();

            assert_eq!(err.status, StatusCode::BAD_REQUEST);
            assert_eq!(err.message, "Missing data");
        }
    }

    #[tokio::test]
    async fn update_with_blank_participant_name_is_bad_request() {
        let mut repo = MockRegistrationRepository::new();
        repo.expect_update_participants().never();

        let req = UpdateRegistrationRequest {
            id: Some("abc".to_string()),
            participants: Some(vec![Participant {
                name: " ".to_string(),
                class: "XI".to_string(),
                contact: "1".to_string(),
            }]),
        };

        let err = update_registration(state_with(repo), Ok(Json(req)))
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn update_returns_updated_record() {
        let original = registration("Byte Busters", "Coding");
        let id = original.id().to_string();
        let replacement = vec![participant("Ravi"), participant("Meera")];

        let mut repo = MockRegistrationRepository::new();
        let expected_id = id.clone();
        let expected_participants = replacement.clone();
        repo.expect_update_participants()
            .withf(move |id, participants| id == expected_id && participants == &expected_participants)
            .times(1)
            .returning(move |_, participants| {
                let mut updated = original.clone();
                updated.replace_participants(participants);
                Ok(updated)
            });

        let Json(envelope) = update_registration(
            state_with(repo),
            Ok(Json(UpdateRegistrationRequest {
                id: Some(id),
                participants: Some(replacement.clone()),
            })),
        )
        .await
        .unwrap();

        assert!(envelope.success);
        assert_eq!(envelope.data.participants(), replacement.as_slice());
        assert_eq!(envelope.data.team(), "Byte Busters");
    }

    #[tokio::test]
    async fn update_of_unknown_record_is_not_found() {
        let mut repo = MockRegistrationRepository::new();
        repo.expect_update_participants()
            .returning(|id, _| Err(RepositoryError::NotFound(id.to_string())));

        let err = update_registration(
            state_with(repo),
            Ok(Json(UpdateRegistrationRequest {
                id: Some("abc".to_string()),
                participants: Some(Vec::new()),
            })),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Registration not found");
    }

    #[tokio::test]
    async fn update_store_failure_is_server_error() {
        let mut repo = MockRegistrationRepository::new();
        repo.expect_update_participants()
            .returning(|_, _| Err(RepositoryError::Store("timeout".to_string())));

        let err = update_registration(
            state_with(repo),
            Ok(Json(UpdateRegistrationRequest {
                id: Some("abc".to_string()),
                participants: Some(Vec::new()),
            })),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Update failed");
    }

    #[tokio::test]
    async fn export_sets_pdf_headers_and_file_name() {
        let mut repo = MockRegistrationRepository::new();
        repo.expect_list_by_event()
            .returning(|_| Ok(vec![registration("Seekers", "Treasure Hunt")]));

        let response = export_report(state_with(repo), filter(Some("Treasure Hunt")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/pdf"
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Treasure_Hunt_Registrations.pdf\""
        );
    }

    #[tokio::test]
    async fn export_with_whitespace_filter_is_all_events() {
        let mut repo = MockRegistrationRepository::new();
        repo.expect_list_all()
            .times(1)
            .returning(|| Ok(vec![registration("A", "Quiz")]));
        repo.expect_list_by_event().never();

        let response = export_report(state_with(repo), filter(Some("  ")))
            .await
            .unwrap();

        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"All_Events_Registrations.pdf\""
        );
    }

    #[tokio::test]
    async fn export_with_padded_filter_selects_and_names_the_same_event() {
        let mut repo = MockRegistrationRepository::new();
        repo.expect_list_by_event()
            .withf(|event| event == "Quiz")
            .times(1)
            .returning(|_| Ok(vec![registration("A", "Quiz")]));

        let response = export_report(state_with(repo), filter(Some("Quiz ")))
            .await
            .unwrap();

        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Quiz_Registrations.pdf\""
        );
    }

    #[tokio::test]
    async fn export_quotes_in_event_keep_header_well_formed() {
        let mut repo = MockRegistrationRepository::new();
        repo.expect_list_by_event().returning(|_| Ok(Vec::new()));

        let response = export_report(state_with(repo), filter(Some("Qu\"iz")))
            .await
            .unwrap();

        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Qu_iz_Registrations.pdf\""
        );
    }

    #[tokio::test]
    async fn export_failure_is_server_error() {
        let mut repo = MockRegistrationRepository::new();
        repo.expect_list_all()
            .returning(|| Err(RepositoryError::Connection("refused".to_string())));

        let err = export_report(state_with(repo), filter(None))
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Export failed");
    }
}
