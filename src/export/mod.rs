//! Registration report export
//!
//! Turns a list of registrations into a team-grouped table and renders it
//! as a printable PDF.

pub mod errors;
pub mod pdf;
pub mod table;

pub use errors::{ExportError, ExportResult};
pub use pdf::render_pdf;
pub use table::{ParticipantRow, ReportRow, ReportTable, ALL_EVENTS_TITLE, COLUMNS};

use crate::domain::registration::Registration;

/// A rendered report ready for download
#[derive(Debug, Clone)]
pub struct ExportedReport {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Lays out and renders `registrations` in one step
pub fn export_registrations(
    event_filter: Option<&str>,
    registrations: &[Registration],
) -> ExportResult<ExportedReport> {
    let table = ReportTable::build(event_filter, registrations);
    let bytes = render_pdf(&table)?;

    Ok(ExportedReport {
        file_name: table.file_name(),
        bytes,
    })
}
