use thiserror::Error;

/// Errors that can occur while producing a report document
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Font setup failed: {0}")]
    Font(String),

    #[error("PDF rendering failed: {0}")]
    Render(String),
}

pub type ExportResult<T> = Result<T, ExportError>;
