use reqwest::StatusCode;
use thiserror::Error;

/// Failure talking to the analysis service.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// No response was received at all.
    #[error("analysis service unreachable: {0}")]
    Unreachable(String),

    /// The service answered with an error status.
    #[error("analysis service rejected request ({status}): {}", .detail.as_deref().unwrap_or("no detail"))]
    Rejected {
        status: StatusCode,
        detail: Option<String>,
    },

    #[error("invalid response body: {0}")]
    Decode(String),

    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),
}

impl ServiceError {
    /// Text shown to the user for this failure.
    ///
    /// A rejection that carries a detail message is surfaced verbatim; every
    /// other failure falls back to `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ServiceError::Rejected {
                detail: Some(detail),
                ..
            } if !detail.trim().is_empty() => detail.clone(),
            _ => fallback.to_string(),
        }
    }

    pub fn is_unreachable(&self) -> bool {
        matches!(self, ServiceError::Unreachable(_))
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            return ServiceError::Decode(error.to_string());
        }
        match error.status() {
            Some(status) => ServiceError::Rejected {
                status,
                detail: None,
            },
            None => ServiceError::Unreachable(error.to_string()),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkflowError {
    #[error("select between {min} and {max} documents (currently {count})")]
    SelectionOutOfBounds {
        count: usize,
        min: usize,
        max: usize,
    },

    #[error("persona is required")]
    MissingPersona,

    #[error("job to be done is required")]
    MissingJob,

    #[error("a persona query is already in flight")]
    AlreadySubmitting,

    #[error("no persona query is in flight")]
    NotSubmitting,

    #[error("unknown document: {0}")]
    UnknownDocument(String),
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("upload between {min} and {max} files at once (got {count})")]
    BatchSize {
        count: usize,
        min: usize,
        max: usize,
    },

    #[error("path has no file name: {0}")]
    MissingFileName(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Service(#[from] ServiceError),
}
