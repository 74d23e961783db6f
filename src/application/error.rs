use crate::application::dto::ApiErrorResponse;
use crate::domain::errors::DomainError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type ApplicationResult<T> = Result<T, ApplicationError>;

const BAD_REQUEST: &str = "Bad Request";
const VALIDATION_FAILED: &str = "Validation Failed";
const UNAUTHORIZED: &str = "Unauthorized";
const NOT_FOUND: &str = "Not Found";
const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

/// One unit of failure detail. Entries flagged `for_logs_only` are rendered
/// into log lines but never reach the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub message: String,
    #[serde(skip)]
    pub for_logs_only: bool,
}

impl SerializedError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: message.into(),
            for_logs_only: false,
        }
    }

    pub fn for_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            message: message.into(),
            for_logs_only: false,
        }
    }

    pub fn logs_only(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: message.into(),
            for_logs_only: true,
        }
    }
}

/// Drop log-only entries, keeping the rest in their original order.
pub fn client_visible(errors: &[SerializedError]) -> Vec<SerializedError> {
    errors
        .iter()
        .filter(|error| !error.for_logs_only)
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BadRequest,
    Validation,
    Unauthorized,
    NotFound,
    Internal,
}

impl ErrorKind {
    pub fn status_code(self) -> u16 {
        match self {
            ErrorKind::BadRequest | ErrorKind::Validation => 400,
            ErrorKind::Unauthorized => 401,
            ErrorKind::NotFound => 404,
            ErrorKind::Internal => 500,
        }
    }

    pub fn summary(self) -> &'static str {
        match self {
            ErrorKind::BadRequest => BAD_REQUEST,
            ErrorKind::Validation => VALIDATION_FAILED,
            ErrorKind::Unauthorized => UNAUTHORIZED,
            ErrorKind::NotFound => NOT_FOUND,
            ErrorKind::Internal => INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("{}", render_log_line(BAD_REQUEST, .0))]
    BadRequest(Vec<SerializedError>),

    #[error("{}", render_log_line(VALIDATION_FAILED, .0))]
    Validation(Vec<SerializedError>),

    #[error("{}", render_log_line(UNAUTHORIZED, .0))]
    Unauthorized(Vec<SerializedError>),

    #[error("{}", render_log_line(NOT_FOUND, .0))]
    NotFound(Vec<SerializedError>),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("infrastructure failure: {0}")]
    Infrastructure(String),
}

impl ApplicationError {
    pub fn bad_request(errors: Vec<SerializedError>) -> Self {
        Self::BadRequest(errors)
    }

    pub fn validation(errors: Vec<SerializedError>) -> Self {
        Self::Validation(errors)
    }

    pub fn unauthorized(errors: Vec<SerializedError>) -> Self {
        Self::Unauthorized(errors)
    }

    pub fn not_found(errors: Vec<SerializedError>) -> Self {
        Self::NotFound(errors)
    }

    pub fn infrastructure(msg: impl Into<String>) -> Self {
        Self::Infrastructure(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::BadRequest(_) => ErrorKind::BadRequest,
            Self::Validation(_) => ErrorKind::Validation,
            Self::Unauthorized(_) => ErrorKind::Unauthorized,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Domain(DomainError::Validation(_)) => ErrorKind::Validation,
            Self::Domain(DomainError::Conflict(_)) => ErrorKind::BadRequest,
            Self::Domain(DomainError::NotFound(_)) => ErrorKind::NotFound,
            Self::Domain(DomainError::Persistence(_)) | Self::Infrastructure(_) => {
                ErrorKind::Internal
            }
        }
    }

    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }

    pub fn summary(&self) -> &'static str {
        self.kind().summary()
    }

    /// Every sub-error, log-only entries included.
    pub fn errors(&self) -> Vec<SerializedError> {
        match self {
            Self::BadRequest(errors)
            | Self::Validation(errors)
            | Self::Unauthorized(errors)
            | Self::NotFound(errors) => errors.clone(),
            Self::Domain(DomainError::Persistence(msg)) | Self::Infrastructure(msg) => {
                vec![SerializedError::logs_only(msg.clone())]
            }
            Self::Domain(
                DomainError::Validation(msg)
                | DomainError::Conflict(msg)
                | DomainError::NotFound(msg),
            ) => vec![SerializedError::new(msg.clone())],
        }
    }

    /// Sub-errors safe to show the caller. Falls back to the summary when
    /// every entry was log-only.
    pub fn client_errors(&self) -> Vec<SerializedError> {
        let visible = client_visible(&self.errors());
        if visible.is_empty() {
            vec![SerializedError::new(self.summary())]
        } else {
            visible
        }
    }

    pub fn log_line(&self) -> String {
        render_log_line(self.summary(), &self.errors())
    }

    pub fn to_payload(&self) -> ApiErrorResponse {
        ApiErrorResponse::new(self.summary(), self.client_errors())
    }
}

fn render_log_line(summary: &str, errors: &[SerializedError]) -> String {
    let messages: Vec<&str> = errors
        .iter()
        .map(|error| error.message.as_str())
        .collect();

    if messages.is_empty() {
        format!("{summary}.")
    } else {
        format!("{summary}: {}.", messages.join(", "))
    }
}
