use crate::application::{
    ApplicationResult,
    dto::ApiErrorResponse,
    error::{ApplicationError, ErrorKind},
};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Boundary wrapper: renders an `ApplicationError` as the error envelope,
/// with log-only detail stripped.
#[derive(Debug)]
pub struct HttpError {
    status: StatusCode,
    payload: ApiErrorResponse,
}

impl HttpError {
    pub fn from_error(err: ApplicationError) -> Self {
        let status = StatusCode::from_u16(err.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // Use cases only log the failures they raise themselves; adapter
        // failures surface here first.
        if err.kind() == ErrorKind::Internal {
            tracing::error!(error = %err.log_line(), "request failed");
        }

        Self {
            status,
            payload: err.to_payload(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<ApplicationError> for HttpError {
    fn from(err: ApplicationError) -> Self {
        Self::from_error(err)
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (self.status, Json(self.payload)).into_response()
    }
}

pub type HttpResult<T> = Result<T, HttpError>;

pub trait IntoHttpResult<T> {
    fn into_http(self) -> HttpResult<T>;
}

impl<T> IntoHttpResult<T> for ApplicationResult<T> {
    fn into_http(self) -> HttpResult<T> {
        self.map_err(HttpError::from_error)
    }
}
