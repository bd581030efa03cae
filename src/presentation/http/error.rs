// src/presentation/http/error.rs
use crate::application::{
    error::ApplicationError,
    stage::{Stage, StageError},
};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Terminal error sink of every request. The client only ever sees the
/// status and a short code; the detail goes to the log with its stage.
#[derive(Debug)]
pub struct HttpError {
    status: StatusCode,
    code: &'static str,
    stage: Option<Stage>,
    message: String,
}

impl HttpError {
    pub fn from_error(err: ApplicationError) -> Self {
        let message = err.to_string();
        let (status, code) = match err.normalize() {
            ApplicationError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApplicationError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApplicationError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            ApplicationError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            ApplicationError::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            ApplicationError::NotImplemented(_)
            | ApplicationError::Infrastructure(_)
            | ApplicationError::Domain(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };
        Self {
            status,
            code,
            stage: None,
            message,
        }
    }

    pub fn from_stage(err: StageError) -> Self {
        let stage = err.stage;
        Self {
            stage: Some(stage),
            ..Self::from_error(err.into_inner())
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::from_error(ApplicationError::not_found(message))
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    fn log(&self) {
        let stage = self.stage.map(|stage| stage.as_str()).unwrap_or("request");
        if self.status.is_server_error() {
            tracing::error!(%stage, status = %self.status, error = %self.message, "request failed");
        } else {
            tracing::debug!(%stage, status = %self.status, error = %self.message, "request rejected");
        }
    }

    /// Logs and answers with the status alone, for responses that must not
    /// carry a body.
    pub fn into_bare_response(self) -> Response {
        self.log();
        self.status.into_response()
    }
}

impl From<StageError> for HttpError {
    fn from(err: StageError) -> Self {
        Self::from_stage(err)
    }
}

impl From<ApplicationError> for HttpError {
    fn from(err: ApplicationError) -> Self {
        Self::from_error(err)
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        self.log();
        (self.status, Json(ErrorBody { code: self.code })).into_response()
    }
}

#[derive(Serialize)]
struct ErrorBody {
    code: &'static str,
}

pub type HttpResult<T> = Result<T, HttpError>;
