// src/presentation/http/controllers/sessions.rs
use crate::application::{
    dto::Actor,
    error::ApplicationError,
    sessions::{SessionService, SignInRequest},
    stage::{AtStage, Stage},
};
use crate::presentation::http::{
    error::{HttpError, HttpResult},
    extractors::{RecordBody, SessionCredentials},
};
use axum::{
    Extension, Json,
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// Response header carrying a freshly issued session token.
pub const SESSION_TOKEN_HEADER: HeaderName = HeaderName::from_static("x-session-token");

pub async fn sign_in(
    Extension(service): Extension<Arc<SessionService>>,
    RecordBody(body): RecordBody,
) -> HttpResult<Response> {
    let request = SignInRequest::from_record(&body, service.identity()).at(Stage::Extract)?;
    let grant = service.sign_in(request).await?;
    let token = HeaderValue::from_str(&grant.token)
        .map_err(|err| HttpError::from_error(ApplicationError::infrastructure(err.to_string())))?;
    Ok((
        StatusCode::CREATED,
        [(SESSION_TOKEN_HEADER, token)],
        Json(grant.actor),
    )
        .into_response())
}

pub async fn info(
    Extension(service): Extension<Arc<SessionService>>,
    SessionCredentials(credentials): SessionCredentials,
) -> HttpResult<Json<Actor>> {
    Ok(Json(service.info(&credentials).await?))
}

/// Like `info` without a body, errors included.
pub async fn head(
    Extension(service): Extension<Arc<SessionService>>,
    SessionCredentials(credentials): SessionCredentials,
) -> Response {
    match service.info(&credentials).await {
        Ok(_) => StatusCode::OK.into_response(),
        Err(err) => HttpError::from(err).into_bare_response(),
    }
}

pub async fn sign_out(
    Extension(service): Extension<Arc<SessionService>>,
    SessionCredentials(credentials): SessionCredentials,
) -> HttpResult<StatusCode> {
    service.sign_out(&credentials).await?;
    Ok(StatusCode::NO_CONTENT)
}
