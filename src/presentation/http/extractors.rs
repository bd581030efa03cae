// src/presentation/http/extractors.rs
use crate::{
    application::{error::ApplicationError, ports::session::Credentials},
    domain::record::{Record, RecordId},
};
use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Request, rejection::JsonRejection},
    http::request::Parts,
};
use headers::{Authorization, HeaderMapExt, authorization::Bearer};
use serde_json::Value;

use super::error::HttpError;

/// Bearer credentials of the request, unverified. A missing or malformed
/// `Authorization` header is an anonymous request, not an error.
#[derive(Debug, Clone)]
pub struct SessionCredentials(pub Credentials);

impl<S> FromRequestParts<S> for SessionCredentials
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let credentials = parts
            .headers
            .typed_get::<Authorization<Bearer>>()
            .map(|header| Credentials::bearer(header.token()))
            .unwrap_or_else(Credentials::anonymous);
        Ok(Self(credentials))
    }
}

/// `{id}` path segment. Anything that is not a positive integer can never
/// name a record and is answered with 404.
#[derive(Debug, Clone, Copy)]
pub struct ResourceId(pub RecordId);

impl<S> FromRequestParts<S> for ResourceId
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| HttpError::not_found("missing resource id"))?;
        raw.parse::<RecordId>()
            .map(Self)
            .map_err(|_| HttpError::not_found(format!("no record '{raw}'")))
    }
}

/// JSON object request body.
#[derive(Debug, Clone)]
pub struct RecordBody(pub Record);

impl<S> FromRequest<S> for RecordBody
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| {
                HttpError::from_error(ApplicationError::validation(rejection.body_text()))
            })?;
        Record::try_from(value)
            .map(Self)
            .map_err(|err| HttpError::from_error(ApplicationError::validation(err.to_string())))
    }
}
