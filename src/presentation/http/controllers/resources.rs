// src/presentation/http/controllers/resources.rs
use crate::application::resources::{CreateOutcome, RequestContext, ResourceService};
use crate::domain::record::Record;
use crate::presentation::http::{
    error::{HttpError, HttpResult},
    extractors::{RecordBody, ResourceId, SessionCredentials},
};
use axum::{
    Extension, Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

pub async fn create(
    Extension(service): Extension<Arc<ResourceService>>,
    SessionCredentials(credentials): SessionCredentials,
    RecordBody(body): RecordBody,
) -> HttpResult<Response> {
    let mut ctx = RequestContext::new(credentials).with_body(body);
    let response = match service.create(&mut ctx).await? {
        CreateOutcome::Created(record) => (StatusCode::CREATED, Json(record)).into_response(),
        CreateOutcome::Updated(record) => (StatusCode::OK, Json(record)).into_response(),
    };
    Ok(response)
}

pub async fn list(
    Extension(service): Extension<Arc<ResourceService>>,
    SessionCredentials(credentials): SessionCredentials,
) -> HttpResult<Json<Vec<Record>>> {
    let mut ctx = RequestContext::new(credentials);
    Ok(Json(service.list(&mut ctx).await?))
}

pub async fn show(
    Extension(service): Extension<Arc<ResourceService>>,
    SessionCredentials(credentials): SessionCredentials,
    ResourceId(id): ResourceId,
) -> HttpResult<Json<Record>> {
    let mut ctx = RequestContext::new(credentials).with_resource_id(id);
    Ok(Json(service.show(&mut ctx).await?))
}

/// PUT: the body becomes the whole record.
pub async fn replace(
    Extension(service): Extension<Arc<ResourceService>>,
    SessionCredentials(credentials): SessionCredentials,
    ResourceId(id): ResourceId,
    RecordBody(body): RecordBody,
) -> HttpResult<Json<Record>> {
    let mut ctx = RequestContext::new(credentials)
        .with_resource_id(id)
        .with_body(body);
    Ok(Json(service.replace(&mut ctx).await?))
}

/// PATCH: the body is merged onto the stored record.
pub async fn update(
    Extension(service): Extension<Arc<ResourceService>>,
    SessionCredentials(credentials): SessionCredentials,
    ResourceId(id): ResourceId,
    RecordBody(body): RecordBody,
) -> HttpResult<Json<Record>> {
    let mut ctx = RequestContext::new(credentials)
        .with_resource_id(id)
        .with_body(body);
    Ok(Json(service.update(&mut ctx).await?))
}

pub async fn delete(
    Extension(service): Extension<Arc<ResourceService>>,
    SessionCredentials(credentials): SessionCredentials,
    ResourceId(id): ResourceId,
) -> HttpResult<StatusCode> {
    let mut ctx = RequestContext::new(credentials).with_resource_id(id);
    service.delete(&mut ctx).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT, PATCH and DELETE on the collection itself.
pub async fn missing_id() -> HttpError {
    HttpError::not_found("a record id is required")
}

pub async fn options() -> StatusCode {
    StatusCode::NO_CONTENT
}
