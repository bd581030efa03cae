// src/presentation/http/routes.rs
use crate::application::{resources::ResourceService, sessions::SessionService};
use crate::config::CorsMode;
use crate::presentation::http::{
    controllers::{resources, sessions},
    middleware::rate_limit::sign_in_rate_limit_layer,
    state::HttpState,
};
use axum::{
    Extension, Json, Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use serde::Serialize;
use std::{sync::Arc, time::Duration};
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

/// Knobs of the HTTP surface that do not change the pipelines.
#[derive(Clone, Debug, Default)]
pub struct RouterOptions {
    pub cors_mode: CorsMode,
    pub allowed_origins: Vec<String>,
    pub sign_in_rate_limit: bool,
}

pub fn build_router(state: HttpState, options: &RouterOptions) -> Router {
    let mut router = Router::new().route("/health", get(health));

    for service in state.services.resources() {
        router = router.nest(
            &format!("/api/v1/{}", service.name()),
            resource_router(Arc::clone(service)),
        );
    }
    if let Some(service) = state.services.sessions() {
        router = router.nest(
            "/api/v1/session",
            session_router(Arc::clone(service), options.sign_in_rate_limit),
        );
    }

    let router = router.layer(TraceLayer::new_for_http());
    match cors_layer(options) {
        Some(cors) => router.layer(cors),
        None => router,
    }
}

fn resource_router(service: Arc<ResourceService>) -> Router {
    Router::new()
        .route(
            "/",
            get(resources::list)
                .post(resources::create)
                .put(resources::missing_id)
                .patch(resources::missing_id)
                .delete(resources::missing_id)
                .options(resources::options),
        )
        .route(
            "/{id}",
            get(resources::show)
                .put(resources::replace)
                .patch(resources::update)
                .delete(resources::delete)
                .options(resources::options),
        )
        .layer(Extension(service))
}

fn session_router(service: Arc<SessionService>, rate_limit: bool) -> Router {
    let mut sign_in = post(sessions::sign_in);
    if rate_limit {
        match sign_in_rate_limit_layer() {
            Some(layer) => sign_in = sign_in.layer(layer),
            None => tracing::warn!("invalid sign-in rate limit configuration, limiter disabled"),
        }
    }

    Router::new()
        .route(
            "/",
            sign_in
                .get(sessions::info)
                .head(sessions::head)
                .delete(sessions::sign_out)
                .options(resources::options),
        )
        .layer(Extension(service))
}

fn cors_layer(options: &RouterOptions) -> Option<CorsLayer> {
    let base = || {
        CorsLayer::new()
            .allow_methods([
                Method::GET,
                Method::HEAD,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .expose_headers([sessions::SESSION_TOKEN_HEADER])
            .max_age(Duration::from_secs(3600))
    };

    match options.cors_mode {
        CorsMode::Off => None,
        CorsMode::On => {
            let origins: Vec<HeaderValue> = options
                .allowed_origins
                .iter()
                .filter_map(|origin| match HeaderValue::from_str(origin) {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!(%origin, "ignoring invalid CORS origin");
                        None
                    }
                })
                .collect();
            Some(
                base()
                    .allow_origin(AllowOrigin::list(origins))
                    .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]),
            )
        }
        CorsMode::Dev => Some(
            base()
                .allow_origin(AllowOrigin::mirror_request())
                .allow_headers(AllowHeaders::mirror_request())
                .allow_credentials(true),
        ),
    }
}

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: String,
}

pub async fn health() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok".into(),
    })
}
