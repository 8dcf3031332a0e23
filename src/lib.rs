//! SmartServe API Library
//!
//! Food preparation forecasting for events, exposed over HTTP
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod config;
pub mod db;
pub mod dto;
pub mod entities;
pub mod errors;
pub mod forecasting;
pub mod handlers;
pub mod middleware_helpers;
pub mod migrator;
pub mod openapi;
pub mod repositories;
pub mod services;
pub mod tracing;

use axum::{
    http::{HeaderValue, Method},
    Router,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowHeaders, AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
};

use crate::config::AppConfig;
use crate::services::ForecastingService;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: AppConfig,
    pub forecasting: Arc<ForecastingService>,
}

impl AppState {
    pub fn new(db: Arc<DatabaseConnection>, config: AppConfig) -> Self {
        let forecasting = Arc::new(ForecastingService::new(db.clone()));
        Self {
            db,
            config,
            forecasting,
        }
    }
}

/// CORS policy from configuration.
///
/// Credentials cannot be combined with wildcard headers, so explicit origins
/// mirror the requested headers instead.
pub fn cors_layer(cfg: &AppConfig) -> CorsLayer {
    if cfg.cors_allow_any_origin {
        ::tracing::info!("Using permissive CORS because cors_allow_any_origin is set");
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = cfg
        .cors_origins()
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                ::tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        ::tracing::warn!("No valid CORS origins configured; cross-origin requests will be refused");
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(cfg.cors_allow_credentials)
}

/// Full application router: forecast API, health probes and Swagger UI.
pub fn app_router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.request_timeout_secs);
    let cors = cors_layer(&state.config);

    Router::<AppState>::new()
        // Cross-origin access is limited to the API routes
        .nest(
            "/api/forecast",
            handlers::forecast::forecast_routes().layer(cors),
        )
        .nest("/health", handlers::health::health_routes())
        .merge(openapi::swagger_ui())
        // HTTP tracing layer for consistent request/response telemetry
        .layer(crate::tracing::configure_http_tracing())
        .layer(TimeoutLayer::new(timeout))
        .layer(CompressionLayer::new())
        // Ensure every request carries a request id for traceability
        .layer(axum::middleware::from_fn(
            middleware_helpers::request_id::request_id_middleware,
        ))
        .with_state(state)
}

pub mod prelude {
    pub use crate::db::*;
    pub use crate::errors::*;
    pub use crate::forecasting::{
        forecast, forecast_event, EventContext, ForecastBreakdown, ForecastResult,
        HistoricalRecord,
    };
    pub use crate::services::*;
    pub use crate::{app_router, AppState};
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request, Response, StatusCode},
        routing::post,
    };
    use tower::ServiceExt;

    async fn preflight(cfg: &AppConfig, origin: &str) -> Response<Body> {
        let app = Router::new()
            .route("/", post(|| async { StatusCode::OK }))
            .layer(cors_layer(cfg));

        app.oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/")
                .header(header::ORIGIN, origin)
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn configured_origin_gets_credentials_and_mirrored_headers() {
        let mut cfg = AppConfig::default();
        cfg.cors_allowed_origins = Some("https://dashboard.example, not a valid\norigin".into());

        let response = preflight(&cfg, "https://dashboard.example").await;
        let headers = response.headers();
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "https://dashboard.example"
        );
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
            "true"
        );
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_HEADERS).unwrap(),
            "content-type"
        );
        let methods = headers
            .get(header::ACCESS_CONTROL_ALLOW_METHODS)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        for method in ["GET", "POST", "PUT", "DELETE", "OPTIONS"] {
            assert!(methods.contains(method), "{method} missing from {methods}");
        }
    }

    #[tokio::test]
    async fn permissive_override_allows_any_origin_without_credentials() {
        let mut cfg = AppConfig::default();
        cfg.cors_allow_any_origin = true;

        let response = preflight(&cfg, "https://anywhere.example").await;
        let headers = response.headers();
        assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), "*");
        assert!(headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).is_none());
    }
}
