//! Web API Middleware
//!
//! Request ID generation, tracing, request timeouts and CORS handling.

pub mod request_id;

use axum::http::StatusCode;
use axum::middleware;
use axum::Router;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{ConfigResult, CorsConfig, WebConfig};
use crate::web::state::TelemetryWebState;

/// Apply the middleware stack to the telemetry router
///
/// Outermost first:
/// 1. Request ID generation
/// 2. Request tracing
/// 3. CORS handling
/// 4. Request timeout
pub fn apply_middleware_stack(
    router: Router<Arc<TelemetryWebState>>,
    config: &WebConfig,
) -> ConfigResult<Router<Arc<TelemetryWebState>>> {
    let cors = create_cors_layer(&config.cors)?;

    let common_middleware = ServiceBuilder::new()
        .layer(middleware::from_fn(request_id::add_request_id))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout(),
        ));

    Ok(router.layer(common_middleware))
}

/// Create CORS layer from configuration
///
/// Open mode without credentials is a plain wildcard. Open mode with credentials
/// mirrors the request, since browsers refuse `*` alongside credentials.
pub fn create_cors_layer(config: &CorsConfig) -> ConfigResult<CorsLayer> {
    if config.is_open() && !config.allow_credentials {
        return Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any));
    }

    let origin = if config.is_open() {
        AllowOrigin::mirror_request()
    } else {
        AllowOrigin::list(config.origin_header_values()?)
    };

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(config.allow_credentials))
}
