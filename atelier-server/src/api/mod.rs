//! API routes
//!
//! One module per resource area; each translates HTTP requests into
//! accessor calls. Guard middleware is applied per router group:
//! public routes carry none, protected routes the session guard, admin
//! routes the session guard plus the role guard.

pub mod admin;
pub mod auth;
pub mod cart;
pub mod feedback;
pub mod health;
pub mod orders;
pub mod products;
pub mod public;
pub mod reviews;
pub mod users;

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, HeaderValue, Method, header};
use axum::{Router, middleware};
use shared::error::{AppError, AppResult};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::auth::{rate_limit, require_admin, require_auth};
use crate::core::AppState;

const MAX_BODY_BYTES: usize = 30 * 1024 * 1024;

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Map validator failures onto the 400 taxonomy
pub(crate) fn validate_payload<T: validator::Validate>(payload: &T) -> AppResult<()> {
    payload.validate().map_err(|e| {
        AppError::validation("Invalid input").with_detail("errors", e.to_string())
    })
}

/// Build a fully configured application with all middleware and state
pub fn create_router(state: AppState) -> Router {
    // Public routes - no auth
    let open = Router::new()
        .merge(health::router())
        .merge(auth::public_router())
        .merge(products::public_router())
        .merge(reviews::public_router())
        .merge(public::router());

    // Session-guarded routes
    let protected = Router::new()
        .merge(cart::router())
        .merge(orders::customer_router())
        .merge(reviews::protected_router())
        .merge(feedback::customer_router())
        .merge(users::router())
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    // Admin routes - session guard plus role guard
    let admin = Router::new()
        .merge(products::admin_router())
        .merge(orders::admin_router())
        .merge(feedback::admin_router())
        .merge(admin::router())
        .layer(middleware::from_fn(require_admin))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .merge(open)
        .merge(protected)
        .merge(admin)
        // ========== Tower HTTP Middleware ==========
        // CORS - allow-list with credentials for the cookie session
        .layer(cors_layer(&state))
        // Compression - gzip responses
        .layer(CompressionLayer::new())
        // Request body cap (base64 image payloads)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        // Trace - request logging at INFO level
        .layer(TraceLayer::new_for_http())
        // Request ID - generate and propagate a unique ID per request
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
        // Global per-IP rate limiter - outermost
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit::rate_limit_middleware,
        ))
        .with_state(state)
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let origins: Vec<HeaderValue> = state
        .config
        .client_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}
