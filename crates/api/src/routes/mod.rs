//! API route definitions.

use axum::{
    Json, Router,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{AppState, middleware::auth::auth_middleware};
use pawhome_shared::AppError;

pub mod animals;
pub mod chats;
pub mod health;

/// Creates the API router with protected routes that need state for middleware.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    // Protected routes that require authentication
    let protected_routes = Router::new()
        .merge(animals::routes())
        .merge(chats::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Combine public and protected routes
    Router::new()
        .merge(health::routes())
        .merge(protected_routes)
}

/// Builds the response for an `AppError`.
fn app_error_response(err: &AppError, message: &str) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(json!({ "error": err.error_code(), "message": message })),
    )
        .into_response()
}

/// Generic server-class failure. Faults are logged at the call site; the
/// response never carries internal detail.
pub(crate) fn internal_error() -> Response {
    let err = AppError::Internal(String::new());
    app_error_response(&err, "unexpected server error")
}

/// Client-class rejection carrying the business reason.
pub(crate) fn bad_request(reason: &str) -> Response {
    let err = AppError::Validation(String::new());
    app_error_response(&err, reason)
}

/// Not-found response; also used to hide threads from non-members.
pub(crate) fn not_found(message: &str) -> Response {
    let err = AppError::NotFound(String::new());
    app_error_response(&err, message)
}
