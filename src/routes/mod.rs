use axum::{Json, Router, http::StatusCode, routing::get};

use crate::{error::ErrorBody, state::AppState};

pub mod admin;
pub mod bookings;
pub mod categories;
pub mod consultants;
pub mod doc;
pub mod earnings;
pub mod health;
pub mod params;
pub mod payments;
pub mod reviews;
pub mod sessions;
pub mod users;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/users", users::router())
        .nest("/consultants", consultants::router())
        .nest("/categories", categories::router())
        .nest("/bookings", bookings::router())
        .nest("/payments", payments::router())
        .nest("/sessions", sessions::router())
        .nest("/reviews", reviews::router())
        .nest("/earnings", earnings::router())
        .nest("/admin", admin::router())
}

/// Full application router: health, API, docs and the JSON 404 fallback.
/// Cross-cutting layers are added by the binary.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", create_api_router())
        .merge(doc::scalar_docs())
        .fallback(not_found)
        .with_state(state)
}

async fn not_found() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: "Not Found".to_string(),
        }),
    )
}
