//! HTTP surface for the calorie intake service.
//!
//! # Endpoints
//!
//! - `GET /health`: Health check endpoint (no auth required)
//! - `GET /test`: Authenticated smoke test
//! - `POST /addcalorieintake`: Log a food item
//! - `POST /getcalorieintakebydate`: Entries for one calendar date
//! - `POST /getcalorieintakebylimit`: Entries in a trailing window of days
//! - `DELETE /deletecalorieintake`: Remove entries by item and date
//! - `GET /getgoalcalorieintake`: Daily calorie target
//!
//! All routes except `/health` require `Authorization: Bearer <key>`.

mod auth;
mod handlers;
mod response;

pub use auth::{ApiKeyStore, AuthUser};
pub use response::ApiResponse;

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::service::CalorieService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub api_keys: Arc<ApiKeyStore>,
    pub service: CalorieService,
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    // Public routes (no auth)
    let public_routes = Router::new().route("/health", get(handlers::health));

    // Protected routes (auth required)
    let protected_routes = Router::new()
        .route("/test", get(handlers::test))
        .route("/addcalorieintake", post(handlers::add_calorie_intake))
        .route(
            "/getcalorieintakebydate",
            post(handlers::get_calorie_intake_by_date),
        )
        .route(
            "/getcalorieintakebylimit",
            post(handlers::get_calorie_intake_by_limit),
        )
        .route(
            "/deletecalorieintake",
            delete(handlers::delete_calorie_intake),
        )
        .route(
            "/getgoalcalorieintake",
            get(handlers::get_goal_calorie_intake),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
