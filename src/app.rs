use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/workouts/add", post(handlers::form_add))
        .route("/workouts/clear", post(handlers::form_clear))
        .route(
            "/api/workouts",
            get(handlers::get_workouts)
                .post(handlers::add_workout)
                .delete(handlers::clear_workouts),
        )
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/notifications", get(handlers::get_notifications))
        .route("/api/generate/:section", get(handlers::generate))
        .route("/api/search", get(handlers::search))
        .with_state(state)
}
