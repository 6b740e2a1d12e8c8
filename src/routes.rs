use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::handlers::api::{practice_link, schedule_interview, AppState};
use crate::handlers::health::health_check;

pub fn create_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/practice-links/:level", get(practice_link))
        .route("/interviews", post(schedule_interview))
        .with_state(app_state)
}
