mod create;
mod services;

use axum::{routing::{get, post}, Router};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/services", get(services::page))
        .route("/create-job", get(create::page).post(create::submit))
        .route("/jobs/{id}/remove", post(services::remove))
}
