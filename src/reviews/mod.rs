mod create;
mod list;

use axum::{routing::get, Router};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/review", get(list::page))
        .route("/create-review", get(create::page).post(create::submit))
}
