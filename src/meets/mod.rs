mod finish;
mod list;

use axum::{routing::{get, post}, Router};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/userMeets", get(list::user_meets))
        .route("/profMeets", get(list::prof_meets))
        .route("/meets/{id}/finish", post(finish::finish))
}
