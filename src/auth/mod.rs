mod forgotten;
mod login;
mod logout;
mod register;

use axum::{routing::{get, post}, Router};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(login::page).post(login::submit))
        .route("/register", get(register::page).post(register::submit))
        .route("/forgotten", get(forgotten::page).post(forgotten::request))
        .route("/forgotten/reset", post(forgotten::reset))
        .route("/logout", get(logout::logout))
}
