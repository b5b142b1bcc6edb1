mod availability;
mod schedule;
mod timeslot;

use axum::{routing::{get, post}, Router};

use crate::AppState;

pub use timeslot::{end_of, Slot, SlotError, SESSION_MINUTES};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/services/{id}/slots", get(availability::slots_page))
        .route("/services/{id}/book", post(schedule::book))
}
