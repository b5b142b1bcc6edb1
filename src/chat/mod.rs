mod wire;
mod ws;

use axum::{routing::get, Router};

use crate::AppState;

pub use wire::{Incoming, Outgoing};

pub fn router() -> Router<AppState> {
    Router::new().route("/chat/ws", get(ws::chat_ws))
}
