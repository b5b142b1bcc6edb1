use axum::{debug_handler, response::Redirect};
use tower_sessions::Session;

use crate::session;

#[debug_handler]
pub(crate) async fn logout(session: Session) -> Redirect {
    // credential and identity go together; the protected gate sends the
    // next request back to /login
    session::clear(&session).await;
    Redirect::to("/login")
}
