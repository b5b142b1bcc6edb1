use axum::{debug_handler, extract::State, response::{Html, IntoResponse, Redirect, Response}};
use tower_sessions::Session;

use crate::gateway::Gateway;
use crate::{include_res, res, session, AppResult};

#[debug_handler(state = crate::AppState)]
pub async fn home(State(gateway): State<Gateway>, session: Session) -> AppResult<Response> {
    let Some(user) = session::current_user(&session, &gateway).await? else {
        return Ok(Redirect::to("/login").into_response());
    };

    let professional_links = if user.is_professional {
        include_res!(str, "/pages/professional_links.html")
    } else {
        ""
    };

    Ok(Html(
        include_res!(str, "/pages/home.html")
            .replace("{username}", &res::escape(&user.username))
            .replace("{professional_links}", professional_links),
    )
    .into_response())
}
