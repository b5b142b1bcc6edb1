use axum::{debug_handler, extract::State, response::{Html, IntoResponse, Redirect, Response}};
use serde_json::json;
use tower_sessions::Session;

use crate::config::Config;
use crate::gateway::{Gateway, GatewayError};
use crate::models::User;
use crate::{include_res, res, session, AppResult, AppState};

pub(crate) const USER_BY_EMAIL: &str = r#"
query userByEmail($email: String!) {
  userByEmail(email: $email) {
    data { id username email phone address isProfessional }
    message
    success
  }
}"#;

pub(crate) async fn fetch_user(
    gateway: &Gateway,
    token: Option<&str>,
    email: &str,
) -> Result<User, GatewayError> {
    gateway
        .call::<User>(token, "userByEmail", USER_BY_EMAIL, json!({ "email": email }))
        .await?
        .required()
}

#[debug_handler(state = AppState)]
pub(crate) async fn profile(
    State(gateway): State<Gateway>,
    State(config): State<Config>,
    session: Session,
) -> AppResult<Response> {
    let Some(identity) = session::current_user(&session, &gateway).await? else {
        return Ok(Redirect::to("/login").into_response());
    };
    let token = session::token(&session).await?;

    let user = match fetch_user(&gateway, token.as_deref(), &identity.email).await {
        Ok(user) => user,
        Err(err) => return Ok(res::notice("Profile", &err.to_string(), "/home")),
    };

    let map = match (&config.maps, user.address.as_deref()) {
        (Some(maps), Some(address)) if !address.is_empty() => {
            include_res!(str, "/pages/profile/map_embed.html")
                .replace("{src}", &maps.embed_url(address))
        }
        _ => String::new(),
    };

    Ok(Html(
        include_res!(str, "/pages/profile/profile.html")
            .replace("{username}", &res::escape(&user.username))
            .replace("{email}", &res::escape(&user.email))
            .replace(
                "{phone}",
                &user.phone.map(|p| p.to_string()).unwrap_or_else(|| "-".to_string()),
            )
            .replace("{address}", &res::escape(user.address.as_deref().unwrap_or("-")))
            .replace(
                "{kind}",
                if user.is_professional { "professional" } else { "client" },
            )
            .replace("{map_embed}", &map),
    )
    .into_response())
}
