use axum::{debug_handler, extract::State, response::{Html, IntoResponse, Redirect, Response}, Form};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_sessions::Session;

use crate::gateway::Gateway;
use crate::{include_res, res, session, validate, AppResult, AppState};

use super::page::fetch_user;

const EDIT_USER: &str = r#"
mutation editUser($email: String!, $username: String, $password: String, $phone: Int, $address: String) {
  editUser(email: $email, editUserInput: {
    username: $username, email: $email, password: $password,
    phone: $phone, address: $address
  }) {
    data
    message
    success
  }
}"#;

const FIELDS: &[&str] = &["username", "password", "phone", "address"];

#[derive(Debug, Deserialize)]
pub(crate) struct EditForm {
    pub(crate) username: String,
    // left blank to keep the current password
    pub(crate) password: String,
    pub(crate) phone: String,
    pub(crate) address: String,
}

fn render(email: &str, form: &EditForm, errors: &validate::Errors, flash: &str) -> Response {
    let page = include_res!(str, "/pages/profile/edit_profile.html")
        .replace("{email}", &res::escape(email))
        .replace("{username}", &res::escape(&form.username))
        .replace("{phone}", &res::escape(&form.phone))
        .replace("{address}", &res::escape(&form.address))
        .replace("{flash}", &res::escape(flash));
    Html(errors.apply(page, FIELDS)).into_response()
}

#[debug_handler(state = AppState)]
pub(crate) async fn page(
    State(gateway): State<Gateway>,
    session: Session,
) -> AppResult<Response> {
    let Some(identity) = session::current_user(&session, &gateway).await? else {
        return Ok(Redirect::to("/login").into_response());
    };
    let token = session::token(&session).await?;

    let user = match fetch_user(&gateway, token.as_deref(), &identity.email).await {
        Ok(user) => user,
        Err(err) => return Ok(res::notice("Edit profile", &err.to_string(), "/profile")),
    };

    let form = EditForm {
        username: user.username,
        password: String::new(),
        phone: user.phone.map(|p| p.to_string()).unwrap_or_default(),
        address: user.address.unwrap_or_default(),
    };
    Ok(render(&identity.email, &form, &validate::Errors::default(), ""))
}

#[debug_handler(state = AppState)]
pub(crate) async fn submit(
    State(gateway): State<Gateway>,
    session: Session,
    Form(form): Form<EditForm>,
) -> AppResult<Response> {
    let Some(identity) = session::current_user(&session, &gateway).await? else {
        return Ok(Redirect::to("/login").into_response());
    };
    let token = session::token(&session).await?;

    let mut errors = validate::Errors::default();
    errors.check("username", validate::name("username", &form.username));
    if !form.password.is_empty() {
        errors.check("password", validate::password(&form.password));
    }
    let phone = match validate::phone(&form.phone) {
        Ok(phone) => Some(phone),
        Err(err) => {
            errors.add("phone", err);
            None
        }
    };
    errors.check("address", validate::name("address", &form.address));
    if !errors.is_empty() {
        return Ok(render(&identity.email, &form, &errors, ""));
    }

    let password = if form.password.is_empty() { Value::Null } else { json!(form.password) };
    let result = gateway
        .call::<Value>(
            token.as_deref(),
            "editUser",
            EDIT_USER,
            json!({
                "email": identity.email,
                "username": form.username.trim(),
                "password": password,
                "phone": phone,
                "address": form.address.trim(),
            }),
        )
        .await;

    match result {
        Ok(_) => {
            // keep the cached display name in step with the edit
            session::refresh_identity(&session, &form.username).await?;
            log::info!("u/{} edited their profile", identity.id);
            Ok(Redirect::to("/profile").into_response())
        }
        Err(err) => Ok(render(&identity.email, &form, &errors, &err.to_string())),
    }
}
