use axum::{debug_handler, extract::State, response::{Html, IntoResponse, Redirect, Response}, Form};
use serde::Deserialize;
use serde_json::json;
use tower_sessions::Session;

use crate::gateway::Gateway;
use crate::models::LoginData;
use crate::{include_res, res, session, validate, AppResult, AppState};

const LOGIN: &str = r#"
mutation login($email: String!, $password: String!) {
  login(loginInput: { email: $email, password: $password }) {
    data { token email }
    message
    success
  }
}"#;

const FIELDS: &[&str] = &["email", "password"];

#[derive(Debug, Deserialize)]
pub(crate) struct LoginForm {
    pub(crate) email: String,
    pub(crate) password: String,
}

fn render(form: &LoginForm, errors: &validate::Errors, flash: &str) -> Response {
    let page = include_res!(str, "/pages/login.html")
        .replace("{email}", &res::escape(&form.email))
        .replace("{flash}", &res::escape(flash));
    Html(errors.apply(page, FIELDS)).into_response()
}

#[debug_handler]
pub(crate) async fn page() -> Response {
    render(
        &LoginForm { email: String::new(), password: String::new() },
        &validate::Errors::default(),
        "",
    )
}

#[debug_handler(state = AppState)]
pub(crate) async fn submit(
    State(gateway): State<Gateway>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    let mut errors = validate::Errors::default();
    errors.check("email", validate::email(&form.email));
    errors.check("password", validate::password(&form.password));
    if !errors.is_empty() {
        return Ok(render(&form, &errors, ""));
    }

    let result = gateway
        .call::<LoginData>(
            None,
            "login",
            LOGIN,
            json!({ "email": form.email, "password": form.password }),
        )
        .await
        .and_then(|p| p.required());
    let login = match result {
        Ok(login) => login,
        Err(err) => return Ok(render(&form, &errors, &err.to_string())),
    };

    match session::establish(&session, &gateway, login.token).await? {
        Ok(identity) => {
            log::info!("u/{} logged in", identity.id);
            Ok(Redirect::to("/home").into_response())
        }
        Err(err) => Ok(render(&form, &errors, &err.to_string())),
    }
}
