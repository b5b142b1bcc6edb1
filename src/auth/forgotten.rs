use axum::{debug_handler, extract::State, response::{Html, IntoResponse, Response}, Form};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::gateway::Gateway;
use crate::{include_res, res, validate, AppResult, AppState};

const REQUEST_PASSWORD_RESET: &str = r#"
mutation requestPasswordReset($email: String!) {
  requestPasswordReset(email: $email) {
    data
    message
    success
  }
}"#;

const RESET_PASSWORD: &str = r#"
mutation resetPassword($email: String!, $resetPasswordToken: String!, $password: String!) {
  resetPassword(resetPasswordInput: {
    email: $email, resetPasswordToken: $resetPasswordToken, password: $password
  }) {
    data
    message
    success
  }
}"#;

fn render(flash: &str) -> Response {
    Html(
        include_res!(str, "/pages/forgotten.html").replace("{flash}", &res::escape(flash)),
    )
    .into_response()
}

#[debug_handler]
pub(crate) async fn page() -> Response {
    render("")
}

#[derive(Debug, Deserialize)]
pub(crate) struct RequestForm {
    pub(crate) email: String,
}

#[debug_handler(state = AppState)]
pub(crate) async fn request(
    State(gateway): State<Gateway>,
    Form(RequestForm { email }): Form<RequestForm>,
) -> AppResult<Response> {
    if let Err(err) = validate::email(&email) {
        return Ok(render(&err));
    }

    let result = gateway
        .call::<Value>(
            None,
            "requestPasswordReset",
            REQUEST_PASSWORD_RESET,
            json!({ "email": email }),
        )
        .await;
    match result {
        Ok(payload) => Ok(render(payload.message())),
        Err(err) => Ok(render(&err.to_string())),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResetForm {
    pub(crate) email: String,
    pub(crate) reset_token: String,
    pub(crate) password: String,
}

#[debug_handler(state = AppState)]
pub(crate) async fn reset(
    State(gateway): State<Gateway>,
    Form(ResetForm { email, reset_token, password }): Form<ResetForm>,
) -> AppResult<Response> {
    if let Err(err) = validate::email(&email) {
        return Ok(render(&err));
    }
    if let Err(err) = validate::password(&password) {
        return Ok(render(&err));
    }
    if let Err(err) = validate::non_blank("reset code", &reset_token) {
        return Ok(render(&err));
    }

    let result = gateway
        .call::<Value>(
            None,
            "resetPassword",
            RESET_PASSWORD,
            json!({ "email": email, "resetPasswordToken": reset_token, "password": password }),
        )
        .await;
    match result {
        Ok(payload) => Ok(res::notice("Password reset", payload.message(), "/login")),
        Err(err) => Ok(render(&err.to_string())),
    }
}
