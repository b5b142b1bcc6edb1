use axum::{debug_handler, extract::State, response::{Html, IntoResponse, Response}, Form};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::gateway::Gateway;
use crate::{include_res, res, validate, AppResult, AppState};

const REGISTER: &str = r#"
mutation register($username: String!, $email: String!, $password: String!,
                  $phone: Int!, $address: String!, $isProfessional: Boolean) {
  register(registerInput: {
    username: $username, email: $email, password: $password,
    phone: $phone, address: $address, isProfessional: $isProfessional
  }) {
    data
    message
    success
  }
}"#;

const FIELDS: &[&str] = &["username", "email", "password", "phone", "address"];

#[derive(Debug, Deserialize)]
pub(crate) struct RegisterForm {
    pub(crate) username: String,
    pub(crate) email: String,
    pub(crate) password: String,
    pub(crate) phone: String,
    pub(crate) address: String,
    // checkbox: present when ticked
    pub(crate) is_professional: Option<String>,
}

fn render(form: &RegisterForm, errors: &validate::Errors, flash: &str) -> Response {
    let page = include_res!(str, "/pages/register.html")
        .replace("{username}", &res::escape(&form.username))
        .replace("{email}", &res::escape(&form.email))
        .replace("{phone}", &res::escape(&form.phone))
        .replace("{address}", &res::escape(&form.address))
        .replace(
            "{is_professional}",
            if form.is_professional.is_some() { "checked" } else { "" },
        )
        .replace("{flash}", &res::escape(flash));
    Html(errors.apply(page, FIELDS)).into_response()
}

fn empty_form() -> RegisterForm {
    RegisterForm {
        username: String::new(),
        email: String::new(),
        password: String::new(),
        phone: String::new(),
        address: String::new(),
        is_professional: None,
    }
}

#[debug_handler]
pub(crate) async fn page() -> Response {
    render(&empty_form(), &validate::Errors::default(), "")
}

#[debug_handler(state = AppState)]
pub(crate) async fn submit(
    State(gateway): State<Gateway>,
    Form(form): Form<RegisterForm>,
) -> AppResult<Response> {
    let mut errors = validate::Errors::default();
    errors.check("username", validate::name("username", &form.username));
    errors.check("email", validate::email(&form.email));
    errors.check("password", validate::password(&form.password));
    let phone = match validate::phone(&form.phone) {
        Ok(phone) => Some(phone),
        Err(err) => {
            errors.add("phone", err);
            None
        }
    };
    errors.check("address", validate::name("address", &form.address));
    if !errors.is_empty() {
        return Ok(render(&form, &errors, ""));
    }

    let result = gateway
        .call::<Value>(
            None,
            "register",
            REGISTER,
            json!({
                "username": form.username,
                "email": form.email,
                "password": form.password,
                "phone": phone,
                "address": form.address,
                "isProfessional": form.is_professional.is_some(),
            }),
        )
        .await;

    match result {
        Ok(payload) => {
            log::info!("registered {}", form.email);
            Ok(res::notice("Registered", payload.message(), "/login"))
        }
        Err(err) => Ok(render(&form, &errors, &err.to_string())),
    }
}
