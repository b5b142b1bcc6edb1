use axum::{debug_handler, extract::State, response::{Html, IntoResponse, Redirect, Response}, Form};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_sessions::Session;

use crate::gateway::Gateway;
use crate::models::Category;
use crate::session::Identity;
use crate::{include_res, res, session, validate, AppResult, AppState};

const CATEGORIES: &str = r#"
query categories {
  categories {
    data { id categoryName }
    message
    success
  }
}"#;

const CREATE_CATEGORY: &str = r#"
mutation createCategory($name: String!) {
  createCategory(createCategoryInput: { name: $name }) {
    data { id categoryName }
    message
    success
  }
}"#;

const CREATE_JOB: &str = r#"
mutation createJob($jobName: String!, $description: String!, $price: Float!,
                   $idCategory: Int!, $idProfessional: Int!) {
  createJob(createJobInput: {
    jobName: $jobName, description: $description, price: $price,
    idCategory: $idCategory, idProfessional: $idProfessional
  }) {
    data
    message
    success
  }
}"#;

const FIELDS: &[&str] = &["job_name", "description", "price", "category"];

#[derive(Debug, Deserialize)]
pub(crate) struct CreateJobForm {
    pub(crate) job_name: String,
    pub(crate) description: String,
    pub(crate) price: String,
    pub(crate) category: String,
}

async fn professional(
    session: &Session,
    gateway: &Gateway,
) -> AppResult<Result<Identity, Response>> {
    let Some(user) = session::current_user(session, gateway).await? else {
        return Ok(Err(Redirect::to("/login").into_response()));
    };
    if !user.is_professional {
        // the listing creation screen only exists for professionals
        return Ok(Err(Redirect::to("/services").into_response()));
    }
    Ok(Ok(user))
}

async fn render(
    gateway: &Gateway,
    token: Option<&str>,
    form: &CreateJobForm,
    errors: &validate::Errors,
    flash: &str,
) -> String {
    let categories = gateway
        .call::<Vec<Category>>(token, "categories", CATEGORIES, json!({}))
        .await
        .and_then(|p| p.required())
        .unwrap_or_default();
    let mut options = String::new();
    for category in &categories {
        options += &include_res!(str, "/pages/jobs/category_option.html")
            .replace("{name}", &res::escape(&category.category_name));
    }

    let page = include_res!(str, "/pages/jobs/create_job.html")
        .replace("{job_name}", &res::escape(&form.job_name))
        .replace("{description}", &res::escape(&form.description))
        .replace("{price}", &res::escape(&form.price))
        .replace("{category}", &res::escape(&form.category))
        .replace("{category_options}", &options)
        .replace("{flash}", &res::escape(flash));
    errors.apply(page, FIELDS)
}

#[debug_handler(state = AppState)]
pub(crate) async fn page(
    State(gateway): State<Gateway>,
    session: Session,
) -> AppResult<Response> {
    if let Err(response) = professional(&session, &gateway).await? {
        return Ok(response);
    }
    let token = session::token(&session).await?;

    let form = CreateJobForm {
        job_name: String::new(),
        description: String::new(),
        price: String::new(),
        category: String::new(),
    };
    let body = render(&gateway, token.as_deref(), &form, &validate::Errors::default(), "").await;
    Ok(Html(body).into_response())
}

#[debug_handler(state = AppState)]
pub(crate) async fn submit(
    State(gateway): State<Gateway>,
    session: Session,
    Form(form): Form<CreateJobForm>,
) -> AppResult<Response> {
    let user = match professional(&session, &gateway).await? {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let token = session::token(&session).await?;
    let token = token.as_deref();

    let mut errors = validate::Errors::default();
    errors.check("job_name", validate::name("service name", &form.job_name));
    errors.check("description", validate::non_blank("description", &form.description));
    errors.check("category", validate::non_blank("category", &form.category));
    let price: Option<f64> = match form.price.trim().parse() {
        Ok(price) if price >= 0.0 => Some(price),
        _ => {
            errors.add("price", "price must be a non-negative number");
            None
        }
    };
    if !errors.is_empty() {
        return Ok(Html(render(&gateway, token, &form, &errors, "").await).into_response());
    }

    // the category is created ad hoc when no existing one matches
    let category_id = match resolve_category(&gateway, token, form.category.trim()).await {
        Ok(id) => id,
        Err(err) => {
            return Ok(Html(render(&gateway, token, &form, &errors, &err.to_string()).await)
                .into_response());
        }
    };

    let result = gateway
        .call::<Value>(
            token,
            "createJob",
            CREATE_JOB,
            json!({
                "jobName": form.job_name.trim(),
                "description": form.description,
                "price": price,
                "idCategory": category_id,
                "idProfessional": user.id,
            }),
        )
        .await;
    match result {
        Ok(payload) => {
            log::info!("job {:?} created by u/{}", form.job_name, user.id);
            Ok(res::notice("Service created", payload.message(), "/services"))
        }
        Err(err) => {
            Ok(Html(render(&gateway, token, &form, &errors, &err.to_string()).await)
                .into_response())
        }
    }
}

async fn resolve_category(
    gateway: &Gateway,
    token: Option<&str>,
    name: &str,
) -> Result<i64, crate::gateway::GatewayError> {
    let categories = gateway
        .call::<Vec<Category>>(token, "categories", CATEGORIES, json!({}))
        .await?
        .required()?;
    if let Some(category) = categories
        .iter()
        .find(|c| c.category_name.eq_ignore_ascii_case(name))
    {
        return Ok(category.id);
    }

    let created = gateway
        .call::<Category>(token, "createCategory", CREATE_CATEGORY, json!({ "name": name }))
        .await?
        .required()?;
    Ok(created.id)
}
