use axum::{debug_handler, extract::State, response::{Html, IntoResponse, Redirect, Response}, Form};
use serde::Deserialize;
use serde_json::json;
use tower_sessions::Session;

use crate::gateway::Gateway;
use crate::models::{Job, Review};
use crate::{include_res, res, session, validate, AppResult, AppState};

const JOBS: &str = r#"
query jobs {
  jobs {
    data { id jobName }
    message
    success
  }
}"#;

const EXIST_REVIEW: &str = r#"
query existReview($idJob: Int!, $idUser: Int!) {
  existReview(idJob: $idJob, idUser: $idUser) {
    data
    message
    success
  }
}"#;

const CREATE_REVIEW: &str = r#"
mutation createReview($comment: String!, $rate: Int!, $idJob: Int!, $idUser: Int!) {
  createReview(createReviewInput: {
    comment: $comment, rate: $rate, idJob: $idJob, idUser: $idUser
  }) {
    data {
      id comment rate
      idJob { id jobName }
      idUser { id username email }
    }
    message
    success
  }
}"#;

const FIELDS: &[&str] = &["comment", "rate", "job"];

#[derive(Debug, Deserialize)]
pub(crate) struct ReviewForm {
    pub(crate) comment: String,
    pub(crate) rate: String,
    pub(crate) job: String,
}

async fn render(
    gateway: &Gateway,
    token: Option<&str>,
    form: &ReviewForm,
    errors: &validate::Errors,
    flash: &str,
) -> String {
    let jobs = gateway
        .call::<Vec<Job>>(token, "jobs", JOBS, json!({}))
        .await
        .and_then(|p| p.required())
        .unwrap_or_default();
    let mut options = String::new();
    for job in &jobs {
        options += &include_res!(str, "/pages/reviews/job_option.html")
            .replace("{id}", &job.id.to_string())
            .replace("{job_name}", &res::escape(&job.job_name));
    }

    let page = include_res!(str, "/pages/reviews/create_review.html")
        .replace("{comment}", &res::escape(&form.comment))
        .replace("{rate}", &res::escape(&form.rate))
        .replace("{job_options}", &options)
        .replace("{flash}", &res::escape(flash));
    errors.apply(page, FIELDS)
}

#[debug_handler(state = AppState)]
pub(crate) async fn page(
    State(gateway): State<Gateway>,
    session: Session,
) -> AppResult<Response> {
    if session::current_user(&session, &gateway).await?.is_none() {
        return Ok(Redirect::to("/login").into_response());
    }
    let token = session::token(&session).await?;

    let form = ReviewForm {
        comment: String::new(),
        rate: String::new(),
        job: String::new(),
    };
    let body = render(&gateway, token.as_deref(), &form, &validate::Errors::default(), "").await;
    Ok(Html(body).into_response())
}

#[debug_handler(state = AppState)]
pub(crate) async fn submit(
    State(gateway): State<Gateway>,
    session: Session,
    Form(form): Form<ReviewForm>,
) -> AppResult<Response> {
    let Some(user) = session::current_user(&session, &gateway).await? else {
        return Ok(Redirect::to("/login").into_response());
    };
    let token = session::token(&session).await?;
    let token = token.as_deref();

    // rate and comment never reach the network out of bounds
    let mut errors = validate::Errors::default();
    errors.check("comment", validate::non_blank("comment", &form.comment));
    let rate: Option<i64> = match form.rate.trim().parse() {
        Ok(rate) => {
            errors.check("rate", validate::rate(rate));
            Some(rate)
        }
        Err(_) => {
            errors.add("rate", "rate must be a whole number between 0 and 5");
            None
        }
    };
    let job_id: Option<i64> = match form.job.parse() {
        Ok(id) => Some(id),
        Err(_) => {
            errors.add("job", "pick a service to review");
            None
        }
    };
    if !errors.is_empty() {
        return Ok(Html(render(&gateway, token, &form, &errors, "").await).into_response());
    }
    let (rate, job_id) = (rate.unwrap_or_default(), job_id.unwrap_or_default());

    // one review per (job, user)
    let exists = gateway
        .call::<bool>(
            token,
            "existReview",
            EXIST_REVIEW,
            json!({ "idJob": job_id, "idUser": user.id }),
        )
        .await;
    match exists {
        Ok(payload) if payload.data == Some(true) => {
            let mut errors = validate::Errors::default();
            errors.add("job", "you have already reviewed this service");
            return Ok(Html(render(&gateway, token, &form, &errors, "").await).into_response());
        }
        Ok(_) => {}
        Err(err) => {
            return Ok(Html(render(&gateway, token, &form, &errors, &err.to_string()).await)
                .into_response());
        }
    }

    let result = gateway
        .call::<Review>(
            token,
            "createReview",
            CREATE_REVIEW,
            json!({
                "comment": form.comment.trim(),
                "rate": rate,
                "idJob": job_id,
                "idUser": user.id,
            }),
        )
        .await;
    match result {
        Ok(payload) => {
            log::info!("review created for job {job_id} by u/{}", user.id);
            Ok(res::notice("Review submitted", payload.message(), "/review"))
        }
        Err(err) => {
            Ok(Html(render(&gateway, token, &form, &errors, &err.to_string()).await)
                .into_response())
        }
    }
}
