use axum::{debug_handler, extract::{Path, State}, response::{Html, IntoResponse, Redirect, Response}};
use serde_json::{json, Value};
use tower_sessions::Session;

use crate::gateway::Gateway;
use crate::models::Job;
use crate::{include_res, res, session, AppResult, AppState};

const JOBS: &str = r#"
query jobs {
  jobs {
    data {
      id jobName description price averageRate requestsCount
      idCategory { id categoryName }
      idProfessional { id username email }
    }
    message
    success
  }
}"#;

const REMOVE_JOB: &str = r#"
mutation removeJob($id: Int!) {
  removeJob(id: $id) {
    message
    success
  }
}"#;

#[debug_handler(state = AppState)]
pub(crate) async fn page(
    State(gateway): State<Gateway>,
    session: Session,
) -> AppResult<Response> {
    if session::current_user(&session, &gateway).await?.is_none() {
        return Ok(Redirect::to("/login").into_response());
    }
    let token = session::token(&session).await?;

    let jobs = match gateway
        .call::<Vec<Job>>(token.as_deref(), "jobs", JOBS, json!({}))
        .await
        .and_then(|p| p.required())
    {
        Ok(jobs) => jobs,
        Err(err) => return Ok(res::notice("Services", &err.to_string(), "/home")),
    };

    let items = if jobs.is_empty() {
        include_res!(str, "/pages/jobs/services_empty.html").to_string()
    } else {
        let mut items = String::new();
        for job in &jobs {
            items += &render_item(job);
        }
        items
    };

    Ok(Html(
        include_res!(str, "/pages/jobs/services.html").replace("{service_items}", &items),
    )
    .into_response())
}

fn render_item(job: &Job) -> String {
    include_res!(str, "/pages/jobs/service_item.html")
        .replace("{id}", &job.id.to_string())
        .replace("{job_name}", &res::escape(&job.job_name))
        .replace("{price}", &job.price.map(|p| p.to_string()).unwrap_or_default())
        .replace("{stars}", &res::stars(job.average_rate))
        .replace(
            "{category}",
            &res::escape(
                job.id_category.as_ref().map(|c| c.category_name.as_str()).unwrap_or("-"),
            ),
        )
        .replace(
            "{professional}",
            &res::escape(
                job.id_professional.as_ref().map(|p| p.username.as_str()).unwrap_or("?"),
            ),
        )
        .replace("{description}", &res::markdown(&job.description))
        .replace("{requests_count}", &job.requests_count.to_string())
}

#[debug_handler(state = AppState)]
pub(crate) async fn remove(
    Path(job_id): Path<i64>,
    State(gateway): State<Gateway>,
    session: Session,
) -> AppResult<Response> {
    let Some(user) = session::current_user(&session, &gateway).await? else {
        return Ok(Redirect::to("/login").into_response());
    };
    if !user.is_professional {
        return Ok(Redirect::to("/services").into_response());
    }
    let token = session::token(&session).await?;

    let result = gateway
        .call::<Value>(token.as_deref(), "removeJob", REMOVE_JOB, json!({ "id": job_id }))
        .await;
    match result {
        Ok(_) => {
            log::info!("job {job_id} removed by u/{}", user.id);
            Ok(Redirect::to("/profMeets").into_response())
        }
        Err(err) => Ok(res::notice("Remove service", &err.to_string(), "/profMeets")),
    }
}
