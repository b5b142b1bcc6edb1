use axum::{debug_handler, extract::{Path, Query, State}, response::{Html, IntoResponse, Redirect, Response}};
use serde::Deserialize;
use serde_json::json;
use tower_sessions::Session;

use crate::gateway::Gateway;
use crate::models::{Job, Review};
use crate::{include_res, res, session, AppResult, AppState};

use super::timeslot::Slot;

const JOB_BY_ID: &str = r#"
query jobById($id: Int!) {
  jobById(id: $id) {
    data {
      id jobName description price averageRate requestsCount
      idCategory { id categoryName }
      idProfessional { id username email }
    }
    message
    success
  }
}"#;

const AVAILABLE_SLOTS: &str = r#"
query availableSlots($idProfessional: Int!, $date: String!) {
  availableSlots(idProfessional: $idProfessional, date: $date) {
    data
    message
    success
  }
}"#;

const REVIEWS_BY_JOB: &str = r#"
query getReviewsByJob($idJob: Int!) {
  getReviewsByJob(idJob: $idJob) {
    data { id comment rate idUser { id username email } }
    message
    success
  }
}"#;

#[derive(Deserialize)]
pub(crate) struct SlotsQuery {
    pub(crate) date: Option<String>,
}

#[debug_handler(state = AppState)]
pub(crate) async fn slots_page(
    Path(job_id): Path<i64>,
    Query(SlotsQuery { date }): Query<SlotsQuery>,
    State(gateway): State<Gateway>,
    session: Session,
) -> AppResult<Response> {
    if session::current_user(&session, &gateway).await?.is_none() {
        return Ok(Redirect::to("/login").into_response());
    }
    let token = session::token(&session).await?;
    let token = token.as_deref();

    let job: Job = match gateway
        .call(token, "jobById", JOB_BY_ID, json!({ "id": job_id }))
        .await
        .and_then(|p| p.required())
    {
        Ok(job) => job,
        Err(err) => return Ok(res::notice("Service", &err.to_string(), "/services")),
    };
    let professional = job.id_professional.as_ref().map(|p| p.id).unwrap_or(0);

    // step 1: the backend owns slot computation, this screen only renders
    // the returned set — empty and failed are distinct states
    let slots_html = match &date {
        None => include_res!(str, "/pages/booking/pick_date.html").to_string(),
        Some(date) => {
            let result = gateway
                .call::<Vec<String>>(
                    token,
                    "availableSlots",
                    AVAILABLE_SLOTS,
                    json!({ "idProfessional": professional, "date": date }),
                )
                .await
                .and_then(|p| p.required());
            match result {
                Ok(slots) => render_slots(&slots),
                Err(err) => include_res!(str, "/pages/booking/slots_failed.html")
                    .replace("{message}", &res::escape(&err.to_string())),
            }
        }
    };

    let reviews = gateway
        .call::<Vec<Review>>(token, "getReviewsByJob", REVIEWS_BY_JOB, json!({ "idJob": job_id }))
        .await
        .and_then(|p| p.required())
        .unwrap_or_default();
    let mut review_items = String::new();
    for review in &reviews {
        review_items += &include_res!(str, "/pages/reviews/review_item.html")
            .replace("{comment}", &res::escape(&review.comment))
            .replace("{stars}", &res::stars(review.rate as f64))
            .replace(
                "{username}",
                &res::escape(
                    review.id_user.as_ref().map(|u| u.username.as_str()).unwrap_or("anonymous"),
                ),
            );
    }

    let form_token = session::issue_form_token(&session).await?;

    let body = include_res!(str, "/pages/booking/job_detail.html")
        .replace("{job_id}", &job.id.to_string())
        .replace("{job_name}", &res::escape(&job.job_name))
        .replace("{description}", &res::markdown(&job.description))
        .replace("{price}", &job.price.map(|p| p.to_string()).unwrap_or_default())
        .replace("{stars}", &res::stars(job.average_rate))
        .replace(
            "{professional}",
            &res::escape(
                job.id_professional.as_ref().map(|p| p.username.as_str()).unwrap_or("?"),
            ),
        )
        .replace("{date}", &res::escape(date.as_deref().unwrap_or("")))
        .replace("{slots}", &slots_html)
        .replace("{review_items}", &review_items)
        .replace("{request_token}", &form_token.to_string());

    Ok(Html(body).into_response())
}

fn render_slots(slots: &[String]) -> String {
    if slots.is_empty() {
        return include_res!(str, "/pages/booking/slots_empty.html").to_string();
    }

    let mut items = String::new();
    for raw in slots {
        // a slot the backend sent but we cannot parse is dropped, not guessed at
        let Ok(slot) = raw.parse::<Slot>() else {
            log::warn!("dropping malformed slot {raw:?}");
            continue;
        };
        items += &include_res!(str, "/pages/booking/slot_item.html")
            .replace("{start}", &slot.to_string());
    }
    if items.is_empty() {
        return include_res!(str, "/pages/booking/slots_empty.html").to_string();
    }
    items
}
