use axum::{debug_handler, extract::State, response::{Html, IntoResponse, Redirect, Response}};
use serde_json::json;
use tower_sessions::Session;

use crate::gateway::Gateway;
use crate::models::Meet;
use crate::{include_res, res, session, AppResult, AppState};

const GET_USER_MEETS: &str = r#"
query getUserMeets {
  getUserMeets {
    data {
      id
      idJob {
        id jobName description averageRate requestsCount
        idCategory { id categoryName }
        idProfessional { id username email }
      }
      idUser { id username email }
      meetDate startTime endTime isDone
    }
    message
    success
  }
}"#;

const TOTAL_SALES: &str = r#"
query totalSalesGenerated {
  totalSalesGenerated { data message success }
}"#;

const TOTAL_SALES_MONTH: &str = r#"
query totalSalesMonth {
  totalSalesMonth { data message success }
}"#;

#[debug_handler(state = AppState)]
pub(crate) async fn user_meets(
    State(gateway): State<Gateway>,
    session: Session,
) -> AppResult<Response> {
    if session::current_user(&session, &gateway).await?.is_none() {
        return Ok(Redirect::to("/login").into_response());
    }
    let token = session::token(&session).await?;

    let meets = match fetch_meets(&gateway, token.as_deref()).await {
        Ok(meets) => meets,
        Err(err) => return Ok(res::notice("My meetings", &err.to_string(), "/home")),
    };

    Ok(Html(
        include_res!(str, "/pages/meets/user_meets.html")
            .replace("{meet_items}", &render_meets(&meets, false)),
    )
    .into_response())
}

#[debug_handler(state = AppState)]
pub(crate) async fn prof_meets(
    State(gateway): State<Gateway>,
    session: Session,
) -> AppResult<Response> {
    let Some(user) = session::current_user(&session, &gateway).await? else {
        return Ok(Redirect::to("/login").into_response());
    };
    if !user.is_professional {
        return Ok(Redirect::to("/userMeets").into_response());
    }
    let token = session::token(&session).await?;
    let token = token.as_deref();

    let meets = match fetch_meets(&gateway, token).await {
        Ok(meets) => meets,
        Err(err) => return Ok(res::notice("Professional meetings", &err.to_string(), "/home")),
    };

    let total_sales = fetch_sales(&gateway, token, "totalSalesGenerated", TOTAL_SALES).await;
    let month_sales = fetch_sales(&gateway, token, "totalSalesMonth", TOTAL_SALES_MONTH).await;

    Ok(Html(
        include_res!(str, "/pages/meets/prof_meets.html")
            .replace("{total_sales}", &total_sales)
            .replace("{month_sales}", &month_sales)
            .replace("{meet_items}", &render_meets(&meets, true)),
    )
    .into_response())
}

async fn fetch_meets(
    gateway: &Gateway,
    token: Option<&str>,
) -> Result<Vec<Meet>, crate::gateway::GatewayError> {
    gateway
        .call::<Vec<Meet>>(token, "getUserMeets", GET_USER_MEETS, json!({}))
        .await?
        .required()
}

async fn fetch_sales(gateway: &Gateway, token: Option<&str>, op: &str, query: &str) -> String {
    match gateway.call::<f64>(token, op, query, json!({})).await {
        Ok(payload) => payload.data.unwrap_or(0.0).to_string(),
        Err(err) => {
            log::warn!("{op} failed: {err}");
            "-".to_string()
        }
    }
}

fn render_meets(meets: &[Meet], professional_view: bool) -> String {
    if meets.is_empty() {
        return include_res!(str, "/pages/meets/meets_empty.html").to_string();
    }

    let mut items = String::new();
    for meet in meets {
        items += &render_meet(meet, professional_view);
    }
    items
}

fn render_meet(meet: &Meet, professional_view: bool) -> String {
    // the finish control exists only on the professional view and only
    // while the meeting is not done; once isDone there is no way back
    let finish = if professional_view && !meet.is_done {
        include_res!(str, "/pages/meets/finish_form.html").replace("{id}", &meet.id.to_string())
    } else {
        String::new()
    };
    let remove = if professional_view {
        include_res!(str, "/pages/meets/remove_job_form.html")
            .replace("{job_id}", &meet.id_job.id.to_string())
    } else {
        String::new()
    };

    include_res!(str, "/pages/meets/meet_item.html")
        .replace("{job_name}", &res::escape(&meet.id_job.job_name))
        .replace("{description}", &res::escape(&meet.id_job.description))
        .replace("{stars}", &res::stars(meet.id_job.average_rate))
        .replace(
            "{category}",
            &res::escape(
                meet.id_job
                    .id_category
                    .as_ref()
                    .map(|c| c.category_name.as_str())
                    .unwrap_or("-"),
            ),
        )
        .replace(
            "{professional}",
            &res::escape(
                meet.id_job
                    .id_professional
                    .as_ref()
                    .map(|p| p.username.as_str())
                    .unwrap_or("?"),
            ),
        )
        .replace("{meet_date}", &res::escape(&meet.meet_date))
        .replace("{start_time}", &res::escape(&meet.start_time))
        .replace("{end_time}", &res::escape(&meet.end_time))
        .replace("{state}", if meet.is_done { "finished" } else { "scheduled" })
        .replace("{finish_form}", &finish)
        .replace("{remove_job_form}", &remove)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Job;

    fn meet(is_done: bool) -> Meet {
        Meet {
            id: 3,
            id_job: Job {
                id: 7,
                job_name: "Plumbing".to_string(),
                description: "pipes".to_string(),
                price: Some(30.0),
                average_rate: 4.0,
                id_category: None,
                id_professional: None,
                requests_count: 1,
            },
            id_user: None,
            meet_date: "2024-05-10".to_string(),
            start_time: "09:00:00".to_string(),
            end_time: "09:45:00".to_string(),
            is_done,
        }
    }

    #[test]
    fn finish_control_only_while_scheduled() {
        let scheduled = render_meet(&meet(false), true);
        assert!(scheduled.contains("/meets/3/finish"));
        assert!(scheduled.contains("scheduled"));

        // once done the control is absent, so a finished meeting can never
        // be re-submitted from the page
        let done = render_meet(&meet(true), true);
        assert!(!done.contains("/meets/3/finish"));
        assert!(done.contains("finished"));
    }

    #[test]
    fn user_view_never_offers_finish() {
        let page = render_meet(&meet(false), false);
        assert!(!page.contains("/meets/3/finish"));
    }
}
