use axum::{debug_handler, extract::State, response::{Html, IntoResponse, Redirect, Response}};
use serde_json::json;
use tower_sessions::Session;

use crate::gateway::Gateway;
use crate::models::Review;
use crate::{include_res, res, session, AppResult, AppState};

const REVIEWS: &str = r#"
query reviews {
  reviews {
    data {
      id comment rate
      idJob { id jobName }
      idUser { id username email }
    }
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

    let reviews = match gateway
        .call::<Vec<Review>>(token.as_deref(), "reviews", REVIEWS, json!({}))
        .await
        .and_then(|p| p.required())
    {
        Ok(reviews) => reviews,
        Err(err) => return Ok(res::notice("Reviews", &err.to_string(), "/home")),
    };

    let items = if reviews.is_empty() {
        include_res!(str, "/pages/reviews/reviews_empty.html").to_string()
    } else {
        let mut items = String::new();
        for review in &reviews {
            items += &include_res!(str, "/pages/reviews/review_card.html")
                .replace(
                    "{job_name}",
                    &res::escape(
                        review.id_job.as_ref().map(|j| j.job_name.as_str()).unwrap_or("-"),
                    ),
                )
                .replace("{comment}", &res::escape(&review.comment))
                .replace("{stars}", &res::stars(review.rate as f64))
                .replace(
                    "{username}",
                    &res::escape(
                        review.id_user.as_ref().map(|u| u.username.as_str()).unwrap_or("anonymous"),
                    ),
                );
        }
        items
    };

    Ok(Html(
        include_res!(str, "/pages/reviews/reviews.html").replace("{review_items}", &items),
    )
    .into_response())
}
