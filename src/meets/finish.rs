use axum::{debug_handler, extract::{Path, State}, response::{IntoResponse, Redirect, Response}};
use serde_json::json;
use tower_sessions::Session;

use crate::gateway::Gateway;
use crate::models::Meet;
use crate::{res, session, AppResult, AppState};

const FINISH_MEET: &str = r#"
mutation finishMeet($idMeet: Int!) {
  finishMeet(idMeet: $idMeet) {
    data {
      id
      idJob { id jobName }
      idUser { id username }
      meetDate startTime endTime isDone
    }
    message
    success
  }
}"#;

/// `scheduled -> done`, one way. Redirects back to the list, which re-fetches.
#[debug_handler(state = AppState)]
pub(crate) async fn finish(
    Path(meet_id): Path<i64>,
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

    let result = gateway
        .call::<Meet>(token.as_deref(), "finishMeet", FINISH_MEET, json!({ "idMeet": meet_id }))
        .await;
    match result {
        Ok(_) => {
            log::info!("meet {meet_id} finished by u/{}", user.id);
            Ok(Redirect::to("/profMeets").into_response())
        }
        Err(err) => Ok(res::notice("Finish meeting", &err.to_string(), "/profMeets")),
    }
}
