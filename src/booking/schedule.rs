use axum::{debug_handler, extract::{Path, State}, response::{IntoResponse, Redirect, Response}, Form};
use serde::Deserialize;
use serde_json::json;
use tower_sessions::Session;
use uuid::Uuid;

use crate::gateway::Gateway;
use crate::models::Meet;
use crate::{res, session, AppResult, AppState};

use super::timeslot::{end_of, Slot};

const CREATE_MEET: &str = r#"
mutation createMeet($idJob: Int!, $meetDate: String!, $startTime: String!, $endTime: String!) {
  createMeet(createMeetInput: {
    idJob: $idJob, meetDate: $meetDate, startTime: $startTime, endTime: $endTime
  }) {
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

#[derive(Deserialize)]
pub(crate) struct BookForm {
    pub(crate) date: String,
    pub(crate) start: String,
    pub(crate) request_token: Uuid,
}

#[debug_handler(state = AppState)]
pub(crate) async fn book(
    Path(job_id): Path<i64>,
    State(gateway): State<Gateway>,
    session: Session,
    Form(BookForm { date, start, request_token }): Form<BookForm>,
) -> AppResult<Response> {
    if session::current_user(&session, &gateway).await?.is_none() {
        return Ok(Redirect::to("/login").into_response());
    }
    let token = session::token(&session).await?;

    let back = format!("/services/{job_id}/slots");

    if let Err(err) = parse_date(&date) {
        return Ok(res::notice("Booking", &err, &back));
    }
    let start: Slot = match start.parse() {
        Ok(slot) => slot,
        Err(_) => {
            return Ok(res::notice("Booking", "pick one of the offered start times", &back));
        }
    };

    // one-shot token: a duplicate submit of the same form never issues a
    // second createMeet
    if !session::take_form_token(&session, request_token).await? {
        return Ok(res::notice("Booking", "this booking was already submitted", &back));
    }

    let end = end_of(start);
    let result = gateway
        .call::<Meet>(
            token.as_deref(),
            "createMeet",
            CREATE_MEET,
            json!({
                "idJob": job_id,
                "meetDate": date,
                "startTime": start.to_string(),
                "endTime": end.to_string(),
            }),
        )
        .await;

    match result {
        Ok(payload) => {
            let message = payload.message.as_deref().unwrap_or("meeting booked").to_string();
            let meet = payload.required()?;
            log::info!(
                "meet {} booked: job {job_id} on {} {}-{}",
                meet.id, meet.meet_date, meet.start_time, meet.end_time
            );
            Ok(res::notice("Booking confirmed", &message, "/userMeets"))
        }
        Err(err) => Ok(res::notice("Booking", &err.to_string(), &back)),
    }
}

fn parse_date(s: &str) -> Result<time::Date, String> {
    let invalid = || format!("invalid date {s:?}");

    let mut parts = s.split('-');
    let year: i32 = parts.next().and_then(|p| p.parse().ok()).ok_or_else(invalid)?;
    let month: u8 = parts.next().and_then(|p| p.parse().ok()).ok_or_else(invalid)?;
    let day: u8 = parts.next().and_then(|p| p.parse().ok()).ok_or_else(invalid)?;
    if parts.next().is_some() {
        return Err(invalid());
    }

    let month = time::Month::try_from(month).map_err(|_| invalid())?;
    time::Date::from_calendar_date(year, month, day).map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calendar_dates_parse() {
        assert!(parse_date("2024-05-10").is_ok());
        assert!(parse_date("2024-02-29").is_ok());
    }

    #[test]
    fn impossible_dates_are_rejected() {
        assert!(parse_date("2024-02-30").is_err());
        assert!(parse_date("2024-13-01").is_err());
        assert!(parse_date("2024-05").is_err());
        assert!(parse_date("2024-05-10-1").is_err());
        assert!(parse_date("next tuesday").is_err());
    }

    // the end-to-end payload of the booking flow: selecting 09:00:00 on an
    // offered day submits startTime=09:00:00, endTime=09:45:00
    #[test]
    fn booking_payload_from_selected_slot() {
        let offered = ["09:00:00", "09:45:00"];
        let start: Slot = offered[0].parse().unwrap();
        let end = end_of(start);
        assert_eq!(start.to_string(), "09:00:00");
        assert_eq!(end.to_string(), "09:45:00");
    }
}
