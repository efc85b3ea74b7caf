//! Preventive maintenance calendar endpoints

use axum::{extract::State, Json};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppResult, models::request::CalendarEvent};

use super::AuthenticatedUser;

const EVENTS_URL: &str = "/calendar/events/";

#[derive(Serialize, ToSchema)]
pub struct CalendarShell {
    /// Where the calendar fetches its events
    pub events_url: String,
    pub today: NaiveDate,
    /// Form used when a day is clicked, with `?date=YYYY-MM-DD`
    pub new_request_url: String,
}

/// Calendar page data
#[utoipa::path(
    get,
    path = "/calendar/",
    tag = "calendar",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Calendar shell", body = CalendarShell)
    )
)]
pub async fn calendar(AuthenticatedUser(_claims): AuthenticatedUser) -> Json<CalendarShell> {
    Json(CalendarShell {
        events_url: EVENTS_URL.to_string(),
        today: Local::now().date_naive(),
        new_request_url: "/requests/new/".to_string(),
    })
}

/// Scheduled preventive requests as calendar events
#[utoipa::path(
    get,
    path = "/calendar/events/",
    tag = "calendar",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Calendar events", body = Vec<CalendarEvent>)
    )
)]
pub async fn events(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<CalendarEvent>>> {
    let events = state.services.requests.calendar_events().await?;
    Ok(Json(events))
}
