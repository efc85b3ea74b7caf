//! Kanban board endpoints

use axum::{
    extract::{rejection::FormRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{enums::RequestState, request::KanbanBoard},
};

use super::AuthenticatedUser;

#[derive(Debug, Deserialize, ToSchema)]
pub struct KanbanUpdateForm {
    /// One of new, in_progress, repaired, scrap
    #[serde(default)]
    pub state: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct KanbanUpdateResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl KanbanUpdateResponse {
    fn rejected(error: Option<&str>) -> Response {
        let body = Self {
            success: false,
            error: error.map(str::to_string),
        };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

/// Requests grouped by state
#[utoipa::path(
    get,
    path = "/kanban/",
    tag = "kanban",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Kanban board", body = KanbanBoard)
    )
)]
pub async fn board(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<KanbanBoard>> {
    let board = state.services.requests.kanban().await?;
    Ok(Json(board))
}

/// Move a request to another column
#[utoipa::path(
    post,
    path = "/kanban/update/{id}/",
    tag = "kanban",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Request ID")),
    request_body(content = KanbanUpdateForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "State changed", body = KanbanUpdateResponse),
        (status = 400, description = "Invalid state or method", body = KanbanUpdateResponse),
        (status = 422, description = "Equipment is scrapped", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_state(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    form: Result<Form<KanbanUpdateForm>, FormRejection>,
) -> AppResult<Response> {
    claims.require_technician()?;

    // A body that is not a form carries no state at all
    let submitted = form.ok().and_then(|Form(form)| form.state);
    let Some(new_state) = submitted.as_deref().and_then(|s| s.parse::<RequestState>().ok()) else {
        return Ok(KanbanUpdateResponse::rejected(Some("invalid state")));
    };

    state.services.requests.set_state(id, new_state).await?;
    tracing::info!(request_id = id, state = %new_state, user_id = claims.user_id, "Kanban move");

    Ok(Json(KanbanUpdateResponse {
        success: true,
        error: None,
    })
    .into_response())
}

/// Any method other than POST on the update endpoint
pub async fn method_not_allowed() -> Response {
    KanbanUpdateResponse::rejected(None)
}
