//! User listing endpoint

use axum::{
    extract::{Query, State},
    Json,
};

use crate::{
    error::AppResult,
    models::user::{UserQuery, UserShort},
};

use super::AuthenticatedUser;

/// List users, optionally by role
#[utoipa::path(
    get,
    path = "/users/",
    tag = "users",
    security(("bearer_auth" = [])),
    params(UserQuery),
    responses(
        (status = 200, description = "List of users", body = Vec<UserShort>),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Manager role required")
    )
)]
pub async fn list_users(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<UserQuery>,
) -> AppResult<Json<Vec<UserShort>>> {
    claims.require_manager()?;

    let users = state.services.users.list(&query).await?;
    Ok(Json(users))
}
