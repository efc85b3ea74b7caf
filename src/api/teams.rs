//! Maintenance team endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::team::{CreateTeam, MaintenanceTeam, TeamDetails, TeamQuery, TeamSummary, UpdateTeam},
};

use super::AuthenticatedUser;

/// List teams with their member count
#[utoipa::path(
    get,
    path = "/teams/",
    tag = "teams",
    security(("bearer_auth" = [])),
    params(TeamQuery),
    responses(
        (status = 200, description = "Team list", body = Vec<TeamSummary>)
    )
)]
pub async fn list_teams(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<TeamQuery>,
) -> AppResult<Json<Vec<TeamSummary>>> {
    let teams = state.services.teams.list(&query).await?;
    Ok(Json(teams))
}

/// Get a team with its members
#[utoipa::path(
    get,
    path = "/teams/{id}/",
    tag = "teams",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Team ID")),
    responses(
        (status = 200, description = "Team details", body = TeamDetails),
        (status = 404, description = "Team not found")
    )
)]
pub async fn get_team(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<TeamDetails>> {
    let team = state.services.teams.get_details(id).await?;
    Ok(Json(team))
}

/// Create a team
#[utoipa::path(
    post,
    path = "/teams/",
    tag = "teams",
    security(("bearer_auth" = [])),
    request_body = CreateTeam,
    responses(
        (status = 201, description = "Team created", body = MaintenanceTeam),
        (status = 409, description = "Team name already exists")
    )
)]
pub async fn create_team(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateTeam>,
) -> AppResult<(StatusCode, Json<MaintenanceTeam>)> {
    claims.require_manager()?;
    let team = state.services.teams.create(&data).await?;
    Ok((StatusCode::CREATED, Json(team)))
}

/// Rename a team or replace its members
#[utoipa::path(
    put,
    path = "/teams/{id}/",
    tag = "teams",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Team ID")),
    request_body = UpdateTeam,
    responses(
        (status = 200, description = "Team updated", body = MaintenanceTeam),
        (status = 404, description = "Team not found")
    )
)]
pub async fn update_team(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateTeam>,
) -> AppResult<Json<MaintenanceTeam>> {
    claims.require_manager()?;
    let team = state.services.teams.update(id, &data).await?;
    Ok(Json(team))
}

/// Delete a team together with its equipment
#[utoipa::path(
    delete,
    path = "/teams/{id}/",
    tag = "teams",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Team ID")),
    responses(
        (status = 204, description = "Team deleted"),
        (status = 404, description = "Team not found")
    )
)]
pub async fn delete_team(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_manager()?;
    state.services.teams.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
