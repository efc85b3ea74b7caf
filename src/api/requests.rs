//! Maintenance request endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::request::{
        CreateRequest, MaintenanceRequest, RequestDetails, RequestFormContext, RequestFormQuery, RequestListItem,
        RequestQuery, UpdateRequest,
    },
};

use super::AuthenticatedUser;

/// List requests
#[utoipa::path(
    get,
    path = "/requests/",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(RequestQuery),
    responses(
        (status = 200, description = "Request list", body = Vec<RequestListItem>)
    )
)]
pub async fn list_requests(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<RequestQuery>,
) -> AppResult<Json<Vec<RequestListItem>>> {
    let requests = state.services.requests.list(&query).await?;
    Ok(Json(requests))
}

/// Get a request with the technicians it can be assigned to
#[utoipa::path(
    get,
    path = "/requests/{id}/",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Request details", body = RequestDetails),
        (status = 404, description = "Request not found")
    )
)]
pub async fn get_request(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<RequestDetails>> {
    let details = state.services.requests.get_details(id).await?;
    Ok(Json(details))
}

/// Update state, technician or repair duration
#[utoipa::path(
    post,
    path = "/requests/{id}/",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Request ID")),
    request_body = UpdateRequest,
    responses(
        (status = 200, description = "Request updated", body = MaintenanceRequest),
        (status = 400, description = "Invalid state, duration or technician"),
        (status = 404, description = "Request or technician not found"),
        (status = 422, description = "Equipment is scrapped", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_request(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateRequest>,
) -> AppResult<Json<MaintenanceRequest>> {
    claims.require_technician()?;
    let request = state.services.requests.update(id, data).await?;
    Ok(Json(request))
}

/// Creation form context
#[utoipa::path(
    get,
    path = "/requests/new/",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(RequestFormQuery),
    responses(
        (status = 200, description = "Form context", body = RequestFormContext),
        (status = 400, description = "Invalid date")
    )
)]
pub async fn new_request_form(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<RequestFormQuery>,
) -> AppResult<Json<RequestFormContext>> {
    let context = state
        .services
        .requests
        .form_context(None, query.date.as_deref())
        .await?;
    Ok(Json(context))
}

/// Creation form context for a given equipment
#[utoipa::path(
    get,
    path = "/requests/new/{equipment_id}/",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(
        ("equipment_id" = i32, Path, description = "Equipment ID"),
        RequestFormQuery
    ),
    responses(
        (status = 200, description = "Form context", body = RequestFormContext),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn new_request_form_for_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(equipment_id): Path<i32>,
    Query(query): Query<RequestFormQuery>,
) -> AppResult<Json<RequestFormContext>> {
    let context = state
        .services
        .requests
        .form_context(Some(equipment_id), query.date.as_deref())
        .await?;
    Ok(Json(context))
}

/// File a new request
#[utoipa::path(
    post,
    path = "/requests/new/",
    tag = "requests",
    security(("bearer_auth" = [])),
    request_body = CreateRequest,
    responses(
        (status = 201, description = "Request created", body = MaintenanceRequest),
        (status = 400, description = "Invalid input"),
        (status = 422, description = "Equipment is scrapped", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_request(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateRequest>,
) -> AppResult<(StatusCode, Json<MaintenanceRequest>)> {
    let request = state
        .services
        .requests
        .create(data, None, claims.user_id)
        .await?;
    Ok((StatusCode::CREATED, Json(request)))
}

/// File a new request against the equipment in the URL
#[utoipa::path(
    post,
    path = "/requests/new/{equipment_id}/",
    tag = "requests",
    security(("bearer_auth" = [])),
    params(("equipment_id" = i32, Path, description = "Equipment ID")),
    request_body = CreateRequest,
    responses(
        (status = 201, description = "Request created", body = MaintenanceRequest),
        (status = 422, description = "Equipment is scrapped", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_request_for_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(equipment_id): Path<i32>,
    Json(data): Json<CreateRequest>,
) -> AppResult<(StatusCode, Json<MaintenanceRequest>)> {
    let request = state
        .services
        .requests
        .create(data, Some(equipment_id), claims.user_id)
        .await?;
    Ok((StatusCode::CREATED, Json(request)))
}
