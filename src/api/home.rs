//! Landing endpoint

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppResult, models::enums::RequestState};

#[derive(Serialize, ToSchema)]
pub struct StateCount {
    pub state: RequestState,
    pub label: String,
    pub count: i64,
}

#[derive(Serialize, ToSchema)]
pub struct HomeResponse {
    pub name: String,
    pub version: String,
    /// One entry per request state
    pub requests: Vec<StateCount>,
}

/// Application landing page
#[utoipa::path(
    get,
    path = "/",
    tag = "home",
    responses(
        (status = 200, description = "Application summary", body = HomeResponse)
    )
)]
pub async fn index(State(state): State<crate::AppState>) -> AppResult<Json<HomeResponse>> {
    let requests = state
        .services
        .requests
        .state_counts()
        .await?
        .into_iter()
        .map(|(state, count)| StateCount {
            state,
            label: state.label().to_string(),
            count,
        })
        .collect();

    Ok(Json(HomeResponse {
        name: "GearGuard".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        requests,
    }))
}
