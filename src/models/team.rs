//! Maintenance team model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::user::UserShort;

/// Maintenance team record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MaintenanceTeam {
    pub id: i32,
    /// Unique team name
    pub name: String,
}

/// Team row for lists
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TeamSummary {
    pub id: i32,
    pub name: String,
    pub member_count: i64,
}

/// Team with its members
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TeamDetails {
    pub id: i32,
    pub name: String,
    pub members: Vec<UserShort>,
}

/// Query parameters for team lists
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct TeamQuery {
    /// Substring search on the team name
    pub q: Option<String>,
}

/// Create team request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTeam {
    #[validate(length(min = 1, max = 255, message = "Team name must be 1 to 255 characters"))]
    pub name: String,
    /// Initial member user ids
    #[serde(default)]
    pub member_ids: Vec<i32>,
}

/// Update team request. `member_ids` replaces the whole member set.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateTeam {
    #[validate(length(min = 1, max = 255, message = "Team name must be 1 to 255 characters"))]
    pub name: Option<String>,
    pub member_ids: Option<Vec<i32>>,
}

/// Open-request load of one team member
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow)]
pub struct TechnicianLoad {
    pub user_id: i32,
    /// Requests assigned to this member in state new or in_progress
    pub open_requests: i64,
}
