//! Equipment model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::request::RequestListItem;

/// Badge colour for equipment with open requests
pub const BADGE_OPEN: &str = "#dc3545";
/// Badge colour for equipment without open requests
pub const BADGE_CLEAR: &str = "#198754";

/// Equipment record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Equipment {
    pub id: i32,
    pub name: String,
    /// Unique serial number
    pub serial_number: String,
    pub department: String,
    pub location: String,
    pub purchase_date: Option<NaiveDate>,
    pub warranty_end_date: Option<NaiveDate>,
    /// Owning maintenance team
    pub team_id: i32,
    /// Technician that takes every new request, bypassing load balancing
    pub default_technician_id: Option<i32>,
    /// Current holder of the equipment
    pub assigned_to_id: Option<i32>,
    /// Once set, no request can be filed or saved against this equipment
    pub is_scrapped: bool,
    pub created_at: DateTime<Utc>,
}

/// Internal row structure for list queries
#[derive(Debug, Clone, FromRow)]
pub struct EquipmentRow {
    #[sqlx(flatten)]
    equipment: Equipment,
    team_name: String,
    assigned_to_login: Option<String>,
    default_technician_login: Option<String>,
    open_requests_count: i64,
}

impl From<EquipmentRow> for EquipmentListItem {
    fn from(row: EquipmentRow) -> Self {
        EquipmentListItem {
            badge_color: badge_color(row.open_requests_count).to_string(),
            equipment: row.equipment,
            team_name: row.team_name,
            assigned_to_login: row.assigned_to_login,
            default_technician_login: row.default_technician_login,
            open_requests_count: row.open_requests_count,
        }
    }
}

/// Equipment with display data and its open-requests badge
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EquipmentListItem {
    pub equipment: Equipment,
    pub team_name: String,
    pub assigned_to_login: Option<String>,
    pub default_technician_login: Option<String>,
    /// Requests in state new or in_progress
    pub open_requests_count: i64,
    pub badge_color: String,
}

/// Equipment detail with its open requests
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EquipmentDetails {
    pub equipment: EquipmentListItem,
    pub open_requests: Vec<RequestListItem>,
}

/// Equipment choice offered when filing a request
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EquipmentChoice {
    pub id: i32,
    pub name: String,
    pub serial_number: String,
}

/// Query parameters for equipment lists
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct EquipmentQuery {
    /// Substring search over name, serial number, department and holder login
    pub q: Option<String>,
    pub department: Option<String>,
    pub team_id: Option<i32>,
    pub is_scrapped: Option<bool>,
}

/// Create equipment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEquipment {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 255))]
    pub serial_number: String,
    #[validate(length(min = 1, max = 100))]
    pub department: String,
    #[validate(length(min = 1, max = 255))]
    pub location: String,
    pub purchase_date: Option<NaiveDate>,
    pub warranty_end_date: Option<NaiveDate>,
    pub team_id: i32,
    pub default_technician_id: Option<i32>,
    pub assigned_to_id: Option<i32>,
}

/// Update equipment request.
///
/// Nullable references use `null` to clear and absence to keep.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateEquipment {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub serial_number: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub department: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub location: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<NaiveDate>)]
    pub purchase_date: Option<Option<NaiveDate>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<NaiveDate>)]
    pub warranty_end_date: Option<Option<NaiveDate>>,
    pub team_id: Option<i32>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<i32>)]
    pub default_technician_id: Option<Option<i32>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<i32>)]
    pub assigned_to_id: Option<Option<i32>>,
    /// Can only be set to true
    pub is_scrapped: Option<bool>,
}

impl UpdateEquipment {
    /// Merge the update into the stored record
    pub fn apply_to(&self, current: &Equipment) -> Equipment {
        let mut merged = current.clone();
        if let Some(ref name) = self.name {
            merged.name = name.clone();
        }
        if let Some(ref serial_number) = self.serial_number {
            merged.serial_number = serial_number.clone();
        }
        if let Some(ref department) = self.department {
            merged.department = department.clone();
        }
        if let Some(ref location) = self.location {
            merged.location = location.clone();
        }
        if let Some(purchase_date) = self.purchase_date {
            merged.purchase_date = purchase_date;
        }
        if let Some(warranty_end_date) = self.warranty_end_date {
            merged.warranty_end_date = warranty_end_date;
        }
        if let Some(team_id) = self.team_id {
            merged.team_id = team_id;
        }
        if let Some(default_technician_id) = self.default_technician_id {
            merged.default_technician_id = default_technician_id;
        }
        if let Some(assigned_to_id) = self.assigned_to_id {
            merged.assigned_to_id = assigned_to_id;
        }
        if let Some(is_scrapped) = self.is_scrapped {
            merged.is_scrapped = is_scrapped;
        }
        merged
    }
}

pub fn badge_color(open_requests_count: i64) -> &'static str {
    if open_requests_count > 0 {
        BADGE_OPEN
    } else {
        BADGE_CLEAR
    }
}
