//! Maintenance request model and related types

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::{RequestState, RequestType};
use super::equipment::{Equipment, EquipmentChoice};
use super::user::UserShort;

/// Calendar colour for overdue preventive work
pub const CALENDAR_OVERDUE: &str = "#dc3545";
/// Calendar colour for everything else
pub const CALENDAR_SCHEDULED: &str = "#0d6efd";

/// Maintenance request record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MaintenanceRequest {
    pub id: i32,
    pub subject: String,
    pub equipment_id: i32,
    pub request_type: RequestType,
    pub state: RequestState,
    pub assigned_technician_id: Option<i32>,
    /// Planned date, relevant for preventive work
    pub scheduled_date: Option<NaiveDate>,
    /// Time spent, recorded when the request is repaired
    pub duration_hours: Option<Decimal>,
    pub created_by: i32,
    pub created_at: DateTime<Utc>,
}

/// Internal row structure for list queries
#[derive(Debug, Clone, FromRow)]
pub struct RequestRow {
    #[sqlx(flatten)]
    request: MaintenanceRequest,
    equipment_name: String,
    assigned_technician_login: Option<String>,
    created_by_login: String,
}

impl RequestRow {
    pub fn into_list_item(self, today: NaiveDate) -> RequestListItem {
        RequestListItem {
            is_overdue: is_overdue(self.request.scheduled_date, self.request.state, today),
            state_label: self.request.state.label().to_string(),
            state_color: self.request.state.color().to_string(),
            request: self.request,
            equipment_name: self.equipment_name,
            assigned_technician_login: self.assigned_technician_login,
            created_by_login: self.created_by_login,
        }
    }

    pub fn request(&self) -> &MaintenanceRequest {
        &self.request
    }

    pub fn equipment_name(&self) -> &str {
        &self.equipment_name
    }
}

/// Request with display data
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RequestListItem {
    pub request: MaintenanceRequest,
    pub equipment_name: String,
    pub assigned_technician_login: Option<String>,
    pub created_by_login: String,
    pub state_label: String,
    pub state_color: String,
    /// Scheduled in the past and not repaired
    pub is_overdue: bool,
}

/// Request detail with the technicians it can be handed to
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RequestDetails {
    pub request: RequestListItem,
    /// Members of the equipment's team
    pub technicians: Vec<UserShort>,
}

/// Query parameters for request lists
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct RequestQuery {
    pub request_type: Option<RequestType>,
    pub state: Option<RequestState>,
    pub assigned_technician_id: Option<i32>,
    pub equipment_id: Option<i32>,
    /// Substring search over subject, equipment name and technician login
    pub q: Option<String>,
}

/// File a new request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRequest {
    #[validate(length(min = 1, max = 255, message = "Subject must be 1 to 255 characters"))]
    pub subject: String,
    pub request_type: RequestType,
    /// Defaults to the equipment given in the URL
    pub equipment_id: Option<i32>,
    pub scheduled_date: Option<NaiveDate>,
}

/// Update a request from its detail page
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateRequest {
    /// One of new, in_progress, repaired, scrap
    pub state: Option<String>,
    pub assigned_technician_id: Option<i32>,
    /// Stored only when the resulting state is repaired
    pub duration_hours: Option<Decimal>,
}

/// Initial values for the request creation form
#[derive(Debug, Clone, Deserialize, IntoParams, ToSchema)]
pub struct RequestFormQuery {
    /// Pre-filled scheduled date (YYYY-MM-DD)
    pub date: Option<String>,
}

/// Everything the request creation form needs
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RequestFormContext {
    /// Equipment that accepts new requests
    pub equipment_choices: Vec<EquipmentChoice>,
    pub request_types: Vec<RequestType>,
    /// Equipment given in the URL, even when scrapped
    pub equipment: Option<Equipment>,
    pub initial_scheduled_date: Option<NaiveDate>,
    /// The URL equipment is scrapped and will be rejected on submit
    pub is_scrapped: bool,
}

/// A fully resolved request ready to be persisted
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSubmission {
    /// None for a new request
    pub id: Option<i32>,
    pub subject: String,
    pub equipment_id: i32,
    pub request_type: RequestType,
    pub state: RequestState,
    pub assigned_technician_id: Option<i32>,
    pub scheduled_date: Option<NaiveDate>,
    pub duration_hours: Option<Decimal>,
    pub created_by: i32,
    /// Run the assignment policy when no technician is set, whatever the state
    pub auto_assign: bool,
}

impl RequestSubmission {
    /// A brand new request in state `new`, unassigned
    pub fn new(data: &CreateRequest, equipment_id: i32, created_by: i32) -> Self {
        Self {
            id: None,
            subject: data.subject.trim().to_string(),
            equipment_id,
            request_type: data.request_type,
            state: RequestState::New,
            assigned_technician_id: None,
            scheduled_date: data.scheduled_date,
            duration_hours: None,
            created_by,
            auto_assign: true,
        }
    }

    /// New requests and explicit requests without a technician get one picked
    pub fn needs_assignment(&self) -> bool {
        self.assigned_technician_id.is_none() && (self.auto_assign || self.state == RequestState::New)
    }
}

impl From<MaintenanceRequest> for RequestSubmission {
    fn from(request: MaintenanceRequest) -> Self {
        Self {
            id: Some(request.id),
            subject: request.subject,
            equipment_id: request.equipment_id,
            request_type: request.request_type,
            state: request.state,
            assigned_technician_id: request.assigned_technician_id,
            scheduled_date: request.scheduled_date,
            duration_hours: request.duration_hours,
            created_by: request.created_by,
            auto_assign: false,
        }
    }
}

/// Requests grouped by state for the kanban board
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct KanbanBoard {
    pub new: Vec<RequestListItem>,
    pub in_progress: Vec<RequestListItem>,
    pub repaired: Vec<RequestListItem>,
    pub scrap: Vec<RequestListItem>,
}

impl KanbanBoard {
    pub fn from_items(items: Vec<RequestListItem>) -> Self {
        let mut board = KanbanBoard::default();
        for item in items {
            let column = match item.request.state {
                RequestState::New => &mut board.new,
                RequestState::InProgress => &mut board.in_progress,
                RequestState::Repaired => &mut board.repaired,
                RequestState::Scrap => &mut board.scrap,
            };
            column.push(item);
        }
        board
    }
}

/// Preventive request as a calendar event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CalendarEvent {
    pub id: i32,
    pub title: String,
    /// Scheduled date (YYYY-MM-DD)
    pub start: String,
    pub url: String,
    pub color: String,
}

impl CalendarEvent {
    /// Build the event for a request; None when it has no scheduled date
    pub fn for_request(request: &MaintenanceRequest, equipment_name: &str, today: NaiveDate) -> Option<Self> {
        let scheduled = request.scheduled_date?;
        let color = if is_overdue(Some(scheduled), request.state, today) {
            CALENDAR_OVERDUE
        } else {
            CALENDAR_SCHEDULED
        };

        Some(Self {
            id: request.id,
            title: format!("{} ({})", request.subject, equipment_name),
            start: scheduled.format("%Y-%m-%d").to_string(),
            url: format!("/requests/{}/", request.id),
            color: color.to_string(),
        })
    }
}

/// Scheduled strictly before today and not yet repaired
pub fn is_overdue(scheduled_date: Option<NaiveDate>, state: RequestState, today: NaiveDate) -> bool {
    match scheduled_date {
        Some(date) => date < today && state != RequestState::Repaired,
        None => false,
    }
}
