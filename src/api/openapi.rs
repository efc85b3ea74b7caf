//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, calendar, equipment, health, home, kanban, requests, teams, users};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "GearGuard API",
        version = "0.1.0",
        description = "Maintenance request tracking REST API"
    ),
    paths(
        home::index,
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::signup,
        auth::login,
        auth::me,
        users::list_users,
        // Teams
        teams::list_teams,
        teams::get_team,
        teams::create_team,
        teams::update_team,
        teams::delete_team,
        // Equipment
        equipment::list_equipment,
        equipment::get_equipment,
        equipment::create_equipment,
        equipment::update_equipment,
        equipment::delete_equipment,
        // Requests
        requests::list_requests,
        requests::get_request,
        requests::update_request,
        requests::new_request_form,
        requests::new_request_form_for_equipment,
        requests::create_request,
        requests::create_request_for_equipment,
        // Kanban
        kanban::board,
        kanban::update_state,
        // Calendar
        calendar::calendar,
        calendar::events,
    ),
    components(
        schemas(
            home::HomeResponse,
            home::StateCount,
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            crate::models::user::User,
            crate::models::user::UserShort,
            crate::models::user::SignupRequest,
            crate::models::enums::Role,
            // Teams
            crate::models::team::MaintenanceTeam,
            crate::models::team::TeamSummary,
            crate::models::team::TeamDetails,
            crate::models::team::CreateTeam,
            crate::models::team::UpdateTeam,
            // Equipment
            crate::models::equipment::Equipment,
            crate::models::equipment::EquipmentListItem,
            crate::models::equipment::EquipmentDetails,
            crate::models::equipment::EquipmentChoice,
            crate::models::equipment::CreateEquipment,
            crate::models::equipment::UpdateEquipment,
            // Requests
            crate::models::enums::RequestType,
            crate::models::enums::RequestState,
            crate::models::request::MaintenanceRequest,
            crate::models::request::RequestListItem,
            crate::models::request::RequestDetails,
            crate::models::request::CreateRequest,
            crate::models::request::UpdateRequest,
            crate::models::request::RequestFormContext,
            crate::models::request::KanbanBoard,
            crate::models::request::CalendarEvent,
            kanban::KanbanUpdateForm,
            kanban::KanbanUpdateResponse,
            calendar::CalendarShell,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "home", description = "Landing page"),
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "users", description = "User listing"),
        (name = "teams", description = "Maintenance teams"),
        (name = "equipment", description = "Equipment management"),
        (name = "requests", description = "Maintenance requests"),
        (name = "kanban", description = "Kanban board"),
        (name = "calendar", description = "Preventive maintenance calendar")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
