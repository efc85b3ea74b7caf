//! API handlers for GearGuard endpoints

pub mod auth;
pub mod calendar;
pub mod equipment;
pub mod health;
pub mod home;
pub mod kanban;
pub mod openapi;
pub mod requests;
pub mod teams;
pub mod users;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{error::AppError, models::user::UserClaims, AppState};

/// Extractor for authenticated user from JWT token
pub struct AuthenticatedUser(pub UserClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Authentication("Invalid authorization header format".to_string()))?;

        let claims = UserClaims::from_token(token, &state.config.auth.jwt_secret)
            .map_err(|e| AppError::Authentication(e.to_string()))?;

        Ok(AuthenticatedUser(claims))
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let routes = Router::new()
        .route("/", get(home::index))
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Accounts
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me))
        .route("/users/", get(users::list_users))
        // Teams
        .route("/teams/", get(teams::list_teams).post(teams::create_team))
        .route(
            "/teams/:id/",
            get(teams::get_team).put(teams::update_team).delete(teams::delete_team),
        )
        // Equipment
        .route(
            "/equipment/",
            get(equipment::list_equipment).post(equipment::create_equipment),
        )
        .route(
            "/equipment/:id/",
            get(equipment::get_equipment)
                .put(equipment::update_equipment)
                .delete(equipment::delete_equipment),
        )
        // Requests
        .route("/requests/", get(requests::list_requests))
        .route(
            "/requests/new/",
            get(requests::new_request_form).post(requests::create_request),
        )
        .route(
            "/requests/new/:equipment_id/",
            get(requests::new_request_form_for_equipment).post(requests::create_request_for_equipment),
        )
        .route(
            "/requests/:id/",
            get(requests::get_request).post(requests::update_request),
        )
        // Kanban
        .route("/kanban/", get(kanban::board))
        .route(
            "/kanban/update/:id/",
            post(kanban::update_state).fallback(kanban::method_not_allowed),
        )
        // Calendar
        .route("/calendar/", get(calendar::calendar))
        .route("/calendar/events/", get(calendar::events))
        .with_state(state);

    Router::new()
        .merge(routes)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
