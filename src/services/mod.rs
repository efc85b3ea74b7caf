//! Business logic services

pub mod assignment;
pub mod equipment;
pub mod requests;
pub mod teams;
pub mod users;

use crate::{config::AuthConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub users: users::UsersService,
    pub teams: teams::TeamsService,
    pub equipment: equipment::EquipmentService,
    pub requests: requests::RequestsService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig) -> Self {
        Self {
            users: users::UsersService::new(repository.clone(), auth_config),
            teams: teams::TeamsService::new(repository.clone()),
            equipment: equipment::EquipmentService::new(repository.clone()),
            requests: requests::RequestsService::new(repository.clone()),
            repository,
        }
    }

    /// Check that the database answers
    pub async fn ping_database(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(&self.repository.pool)
            .await
            .is_ok()
    }
}
