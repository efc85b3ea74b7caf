//! Maintenance teams service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::team::{CreateTeam, MaintenanceTeam, TeamDetails, TeamQuery, TeamSummary, UpdateTeam},
    repository::Repository,
};

#[derive(Clone)]
pub struct TeamsService {
    repository: Repository,
}

impl TeamsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &TeamQuery) -> AppResult<Vec<TeamSummary>> {
        self.repository.teams.list(query).await
    }

    pub async fn get_details(&self, id: i32) -> AppResult<TeamDetails> {
        let team = self.repository.teams.get_by_id(id).await?;
        let members = self.repository.teams.members(id).await?;
        Ok(TeamDetails {
            id: team.id,
            name: team.name,
            members,
        })
    }

    pub async fn create(&self, data: &CreateTeam) -> AppResult<MaintenanceTeam> {
        data.validate()?;
        let name = normalized_name(&data.name)?;
        let team = self.repository.teams.create(name, &data.member_ids).await?;
        tracing::info!(team_id = team.id, name = %team.name, "Maintenance team created");
        Ok(team)
    }

    pub async fn update(&self, id: i32, data: &UpdateTeam) -> AppResult<MaintenanceTeam> {
        data.validate()?;
        let name = data.name.as_deref().map(normalized_name).transpose()?;
        self.repository
            .teams
            .update(id, name, data.member_ids.as_deref())
            .await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.teams.delete(id).await?;
        tracing::info!(team_id = id, "Maintenance team deleted");
        Ok(())
    }
}

fn normalized_name(name: &str) -> AppResult<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation("Team name must not be blank".to_string()));
    }
    Ok(trimmed)
}
