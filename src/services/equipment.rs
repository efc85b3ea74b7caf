//! Equipment service

use chrono::Local;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::equipment::{
        CreateEquipment, Equipment, EquipmentDetails, EquipmentListItem, EquipmentQuery, UpdateEquipment,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct EquipmentService {
    repository: Repository,
}

impl EquipmentService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &EquipmentQuery) -> AppResult<Vec<EquipmentListItem>> {
        self.repository.equipment.list(query).await
    }

    /// Equipment with its open requests
    pub async fn get_details(&self, id: i32) -> AppResult<EquipmentDetails> {
        let equipment = self.repository.equipment.get_list_item(id).await?;
        let today = Local::now().date_naive();
        let open_requests = self
            .repository
            .requests
            .list_open_for_equipment(id)
            .await?
            .into_iter()
            .map(|row| row.into_list_item(today))
            .collect();

        Ok(EquipmentDetails {
            equipment,
            open_requests,
        })
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipment> {
        self.repository.equipment.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateEquipment) -> AppResult<Equipment> {
        data.validate()?;
        self.repository.teams.get_by_id(data.team_id).await?;
        self.check_default_technician(data.team_id, data.default_technician_id)
            .await?;

        let equipment = self.repository.equipment.create(data).await?;
        tracing::info!(equipment_id = equipment.id, serial = %equipment.serial_number, "Equipment created");
        Ok(equipment)
    }

    pub async fn update(&self, id: i32, data: &UpdateEquipment) -> AppResult<Equipment> {
        data.validate()?;
        let current = self.repository.equipment.get_by_id(id).await?;

        if current.is_scrapped && data.is_scrapped == Some(false) {
            return Err(AppError::Validation(
                "Scrapped equipment cannot be returned to service".to_string(),
            ));
        }

        let merged = data.apply_to(&current);
        if merged.team_id != current.team_id {
            self.repository.teams.get_by_id(merged.team_id).await?;
        }
        self.check_default_technician(merged.team_id, merged.default_technician_id)
            .await?;

        self.repository.equipment.update(&merged).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.equipment.delete(id).await?;
        tracing::info!(equipment_id = id, "Equipment deleted");
        Ok(())
    }

    /// The default technician must belong to the owning team
    async fn check_default_technician(&self, team_id: i32, technician_id: Option<i32>) -> AppResult<()> {
        let Some(technician_id) = technician_id else {
            return Ok(());
        };

        self.repository.users.get_by_id(technician_id).await?;
        if !self.repository.teams.is_member(team_id, technician_id).await? {
            return Err(AppError::Validation(format!(
                "Default technician {} is not a member of team {}",
                technician_id, team_id
            )));
        }
        Ok(())
    }
}
