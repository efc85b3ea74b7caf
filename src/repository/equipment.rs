//! Equipment repository

use sqlx::{PgConnection, Pool, Postgres};

use super::{contains_pattern, search_term};
use crate::{
    error::{AppError, AppResult},
    models::equipment::{CreateEquipment, Equipment, EquipmentChoice, EquipmentListItem, EquipmentQuery, EquipmentRow},
};

/// Equipment with team, holder, default technician and live open-requests count
const SELECT_EQUIPMENT_ROWS: &str = r#"
    SELECT e.*,
           t.name AS team_name,
           holder.login AS assigned_to_login,
           tech.login AS default_technician_login,
           (
               SELECT COUNT(*) FROM maintenance_requests r
               WHERE r.equipment_id = e.id AND r.state IN ('new', 'in_progress')
           ) AS open_requests_count
    FROM equipment e
    JOIN maintenance_teams t ON t.id = e.team_id
    LEFT JOIN users holder ON holder.id = e.assigned_to_id
    LEFT JOIN users tech ON tech.id = e.default_technician_id
"#;

#[derive(Clone)]
pub struct EquipmentRepository {
    pool: Pool<Postgres>,
}

impl EquipmentRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List equipment with optional filters
    pub async fn list(&self, query: &EquipmentQuery) -> AppResult<Vec<EquipmentListItem>> {
        let term = search_term(&query.q);

        let mut conditions = Vec::new();
        let mut idx = 1;

        if term.is_some() {
            conditions.push(format!(
                "(e.name ILIKE ${0} OR e.serial_number ILIKE ${0} OR e.department ILIKE ${0} OR holder.login ILIKE ${0})",
                idx
            ));
            idx += 1;
        }
        if query.department.is_some() {
            conditions.push(format!("e.department = ${}", idx));
            idx += 1;
        }
        if query.team_id.is_some() {
            conditions.push(format!("e.team_id = ${}", idx));
            idx += 1;
        }
        if query.is_scrapped.is_some() {
            conditions.push(format!("e.is_scrapped = ${}", idx));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let sql = format!("{} {} ORDER BY e.name, e.id", SELECT_EQUIPMENT_ROWS, where_clause);
        let mut builder = sqlx::query_as::<_, EquipmentRow>(&sql);
        if let Some(term) = term {
            builder = builder.bind(contains_pattern(term));
        }
        if let Some(ref department) = query.department {
            builder = builder.bind(department);
        }
        if let Some(team_id) = query.team_id {
            builder = builder.bind(team_id);
        }
        if let Some(is_scrapped) = query.is_scrapped {
            builder = builder.bind(is_scrapped);
        }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(EquipmentListItem::from).collect())
    }

    /// Get equipment with its display data
    pub async fn get_list_item(&self, id: i32) -> AppResult<EquipmentListItem> {
        let sql = format!("{} WHERE e.id = $1", SELECT_EQUIPMENT_ROWS);
        sqlx::query_as::<_, EquipmentRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(EquipmentListItem::from)
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Get equipment by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>("SELECT * FROM equipment WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Equipment that still accepts requests
    pub async fn list_choices(&self) -> AppResult<Vec<EquipmentChoice>> {
        let rows = sqlx::query_as::<_, EquipmentChoice>(
            "SELECT id, name, serial_number FROM equipment WHERE NOT is_scrapped ORDER BY name, id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Create equipment
    pub async fn create(&self, data: &CreateEquipment) -> AppResult<Equipment> {
        let row = sqlx::query_as::<_, Equipment>(
            r#"
            INSERT INTO equipment (
                name, serial_number, department, location,
                purchase_date, warranty_end_date,
                team_id, default_technician_id, assigned_to_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.serial_number)
        .bind(&data.department)
        .bind(&data.location)
        .bind(data.purchase_date)
        .bind(data.warranty_end_date)
        .bind(data.team_id)
        .bind(data.default_technician_id)
        .bind(data.assigned_to_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Write back a merged equipment record.
    ///
    /// `is_scrapped` only ever moves to true.
    pub async fn update(&self, data: &Equipment) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>(
            r#"
            UPDATE equipment SET
                name = $2, serial_number = $3, department = $4, location = $5,
                purchase_date = $6, warranty_end_date = $7,
                team_id = $8, default_technician_id = $9, assigned_to_id = $10,
                is_scrapped = is_scrapped OR $11
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(data.id)
        .bind(&data.name)
        .bind(&data.serial_number)
        .bind(&data.department)
        .bind(&data.location)
        .bind(data.purchase_date)
        .bind(data.warranty_end_date)
        .bind(data.team_id)
        .bind(data.default_technician_id)
        .bind(data.assigned_to_id)
        .bind(data.is_scrapped)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", data.id)))
    }

    /// Delete equipment
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM equipment WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Equipment {} not found", id)));
        }
        Ok(())
    }

    /// Lock the equipment row for the rest of the transaction
    pub async fn lock_for_update(&self, conn: &mut PgConnection, id: i32) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>("SELECT * FROM equipment WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Retire the equipment
    pub async fn mark_scrapped(&self, conn: &mut PgConnection, id: i32) -> AppResult<()> {
        sqlx::query("UPDATE equipment SET is_scrapped = TRUE WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }
}
