//! Maintenance requests repository

use sqlx::{PgConnection, Pool, Postgres};

use super::{contains_pattern, search_term};
use crate::{
    error::{AppError, AppResult},
    models::{
        enums::{RequestState, RequestType},
        request::{MaintenanceRequest, RequestQuery, RequestRow, RequestSubmission},
        team::TechnicianLoad,
    },
};

/// Request with equipment name, technician and creator logins
const SELECT_REQUEST_ROWS: &str = r#"
    SELECT r.*,
           e.name AS equipment_name,
           tech.login AS assigned_technician_login,
           creator.login AS created_by_login
    FROM maintenance_requests r
    JOIN equipment e ON e.id = r.equipment_id
    LEFT JOIN users tech ON tech.id = r.assigned_technician_id
    JOIN users creator ON creator.id = r.created_by
"#;

#[derive(Clone)]
pub struct RequestsRepository {
    pool: Pool<Postgres>,
}

impl RequestsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List requests with optional filters, newest first
    pub async fn list(&self, query: &RequestQuery) -> AppResult<Vec<RequestRow>> {
        let term = search_term(&query.q);

        let mut conditions = Vec::new();
        let mut idx = 1;

        if query.request_type.is_some() {
            conditions.push(format!("r.request_type = ${}", idx));
            idx += 1;
        }
        if query.state.is_some() {
            conditions.push(format!("r.state = ${}", idx));
            idx += 1;
        }
        if query.assigned_technician_id.is_some() {
            conditions.push(format!("r.assigned_technician_id = ${}", idx));
            idx += 1;
        }
        if query.equipment_id.is_some() {
            conditions.push(format!("r.equipment_id = ${}", idx));
            idx += 1;
        }
        if term.is_some() {
            conditions.push(format!(
                "(r.subject ILIKE ${0} OR e.name ILIKE ${0} OR tech.login ILIKE ${0})",
                idx
            ));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let sql = format!(
            "{} {} ORDER BY r.created_at DESC, r.id DESC",
            SELECT_REQUEST_ROWS, where_clause
        );
        let mut builder = sqlx::query_as::<_, RequestRow>(&sql);
        if let Some(request_type) = query.request_type {
            builder = builder.bind(request_type);
        }
        if let Some(state) = query.state {
            builder = builder.bind(state);
        }
        if let Some(technician_id) = query.assigned_technician_id {
            builder = builder.bind(technician_id);
        }
        if let Some(equipment_id) = query.equipment_id {
            builder = builder.bind(equipment_id);
        }
        if let Some(term) = term {
            builder = builder.bind(contains_pattern(term));
        }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// Open requests (new, in_progress) for one piece of equipment
    pub async fn list_open_for_equipment(&self, equipment_id: i32) -> AppResult<Vec<RequestRow>> {
        let sql = format!(
            "{} WHERE r.equipment_id = $1 AND r.state IN ('new', 'in_progress') ORDER BY r.created_at, r.id",
            SELECT_REQUEST_ROWS
        );
        let rows = sqlx::query_as::<_, RequestRow>(&sql)
            .bind(equipment_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Preventive requests that have a scheduled date
    pub async fn list_scheduled_preventive(&self) -> AppResult<Vec<RequestRow>> {
        let sql = format!(
            "{} WHERE r.request_type = $1 AND r.scheduled_date IS NOT NULL ORDER BY r.scheduled_date, r.id",
            SELECT_REQUEST_ROWS
        );
        let rows = sqlx::query_as::<_, RequestRow>(&sql)
            .bind(RequestType::Preventive)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get a request with its display data
    pub async fn get_row(&self, id: i32) -> AppResult<RequestRow> {
        let sql = format!("{} WHERE r.id = $1", SELECT_REQUEST_ROWS);
        sqlx::query_as::<_, RequestRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Maintenance request {} not found", id)))
    }

    /// Get request by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<MaintenanceRequest> {
        sqlx::query_as::<_, MaintenanceRequest>("SELECT * FROM maintenance_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Maintenance request {} not found", id)))
    }

    /// Number of requests per state
    pub async fn count_by_state(&self) -> AppResult<Vec<(RequestState, i64)>> {
        let rows = sqlx::query_as::<_, (RequestState, i64)>(
            "SELECT state, COUNT(*) FROM maintenance_requests GROUP BY state",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Open-request load of every member of a team, ordered by user id
    pub async fn technician_loads(&self, conn: &mut PgConnection, team_id: i32) -> AppResult<Vec<TechnicianLoad>> {
        let loads = sqlx::query_as::<_, TechnicianLoad>(
            r#"
            SELECT tm.user_id, COUNT(r.id) AS open_requests
            FROM team_members tm
            LEFT JOIN maintenance_requests r
                   ON r.assigned_technician_id = tm.user_id
                  AND r.state IN ('new', 'in_progress')
            WHERE tm.team_id = $1
            GROUP BY tm.user_id
            ORDER BY tm.user_id
            "#,
        )
        .bind(team_id)
        .fetch_all(&mut *conn)
        .await?;
        Ok(loads)
    }

    /// Insert a new request
    pub async fn insert(&self, conn: &mut PgConnection, data: &RequestSubmission) -> AppResult<MaintenanceRequest> {
        let row = sqlx::query_as::<_, MaintenanceRequest>(
            r#"
            INSERT INTO maintenance_requests (
                subject, equipment_id, request_type, state,
                assigned_technician_id, scheduled_date, duration_hours, created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&data.subject)
        .bind(data.equipment_id)
        .bind(data.request_type)
        .bind(data.state)
        .bind(data.assigned_technician_id)
        .bind(data.scheduled_date)
        .bind(data.duration_hours)
        .bind(data.created_by)
        .fetch_one(&mut *conn)
        .await?;
        Ok(row)
    }

    /// Overwrite the mutable fields of an existing request.
    ///
    /// `created_by` and `created_at` never change.
    pub async fn update(
        &self,
        conn: &mut PgConnection,
        id: i32,
        data: &RequestSubmission,
    ) -> AppResult<MaintenanceRequest> {
        sqlx::query_as::<_, MaintenanceRequest>(
            r#"
            UPDATE maintenance_requests SET
                subject = $2, equipment_id = $3, request_type = $4, state = $5,
                assigned_technician_id = $6, scheduled_date = $7, duration_hours = $8
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&data.subject)
        .bind(data.equipment_id)
        .bind(data.request_type)
        .bind(data.state)
        .bind(data.assigned_technician_id)
        .bind(data.scheduled_date)
        .bind(data.duration_hours)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Maintenance request {} not found", id)))
    }
}
