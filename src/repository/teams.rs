//! Maintenance teams repository

use sqlx::{PgConnection, Pool, Postgres};

use super::{contains_pattern, search_term};
use crate::{
    error::{AppError, AppResult},
    models::{
        team::{MaintenanceTeam, TeamQuery, TeamSummary},
        user::UserShort,
    },
};

#[derive(Clone)]
pub struct TeamsRepository {
    pool: Pool<Postgres>,
}

impl TeamsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List teams with their member count
    pub async fn list(&self, query: &TeamQuery) -> AppResult<Vec<TeamSummary>> {
        let base = r#"
            SELECT t.id, t.name, COUNT(tm.user_id) AS member_count
            FROM maintenance_teams t
            LEFT JOIN team_members tm ON tm.team_id = t.id
        "#;

        let rows = match search_term(&query.q) {
            Some(term) => {
                let sql = format!("{} WHERE t.name ILIKE $1 GROUP BY t.id ORDER BY t.name", base);
                sqlx::query_as::<_, TeamSummary>(&sql)
                    .bind(contains_pattern(term))
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let sql = format!("{} GROUP BY t.id ORDER BY t.name", base);
                sqlx::query_as::<_, TeamSummary>(&sql).fetch_all(&self.pool).await?
            }
        };

        Ok(rows)
    }

    /// Get team by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<MaintenanceTeam> {
        sqlx::query_as::<_, MaintenanceTeam>("SELECT * FROM maintenance_teams WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Team {} not found", id)))
    }

    /// Members of a team, ordered by login
    pub async fn members(&self, team_id: i32) -> AppResult<Vec<UserShort>> {
        let members = sqlx::query_as::<_, UserShort>(
            r#"
            SELECT u.id, u.login, u.role
            FROM team_members tm
            JOIN users u ON u.id = tm.user_id
            WHERE tm.team_id = $1
            ORDER BY u.login
            "#,
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    /// Whether the user belongs to the team
    pub async fn is_member(&self, team_id: i32, user_id: i32) -> AppResult<bool> {
        let member: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM team_members WHERE team_id = $1 AND user_id = $2)",
        )
        .bind(team_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(member)
    }

    /// Create a team and its initial members
    pub async fn create(&self, name: &str, member_ids: &[i32]) -> AppResult<MaintenanceTeam> {
        let mut transaction = self.pool.begin().await?;

        let team = sqlx::query_as::<_, MaintenanceTeam>(
            "INSERT INTO maintenance_teams (name) VALUES ($1) RETURNING *",
        )
        .bind(name)
        .fetch_one(&mut *transaction)
        .await?;

        self.replace_members(&mut transaction, team.id, member_ids).await?;

        transaction.commit().await?;
        Ok(team)
    }

    /// Rename a team and/or replace its member set
    pub async fn update(
        &self,
        id: i32,
        name: Option<&str>,
        member_ids: Option<&[i32]>,
    ) -> AppResult<MaintenanceTeam> {
        let mut transaction = self.pool.begin().await?;

        let team = match name {
            Some(name) => sqlx::query_as::<_, MaintenanceTeam>(
                "UPDATE maintenance_teams SET name = $1 WHERE id = $2 RETURNING *",
            )
            .bind(name)
            .bind(id)
            .fetch_optional(&mut *transaction)
            .await?,
            None => sqlx::query_as::<_, MaintenanceTeam>(
                "SELECT * FROM maintenance_teams WHERE id = $1 FOR UPDATE",
            )
            .bind(id)
            .fetch_optional(&mut *transaction)
            .await?,
        }
        .ok_or_else(|| AppError::NotFound(format!("Team {} not found", id)))?;

        if let Some(member_ids) = member_ids {
            self.replace_members(&mut transaction, id, member_ids).await?;
        }

        transaction.commit().await?;
        Ok(team)
    }

    async fn replace_members(&self, conn: &mut PgConnection, team_id: i32, member_ids: &[i32]) -> AppResult<()> {
        sqlx::query("DELETE FROM team_members WHERE team_id = $1")
            .bind(team_id)
            .execute(&mut *conn)
            .await?;

        sqlx::query(
            r#"
            INSERT INTO team_members (team_id, user_id)
            SELECT $1, member_id FROM UNNEST($2::int[]) AS member_id
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(team_id)
        .bind(member_ids)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    /// Delete a team; its equipment and their requests go with it
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM maintenance_teams WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Team {} not found", id)));
        }
        Ok(())
    }
}
