//! Library hours repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::LibraryHoursStore;
use crate::{
    error::{AppError, AppResult},
    models::{LibraryHours, NewLibraryHours},
};

#[derive(Clone)]
pub struct LibraryHoursRepository {
    pool: Pool<Postgres>,
}

impl LibraryHoursRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LibraryHoursStore for LibraryHoursRepository {
    async fn create(&self, record: &NewLibraryHours) -> AppResult<LibraryHours> {
        let row = sqlx::query_as::<_, LibraryHours>(
            r#"
            INSERT INTO library_hours (id_number, time_in, time_out, book_title, version)
            VALUES ($1, $2, $3, NULL, 0)
            RETURNING *
            "#,
        )
        .bind(&record.id_number)
        .bind(record.time_in)
        .bind(record.time_out)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<LibraryHours>> {
        let row = sqlx::query_as::<_, LibraryHours>("SELECT * FROM library_hours WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Compare-and-set on `version`
    async fn save(&self, record: &LibraryHours) -> AppResult<LibraryHours> {
        let saved = sqlx::query_as::<_, LibraryHours>(
            r#"
            UPDATE library_hours
            SET id_number = $1, time_in = $2, time_out = $3, book_title = $4,
                version = version + 1
            WHERE id = $5 AND version = $6
            RETURNING *
            "#,
        )
        .bind(&record.id_number)
        .bind(record.time_in)
        .bind(record.time_out)
        .bind(&record.book_title)
        .bind(record.id)
        .bind(record.version)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(saved) = saved {
            return Ok(saved);
        }

        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM library_hours WHERE id = $1)")
                .bind(record.id)
                .fetch_one(&self.pool)
                .await?;

        if exists {
            Err(AppError::ConcurrentModification(record.id))
        } else {
            Err(AppError::SessionNotFound(record.id))
        }
    }

    async fn list_all(&self) -> AppResult<Vec<LibraryHours>> {
        let rows = sqlx::query_as::<_, LibraryHours>(
            "SELECT * FROM library_hours ORDER BY time_in, id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn list_by_id_number(&self, id_number: &str) -> AppResult<Vec<LibraryHours>> {
        let rows = sqlx::query_as::<_, LibraryHours>(
            "SELECT * FROM library_hours WHERE id_number = $1 ORDER BY time_in, id",
        )
        .bind(id_number)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
