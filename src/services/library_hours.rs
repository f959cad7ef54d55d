//! Library hours session registry

use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{CreateLibraryHours, LibraryHours, NewLibraryHours},
    repository::LibraryHoursStore,
};

#[derive(Clone)]
pub struct LibraryHoursService {
    store: Arc<dyn LibraryHoursStore>,
}

impl LibraryHoursService {
    pub fn new(store: Arc<dyn LibraryHoursStore>) -> Self {
        Self { store }
    }

    /// Open a session with no book assigned
    pub async fn open(&self, data: CreateLibraryHours) -> AppResult<LibraryHours> {
        let data = CreateLibraryHours {
            id_number: data.id_number.trim().to_string(),
            ..data
        };
        data.validate()?;

        let time_in = data.time_in.unwrap_or_else(Utc::now);
        if let Some(time_out) = data.time_out {
            if time_out < time_in {
                return Err(AppError::Validation("Time out precedes time in".to_string()));
            }
        }

        self.store
            .create(&NewLibraryHours {
                id_number: data.id_number,
                time_in,
                time_out: data.time_out,
            })
            .await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<LibraryHours> {
        self.store
            .get_by_id(id)
            .await?
            .ok_or(AppError::SessionNotFound(id))
    }

    /// Persist the full record, including its assigned book title
    pub async fn save(&self, record: &LibraryHours) -> AppResult<LibraryHours> {
        self.store.save(record).await
    }

    pub async fn list_all(&self) -> AppResult<Vec<LibraryHours>> {
        self.store.list_all().await
    }

    pub async fn list_by_id_number(&self, id_number: &str) -> AppResult<Vec<LibraryHours>> {
        self.store.list_by_id_number(id_number).await
    }
}
