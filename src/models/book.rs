//! Book (catalog entry) model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Cataloged book copy
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i32,
    /// Library-internal identifier of the physical copy
    pub accession_number: String,
    pub isbn: String,
    pub title: String,
    pub author: Option<String>,
    pub place_of_publication: Option<String>,
    pub publisher: Option<String>,
    pub copyright: Option<String>,
    pub genre: Option<String>,
    pub crea_date: Option<DateTime<Utc>>,
}

/// Create book request
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Accession number is required"))]
    pub accession_number: String,
    #[validate(length(min = 1, message = "ISBN is required"))]
    pub isbn: String,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub author: Option<String>,
    pub place_of_publication: Option<String>,
    pub publisher: Option<String>,
    pub copyright: Option<String>,
    pub genre: Option<String>,
}

impl CreateBook {
    /// Trim identifiers and title; blank descriptive fields become `None`.
    pub fn trimmed(self) -> Self {
        fn optional(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        Self {
            accession_number: self.accession_number.trim().to_string(),
            isbn: self.isbn.trim().to_string(),
            title: self.title.trim().to_string(),
            author: optional(self.author),
            place_of_publication: optional(self.place_of_publication),
            publisher: optional(self.publisher),
            copyright: optional(self.copyright),
            genre: optional(self.genre),
        }
    }
}
