//! Library hours (attendance session) models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// A scheduled library hours session
///
/// `book_title` is a copy of the assigned book's title at assignment time,
/// not a reference to the book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LibraryHours {
    pub id: i32,
    /// Identification number of the patron attending the session
    pub id_number: String,
    pub time_in: DateTime<Utc>,
    pub time_out: Option<DateTime<Utc>>,
    pub book_title: Option<String>,
    /// Optimistic concurrency stamp, bumped on every save
    pub version: i32,
}

/// Open session request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLibraryHours {
    #[validate(length(min = 1, message = "ID number is required"))]
    pub id_number: String,
    /// Defaults to the current time
    pub time_in: Option<DateTime<Utc>>,
    pub time_out: Option<DateTime<Utc>>,
}

/// Session record ready to be persisted
#[derive(Debug, Clone, PartialEq)]
pub struct NewLibraryHours {
    pub id_number: String,
    pub time_in: DateTime<Utc>,
    pub time_out: Option<DateTime<Utc>>,
}

/// Result of binding a book onto a session
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentConfirmation {
    pub message: String,
    pub book_id: i32,
    pub session_id: i32,
    pub book_title: String,
}
