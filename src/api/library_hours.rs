//! Library hours endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;

use crate::{
    error::{AppError, AppResult, ErrorResponse},
    models::library_hours::{CreateLibraryHours, LibraryHours},
};

/// List all library hours sessions
#[utoipa::path(
    get,
    path = "/library-hours",
    tag = "library-hours",
    responses(
        (status = 200, description = "List of sessions", body = Vec<LibraryHours>)
    )
)]
pub async fn list_library_hours(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<LibraryHours>>> {
    let sessions = state.services.library_hours.list_all().await?;
    Ok(Json(sessions))
}

/// List sessions of one patron
#[utoipa::path(
    get,
    path = "/library-hours/user/{id_number}",
    tag = "library-hours",
    params(
        ("id_number" = String, Path, description = "Patron identification number")
    ),
    responses(
        (status = 200, description = "Sessions of the patron", body = Vec<LibraryHours>)
    )
)]
pub async fn list_user_library_hours(
    State(state): State<crate::AppState>,
    WithRejection(Path(id_number), _): WithRejection<Path<String>, AppError>,
) -> AppResult<Json<Vec<LibraryHours>>> {
    let sessions = state.services.library_hours.list_by_id_number(&id_number).await?;
    Ok(Json(sessions))
}

/// Get a session by ID
#[utoipa::path(
    get,
    path = "/library-hours/{id}",
    tag = "library-hours",
    params(
        ("id" = i32, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Session details", body = LibraryHours),
        (status = 404, description = "Session not found", body = ErrorResponse)
    )
)]
pub async fn get_library_hours(
    State(state): State<crate::AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, AppError>,
) -> AppResult<Json<LibraryHours>> {
    let session = state.services.library_hours.get_by_id(id).await?;
    Ok(Json(session))
}

/// Open a session (time in)
#[utoipa::path(
    post,
    path = "/library-hours",
    tag = "library-hours",
    request_body = CreateLibraryHours,
    responses(
        (status = 201, description = "Session opened", body = LibraryHours),
        (status = 400, description = "Invalid input", body = ErrorResponse)
    )
)]
pub async fn create_library_hours(
    State(state): State<crate::AppState>,
    WithRejection(Json(data), _): WithRejection<Json<CreateLibraryHours>, AppError>,
) -> AppResult<(StatusCode, Json<LibraryHours>)> {
    let session = state.services.library_hours.open(data).await?;
    Ok((StatusCode::CREATED, Json(session)))
}
