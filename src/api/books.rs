//! Book catalog endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;

use crate::{
    error::{AppError, AppResult, ErrorResponse},
    models::{
        book::{Book, CreateBook},
        library_hours::AssignmentConfirmation,
    },
};

/// List all cataloged books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "List of books", body = Vec<Book>)
    )
)]
pub async fn list_books(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.catalog.list_all().await?;
    Ok(Json(books))
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, AppError>,
) -> AppResult<Json<Book>> {
    let book = state.services.catalog.get_by_id(id).await?;
    Ok(Json(book))
}

/// Catalog a new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book cataloged", body = Book),
        (status = 400, description = "Missing field", body = ErrorResponse),
        (status = 409, description = "Accession number or ISBN already exists", body = ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    WithRejection(Json(book), _): WithRejection<Json<CreateBook>, AppError>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let created = state.services.catalog.add(book).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Assign a book's title to a library hours session
#[utoipa::path(
    put,
    path = "/books/{book_id}/library-hours/{session_id}",
    tag = "books",
    params(
        ("book_id" = i32, Path, description = "Book ID"),
        ("session_id" = i32, Path, description = "Library hours session ID")
    ),
    responses(
        (status = 200, description = "Book assigned", body = AssignmentConfirmation),
        (status = 404, description = "Book or session not found", body = ErrorResponse),
        (status = 409, description = "Session modified concurrently", body = ErrorResponse)
    )
)]
pub async fn assign_to_library_hours(
    State(state): State<crate::AppState>,
    WithRejection(Path((book_id, session_id)), _): WithRejection<Path<(i32, i32)>, AppError>,
) -> AppResult<Json<AssignmentConfirmation>> {
    let confirmation = state.services.assignment.assign(book_id, session_id).await?;
    Ok(Json(confirmation))
}
