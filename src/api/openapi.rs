//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, health, library_hours, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "WildTrack API",
        version = "0.1.0",
        description = "Library records REST API: users, book catalog and library hours"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Users
        users::list_users,
        users::create_user,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::assign_to_library_hours,
        // Library hours
        library_hours::list_library_hours,
        library_hours::list_user_library_hours,
        library_hours::get_library_hours,
        library_hours::create_library_hours,
    ),
    components(
        schemas(
            crate::models::user::User,
            crate::models::user::CreateUser,
            crate::models::book::Book,
            crate::models::book::CreateBook,
            crate::models::library_hours::LibraryHours,
            crate::models::library_hours::CreateLibraryHours,
            crate::models::library_hours::AssignmentConfirmation,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "users", description = "User registration and listing"),
        (name = "books", description = "Book catalog and assignment"),
        (name = "library-hours", description = "Library hours sessions")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
