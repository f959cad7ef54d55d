//! API handlers for WildTrack REST endpoints

pub mod books;
pub mod health;
pub mod library_hours;
pub mod openapi;
pub mod users;

use axum::{
    routing::{get, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Users
        .route("/users", get(users::list_users).post(users::create_user))
        // Books
        .route("/books", get(books::list_books).post(books::create_book))
        .route("/books/:id", get(books::get_book))
        .route(
            "/books/:book_id/library-hours/:session_id",
            put(books::assign_to_library_hours),
        )
        // Library hours
        .route(
            "/library-hours",
            get(library_hours::list_library_hours).post(library_hours::create_library_hours),
        )
        .route("/library-hours/:id", get(library_hours::get_library_hours))
        .route(
            "/library-hours/user/:id_number",
            get(library_hours::list_user_library_hours),
        )
        .with_state(state);

    // OpenAPI documentation
    let openapi = openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
