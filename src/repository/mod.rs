//! Repository layer: one store trait per entity, backed by PostgreSQL or memory

pub mod books;
pub mod library_hours;
pub mod memory;
pub mod users;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{Book, CreateBook, LibraryHours, NewLibraryHours, NewUser, User},
};

/// Persistence boundary for users
///
/// `create` is the final arbiter of email uniqueness and must fail with
/// `DuplicateEmail` even if an earlier `email_exists` returned false.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn email_exists(&self, email: &str) -> AppResult<bool>;

    async fn get_by_email(&self, email: &str) -> AppResult<Option<User>>;

    async fn create(&self, user: &NewUser) -> AppResult<User>;

    /// All users in insertion order
    async fn list_all(&self) -> AppResult<Vec<User>>;
}

/// Persistence boundary for books
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    async fn accession_number_exists(&self, accession_number: &str) -> AppResult<bool>;

    async fn isbn_exists(&self, isbn: &str) -> AppResult<bool>;

    /// Insert a book, rejecting a duplicate accession number and, when
    /// `unique_isbn` is set, a duplicate ISBN (accession number checked first).
    async fn create(&self, book: &CreateBook, unique_isbn: bool) -> AppResult<Book>;

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Book>>;

    /// All books in insertion order
    async fn list_all(&self) -> AppResult<Vec<Book>>;
}

/// Persistence boundary for library hours sessions
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LibraryHoursStore: Send + Sync {
    async fn create(&self, record: &NewLibraryHours) -> AppResult<LibraryHours>;

    async fn get_by_id(&self, id: i32) -> AppResult<Option<LibraryHours>>;

    /// Persist the full record if its version still matches the stored one.
    ///
    /// Returns the record with the bumped version; `SessionNotFound` if the
    /// row is gone, `ConcurrentModification` if the version moved.
    async fn save(&self, record: &LibraryHours) -> AppResult<LibraryHours>;

    async fn list_all(&self) -> AppResult<Vec<LibraryHours>>;

    async fn list_by_id_number(&self, id_number: &str) -> AppResult<Vec<LibraryHours>>;
}

/// Store handles shared by the services
#[derive(Clone)]
pub struct Repository {
    pub users: Arc<dyn UserStore>,
    pub books: Arc<dyn BookStore>,
    pub library_hours: Arc<dyn LibraryHoursStore>,
}

impl Repository {
    /// Create a repository backed by the given database pool
    pub fn postgres(pool: Pool<Postgres>) -> Self {
        Self {
            users: Arc::new(users::UsersRepository::new(pool.clone())),
            books: Arc::new(books::BooksRepository::new(pool.clone())),
            library_hours: Arc::new(library_hours::LibraryHoursRepository::new(pool)),
        }
    }

    /// Create a repository with empty in-memory stores
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(memory::InMemoryUserStore::new()),
            books: Arc::new(memory::InMemoryBookStore::new()),
            library_hours: Arc::new(memory::InMemoryLibraryHoursStore::new()),
        }
    }
}

/// Name of the unique constraint violated by a failed statement, if any
pub(crate) fn violated_unique_constraint(error: &sqlx::Error) -> Option<String> {
    match error {
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
            db.constraint().map(str::to_string)
        }
        _ => None,
    }
}
