//! In-memory store implementations
//!
//! Used by the `memory` storage backend and by tests. Every uniqueness check
//! runs under the same write lock as the insert it guards.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{BookStore, LibraryHoursStore, UserStore};
use crate::{
    error::{AppError, AppResult},
    models::{Book, CreateBook, LibraryHours, NewLibraryHours, NewUser, User},
};

/// Rows kept in insertion order with a serial id counter
#[derive(Debug)]
struct Table<T> {
    rows: Vec<T>,
    next_id: i32,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            next_id: 1,
        }
    }
}

impl<T> Table<T> {
    fn allocate_id(&mut self) -> i32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    table: RwLock<Table<User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn email_exists(&self, email: &str) -> AppResult<bool> {
        let table = self.table.read().await;
        Ok(table.rows.iter().any(|u| u.email == email))
    }

    async fn get_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|u| u.email == email).cloned())
    }

    async fn create(&self, user: &NewUser) -> AppResult<User> {
        let mut table = self.table.write().await;

        if table.rows.iter().any(|u| u.email == user.email) {
            return Err(AppError::DuplicateEmail(user.email.clone()));
        }

        let created = User {
            id: table.allocate_id(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            password_hash: user.password_hash.clone(),
            crea_date: Some(Utc::now()),
        };
        table.rows.push(created.clone());

        Ok(created)
    }

    async fn list_all(&self) -> AppResult<Vec<User>> {
        Ok(self.table.read().await.rows.clone())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryBookStore {
    table: RwLock<Table<Book>>,
}

impl InMemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookStore for InMemoryBookStore {
    async fn accession_number_exists(&self, accession_number: &str) -> AppResult<bool> {
        let table = self.table.read().await;
        Ok(table.rows.iter().any(|b| b.accession_number == accession_number))
    }

    async fn isbn_exists(&self, isbn: &str) -> AppResult<bool> {
        let table = self.table.read().await;
        Ok(table.rows.iter().any(|b| b.isbn == isbn))
    }

    async fn create(&self, book: &CreateBook, unique_isbn: bool) -> AppResult<Book> {
        let mut table = self.table.write().await;

        if table.rows.iter().any(|b| b.accession_number == book.accession_number) {
            return Err(AppError::DuplicateAccessionNumber(book.accession_number.clone()));
        }
        if unique_isbn && table.rows.iter().any(|b| b.isbn == book.isbn) {
            return Err(AppError::DuplicateIsbn(book.isbn.clone()));
        }

        let created = Book {
            id: table.allocate_id(),
            accession_number: book.accession_number.clone(),
            isbn: book.isbn.clone(),
            title: book.title.clone(),
            author: book.author.clone(),
            place_of_publication: book.place_of_publication.clone(),
            publisher: book.publisher.clone(),
            copyright: book.copyright.clone(),
            genre: book.genre.clone(),
            crea_date: Some(Utc::now()),
        };
        table.rows.push(created.clone());

        Ok(created)
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|b| b.id == id).cloned())
    }

    async fn list_all(&self) -> AppResult<Vec<Book>> {
        Ok(self.table.read().await.rows.clone())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryLibraryHoursStore {
    table: RwLock<Table<LibraryHours>>,
}

impl InMemoryLibraryHoursStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn by_time_in(mut rows: Vec<LibraryHours>) -> Vec<LibraryHours> {
    rows.sort_by(|a, b| a.time_in.cmp(&b.time_in).then(a.id.cmp(&b.id)));
    rows
}

#[async_trait]
impl LibraryHoursStore for InMemoryLibraryHoursStore {
    async fn create(&self, record: &NewLibraryHours) -> AppResult<LibraryHours> {
        let mut table = self.table.write().await;

        let created = LibraryHours {
            id: table.allocate_id(),
            id_number: record.id_number.clone(),
            time_in: record.time_in,
            time_out: record.time_out,
            book_title: None,
            version: 0,
        };
        table.rows.push(created.clone());

        Ok(created)
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<LibraryHours>> {
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|s| s.id == id).cloned())
    }

    async fn save(&self, record: &LibraryHours) -> AppResult<LibraryHours> {
        let mut table = self.table.write().await;

        let stored = table
            .rows
            .iter_mut()
            .find(|s| s.id == record.id)
            .ok_or(AppError::SessionNotFound(record.id))?;

        if stored.version != record.version {
            return Err(AppError::ConcurrentModification(record.id));
        }

        *stored = LibraryHours {
            version: record.version + 1,
            ..record.clone()
        };

        Ok(stored.clone())
    }

    async fn list_all(&self) -> AppResult<Vec<LibraryHours>> {
        Ok(by_time_in(self.table.read().await.rows.clone()))
    }

    async fn list_by_id_number(&self, id_number: &str) -> AppResult<Vec<LibraryHours>> {
        let table = self.table.read().await;
        let rows = table
            .rows
            .iter()
            .filter(|s| s.id_number == id_number)
            .cloned()
            .collect();
        Ok(by_time_in(rows))
    }
}
