//! Book catalog service

use std::sync::Arc;

use validator::Validate;

use crate::{
    config::CatalogConfig,
    error::{AppError, AppResult},
    models::{Book, CreateBook},
    repository::BookStore,
};

#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn BookStore>,
    config: CatalogConfig,
}

impl CatalogService {
    pub fn new(store: Arc<dyn BookStore>, config: CatalogConfig) -> Self {
        Self { store, config }
    }

    /// Catalog a new book.
    /// Accession number uniqueness is checked first, then ISBN uniqueness
    /// when `enforce_unique_isbn` is set.
    pub async fn add(&self, candidate: CreateBook) -> AppResult<Book> {
        let book = candidate.trimmed();
        book.validate()?;

        if self.store.accession_number_exists(&book.accession_number).await? {
            tracing::warn!(
                "Catalog add rejected: accession number {} exists",
                book.accession_number
            );
            return Err(AppError::DuplicateAccessionNumber(book.accession_number));
        }

        if self.config.enforce_unique_isbn && self.store.isbn_exists(&book.isbn).await? {
            tracing::warn!("Catalog add rejected: ISBN {} exists", book.isbn);
            return Err(AppError::DuplicateIsbn(book.isbn));
        }

        let created = self.store.create(&book, self.config.enforce_unique_isbn).await?;
        tracing::info!(
            "Cataloged book id={} accession={}",
            created.id,
            created.accession_number
        );
        Ok(created)
    }

    /// List all books in insertion order
    pub async fn list_all(&self) -> AppResult<Vec<Book>> {
        self.store.list_all().await
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        self.store
            .get_by_id(id)
            .await?
            .ok_or(AppError::BookNotFound(id))
    }
}
