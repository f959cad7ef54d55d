//! Books repository for database operations

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres};

use super::{violated_unique_constraint, BookStore};
use crate::{
    error::{AppError, AppResult},
    models::{Book, CreateBook},
};

const ACCESSION_NUMBER_CONSTRAINT: &str = "books_accession_number_key";

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for BooksRepository {
    async fn accession_number_exists(&self, accession_number: &str) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE accession_number = $1)")
                .bind(accession_number)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn isbn_exists(&self, isbn: &str) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE isbn = $1)")
            .bind(isbn)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    /// Create a new book.
    ///
    /// Accession numbers are guarded by a unique constraint. ISBN uniqueness is
    /// a deployment choice, so instead of a constraint concurrent inserts of the
    /// same ISBN are serialized with a transaction-scoped advisory lock.
    async fn create(&self, book: &CreateBook, unique_isbn: bool) -> AppResult<Book> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        if unique_isbn {
            sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
                .bind(&book.isbn)
                .execute(&mut *tx)
                .await?;

            let accession_taken: bool =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE accession_number = $1)")
                    .bind(&book.accession_number)
                    .fetch_one(&mut *tx)
                    .await?;
            if accession_taken {
                return Err(AppError::DuplicateAccessionNumber(book.accession_number.clone()));
            }

            let isbn_taken: bool =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE isbn = $1)")
                    .bind(&book.isbn)
                    .fetch_one(&mut *tx)
                    .await?;
            if isbn_taken {
                return Err(AppError::DuplicateIsbn(book.isbn.clone()));
            }
        }

        let created = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (
                accession_number, isbn, title, author, place_of_publication,
                publisher, copyright, genre, crea_date
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(&book.accession_number)
        .bind(&book.isbn)
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.place_of_publication)
        .bind(&book.publisher)
        .bind(&book.copyright)
        .bind(&book.genre)
        .bind(now)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match violated_unique_constraint(&e).as_deref() {
            Some(ACCESSION_NUMBER_CONSTRAINT) => {
                AppError::DuplicateAccessionNumber(book.accession_number.clone())
            }
            _ => AppError::Database(e),
        })?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    async fn list_all(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>("SELECT * FROM books ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }
}
