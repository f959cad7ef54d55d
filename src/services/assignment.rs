//! Book-to-session assignment

use crate::{
    error::AppResult,
    models::{AssignmentConfirmation, LibraryHours},
    services::{catalog::CatalogService, library_hours::LibraryHoursService},
};

#[derive(Clone)]
pub struct AssignmentService {
    catalog: CatalogService,
    library_hours: LibraryHoursService,
}

impl AssignmentService {
    pub fn new(catalog: CatalogService, library_hours: LibraryHoursService) -> Self {
        Self {
            catalog,
            library_hours,
        }
    }

    /// Copy a book's current title onto a library hours session.
    ///
    /// The book is resolved first, then the session. The save is
    /// version-checked, so a session changed since it was read is not
    /// overwritten. The book itself is never written.
    pub async fn assign(&self, book_id: i32, session_id: i32) -> AppResult<AssignmentConfirmation> {
        let book = self.catalog.get_by_id(book_id).await?;
        let session = self.library_hours.get_by_id(session_id).await?;

        let saved = self
            .library_hours
            .save(&LibraryHours {
                book_title: Some(book.title.clone()),
                ..session
            })
            .await?;

        tracing::info!(
            "Assigned book id={} to library hours id={} (version {})",
            book.id,
            saved.id,
            saved.version
        );

        Ok(AssignmentConfirmation {
            message: format!(
                "Book \"{}\" assigned to library hours session {}",
                book.title, saved.id
            ),
            book_id: book.id,
            session_id: saved.id,
            book_title: book.title,
        })
    }
}
