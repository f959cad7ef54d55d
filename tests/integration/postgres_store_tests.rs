//! PostgreSQL store tests
//!
//! Need a reachable database in `DATABASE_URL`; migrations are applied on
//! connect. Values are suffixed per run so the tests can share a database.

use chrono::Utc;
use sqlx::postgres::PgPoolOptions;
use wildtrack_server::{
    error::AppError,
    models::{CreateBook, LibraryHours, NewLibraryHours, NewUser},
    repository::Repository,
};

async fn connect() -> Repository {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .expect("Failed to connect to database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    Repository::postgres(pool)
}

fn unique(prefix: &str) -> String {
    format!(
        "{}-{}",
        prefix,
        Utc::now().timestamp_nanos_opt().unwrap_or_default()
    )
}

fn book(accession_number: &str, isbn: &str) -> CreateBook {
    CreateBook {
        accession_number: accession_number.to_string(),
        isbn: isbn.to_string(),
        title: "T1".to_string(),
        ..Default::default()
    }
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_duplicate_email_maps_constraint() {
    let repository = connect().await;
    let email = format!("{}@x.com", unique("reader"));
    let user = NewUser {
        email: email.clone(),
        first_name: "A".to_string(),
        last_name: "B".to_string(),
        password_hash: "$argon2id$placeholder".to_string(),
    };

    let created = repository.users.create(&user).await.unwrap();
    assert_eq!(created.email, email);
    assert!(repository.users.email_exists(&email).await.unwrap());

    let err = repository.users.create(&user).await.unwrap_err();
    assert!(matches!(err, AppError::DuplicateEmail(e) if e == email));
}

#[tokio::test]
#[ignore]
async fn test_duplicate_accession_number_maps_constraint() {
    let repository = connect().await;
    let accession = unique("ACC");

    repository
        .books
        .create(&book(&accession, &unique("ISBN-A")), false)
        .await
        .unwrap();

    let err = repository
        .books
        .create(&book(&accession, &unique("ISBN-B")), false)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::DuplicateAccessionNumber(a) if a == accession));
}

#[tokio::test]
#[ignore]
async fn test_concurrent_isbn_inserts_admit_one() {
    let repository = connect().await;
    let isbn = unique("ISBN");

    let first = book(&unique("ACC-1"), &isbn);
    let second = book(&unique("ACC-2"), &isbn);
    let (a, b) = tokio::join!(
        repository.books.create(&first, true),
        repository.books.create(&second, true),
    );

    let results = [a, b];
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results
        .iter()
        .any(|r| matches!(r, Err(AppError::DuplicateIsbn(i)) if *i == isbn)));
}

#[tokio::test]
#[ignore]
async fn test_isbn_not_enforced_allows_duplicates() {
    let repository = connect().await;
    let isbn = unique("ISBN");

    for prefix in ["ACC-1", "ACC-2"] {
        repository
            .books
            .create(&book(&unique(prefix), &isbn), false)
            .await
            .unwrap();
    }
    assert!(repository.books.isbn_exists(&isbn).await.unwrap());
}

#[tokio::test]
#[ignore]
async fn test_session_save_checks_version() {
    let repository = connect().await;
    let session = repository
        .library_hours
        .create(&NewLibraryHours {
            id_number: unique("2021"),
            time_in: Utc::now(),
            time_out: None,
        })
        .await
        .unwrap();

    let saved = repository
        .library_hours
        .save(&LibraryHours {
            book_title: Some("T1".to_string()),
            ..session.clone()
        })
        .await
        .unwrap();
    assert_eq!(saved.version, session.version + 1);
    assert_eq!(saved.book_title.as_deref(), Some("T1"));

    let err = repository
        .library_hours
        .save(&LibraryHours {
            book_title: Some("T2".to_string()),
            ..session.clone()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ConcurrentModification(id) if id == session.id));

    let err = repository
        .library_hours
        .save(&LibraryHours {
            id: i32::MAX,
            ..saved
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::SessionNotFound(id) if id == i32::MAX));

    let reread = repository
        .library_hours
        .get_by_id(session.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reread.book_title.as_deref(), Some("T1"));
}
