//! Data models for WildTrack

pub mod book;
pub mod library_hours;
pub mod user;

// Re-export commonly used types
pub use book::{Book, CreateBook};
pub use library_hours::{AssignmentConfirmation, CreateLibraryHours, LibraryHours, NewLibraryHours};
pub use user::{CreateUser, NewUser, User};
