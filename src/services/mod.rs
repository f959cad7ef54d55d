//! Business logic services

pub mod assignment;
pub mod catalog;
pub mod library_hours;
pub mod password;
pub mod users;

use std::sync::Arc;

use crate::{
    config::{CatalogConfig, UsersConfig},
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub users: users::UsersService,
    pub catalog: catalog::CatalogService,
    pub library_hours: library_hours::LibraryHoursService,
    pub assignment: assignment::AssignmentService,
}

impl Services {
    /// Create all services over the given store handles
    pub fn new(
        repository: Repository,
        users_config: UsersConfig,
        catalog_config: CatalogConfig,
    ) -> Self {
        let catalog = catalog::CatalogService::new(repository.books, catalog_config);
        let library_hours = library_hours::LibraryHoursService::new(repository.library_hours);

        Self {
            users: users::UsersService::new(
                repository.users,
                Arc::new(password::Argon2Hasher::new()),
                users_config,
            ),
            assignment: assignment::AssignmentService::new(catalog.clone(), library_hours.clone()),
            catalog,
            library_hours,
        }
    }
}
