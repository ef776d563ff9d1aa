//! Shared handler state.

use folio_store::{BlogRepository, ContactRepository, Database, ProjectRepository};

/// Repositories shared by every request handler.
///
/// Built once at startup from the injected store handle; cloning is cheap
/// (each repository holds a collection handle).
#[derive(Clone)]
pub struct AppState {
    pub contacts: ContactRepository,
    pub blog: BlogRepository,
    pub projects: ProjectRepository,
}

impl AppState {
    pub fn new(db: &Database) -> Self {
        Self {
            contacts: ContactRepository::new(db),
            blog: BlogRepository::new(db),
            projects: ProjectRepository::new(db),
        }
    }
}
