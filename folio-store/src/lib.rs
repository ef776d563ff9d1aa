//! Folio Store - Document store lifecycle and per-entity repositories.
//!
//! This crate owns everything that talks to MongoDB: connection setup and
//! teardown, index provisioning, startup seeding, and one repository per
//! entity (contacts, blog posts, projects). Repositories take the shared
//! [`Database`] handle by constructor injection; there is no ambient global
//! client. Every operation is a single round trip bounded by the
//! configured per-operation timeout.

pub mod blog;
pub mod contacts;
pub mod db;
pub mod projects;
pub mod seed;

// Re-export key types
pub use blog::{BlogFilter, BlogRepository};
pub use contacts::ContactRepository;
pub use db::Database;
pub use projects::{ProjectFilter, ProjectRepository};
