//! Folio Models - Entity models, validation, slug generation, and pagination.
//!
//! This crate owns the shape of the three entities (Contact, BlogPost,
//! Project), their create/update input types with full constraint
//! validation, the slug generator for blog post URLs, and the pagination
//! parameters shared by every list endpoint.

pub mod blog;
pub mod contact;
pub mod pagination;
pub mod project;
pub mod slug;
pub mod validate;

// Re-export key types
pub use blog::{BlogCategory, BlogCreate, BlogList, BlogPost, BlogUpdate};
pub use contact::{Contact, ContactCreate, ContactList, ContactStats, ContactStatus, ContactUpdate};
pub use pagination::PageParams;
pub use project::{Project, ProjectCategory, ProjectCreate, ProjectList, ProjectUpdate};
pub use validate::ValidationErrors;
