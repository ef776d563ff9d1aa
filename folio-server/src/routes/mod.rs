//! Request handlers, one module per entity plus liveness probes.

pub mod blog;
pub mod contact;
pub mod health;
pub mod projects;
