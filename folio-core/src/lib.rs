//! Folio Core - Foundation types, error handling, configuration, and logging.
//!
//! This crate provides the shared foundation used by all other portfolio
//! backend crates:
//! - Application configuration sourced from environment variables
//! - Global error types covering all error categories
//! - Structured logging with tracing
//! - Common constants and field limits

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;

// Re-export commonly used items at the crate root
pub use config::AppConfig;
pub use error::{FieldError, FolioError, FolioResult};
pub use logging::init_logging;
