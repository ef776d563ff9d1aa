//! Folio Server - HTTP surface for the portfolio backend.
//!
//! Thin axum handlers over the repository layer: parameter extraction,
//! repository calls, and outcome-to-status translation. No business logic
//! lives here.

pub mod app;
pub mod error;
pub mod routes;
pub mod state;

// Re-export key types
pub use app::build_router;
pub use error::ApiError;
pub use state::AppState;
