//! Router composition, CORS, and request tracing.

use axum::http::{header, HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use folio_core::constants::API_PREFIX;

use crate::routes::{blog, contact, health, projects};
use crate::state::AppState;

/// Build the full application router under the `/api` prefix.
pub fn build_router(state: AppState, cors_origins: &[String]) -> Router {
    let api = Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .route(
            "/contact",
            axum::routing::post(contact::create_contact).get(contact::list_contacts),
        )
        .route("/contact/stats/summary", get(contact::contact_stats))
        .route(
            "/contact/{id}",
            get(contact::get_contact)
                .put(contact::update_contact)
                .delete(contact::delete_contact),
        )
        .route(
            "/blog",
            axum::routing::post(blog::create_post).get(blog::list_posts),
        )
        .route("/blog/category/{category}", get(blog::posts_by_category))
        .route(
            "/blog/{key}",
            get(blog::get_post)
                .put(blog::update_post)
                .delete(blog::delete_post),
        )
        .route(
            "/projects",
            axum::routing::post(projects::create_project).get(projects::list_projects),
        )
        .route(
            "/projects/{id}",
            get(projects::get_project)
                .put(projects::update_project)
                .delete(projects::delete_project),
        )
        .with_state(state);

    Router::new()
        .nest(API_PREFIX, api)
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(cors_origins))
}

/// Build the CORS layer from the configured origin list. A single "*"
/// entry allows any origin; invalid entries are skipped with a warning.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let methods = [Method::GET, Method::POST, Method::PUT, Method::DELETE];

    if origins.iter().any(|o| o == "*") {
        return CorsLayer::new()
            .allow_methods(methods)
            .allow_headers([header::CONTENT_TYPE])
            .allow_origin(Any);
    }

    let mut parsed = Vec::new();
    for origin in origins {
        match HeaderValue::from_str(origin) {
            Ok(value) => parsed.push(value),
            Err(err) => tracing::warn!("ignoring invalid CORS origin '{origin}': {err}"),
        }
    }

    CorsLayer::new()
        .allow_methods(methods)
        .allow_headers([header::CONTENT_TYPE])
        .allow_origin(parsed)
}
