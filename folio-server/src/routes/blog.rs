//! Blog endpoints.
//!
//! Reads are keyed by slug; writes and deletes by identifier.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use folio_models::blog::{BlogCategory, BlogCreate, BlogList, BlogPost, BlogUpdate};
use folio_models::pagination::PageParams;
use folio_models::validate::ValidationErrors;
use folio_store::BlogFilter;

use crate::error::ApiError;
use crate::state::AppState;

/// Query parameters for `GET /blog`.
#[derive(Debug, Deserialize)]
pub struct BlogListQuery {
    page: Option<u32>,
    per_page: Option<u32>,
    category: Option<String>,
    /// Defaults to true: the public site only sees published posts.
    published_only: Option<bool>,
    search: Option<String>,
}

/// Query parameters for `GET /blog/category/{category}`.
#[derive(Debug, Deserialize)]
pub struct CategoryPageQuery {
    page: Option<u32>,
    per_page: Option<u32>,
}

/// `POST /blog` - create a post (admin endpoint).
pub async fn create_post(
    State(state): State<AppState>,
    Json(input): Json<BlogCreate>,
) -> Result<Json<BlogPost>, ApiError> {
    Ok(Json(state.blog.create(input).await?))
}

/// `GET /blog` - page through posts with filtering and search.
pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<BlogListQuery>,
) -> Result<Json<BlogList>, ApiError> {
    let page = PageParams::new(query.page, query.per_page);
    page.validate()?;
    let filter = BlogFilter {
        category: parse_category(query.category.as_deref())?,
        published_only: query.published_only.unwrap_or(true),
        search: query.search,
    };
    Ok(Json(state.blog.list(&filter, page).await?))
}

/// `GET /blog/{slug}` - fetch one post by its public slug.
pub async fn get_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<BlogPost>, ApiError> {
    Ok(Json(state.blog.get_by_slug(&slug).await?))
}

/// `PUT /blog/{id}` - update a post (admin endpoint).
pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<BlogUpdate>,
) -> Result<Json<BlogPost>, ApiError> {
    Ok(Json(state.blog.update(&id, update).await?))
}

/// `DELETE /blog/{id}` - remove a post (admin endpoint).
pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state.blog.delete(&id).await?;
    Ok(Json(json!({ "message": "Blog post deleted successfully" })))
}

/// `GET /blog/category/{category}` - published posts in one category.
pub async fn posts_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
    Query(query): Query<CategoryPageQuery>,
) -> Result<Json<BlogList>, ApiError> {
    let page = PageParams::new(query.page, query.per_page);
    page.validate()?;
    let category = require_category(&category)?;
    Ok(Json(state.blog.list_by_category(category, page).await?))
}

fn parse_category(raw: Option<&str>) -> Result<Option<BlogCategory>, ApiError> {
    match raw {
        None => Ok(None),
        Some(value) => require_category(value).map(Some),
    }
}

fn require_category(value: &str) -> Result<BlogCategory, ApiError> {
    BlogCategory::parse(value).ok_or_else(|| {
        let mut errors = ValidationErrors::new();
        errors.push(
            "category",
            format!("must be one of: {}", BlogCategory::ALL.join(", ")),
        );
        ApiError::from(errors)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_category_accepts_known_values() {
        assert_eq!(parse_category(None).unwrap(), None);
        assert_eq!(
            parse_category(Some("AI")).unwrap(),
            Some(BlogCategory::Ai)
        );
        assert_eq!(
            parse_category(Some("General")).unwrap(),
            Some(BlogCategory::General)
        );
    }

    #[test]
    fn test_parse_category_rejects_unknown_values() {
        assert!(parse_category(Some("Lifestyle")).is_err());
        assert!(require_category("ai").is_err());
    }
}
