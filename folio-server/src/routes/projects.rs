//! Project endpoints.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use folio_models::pagination::PageParams;
use folio_models::project::{Project, ProjectCategory, ProjectCreate, ProjectList, ProjectUpdate};
use folio_models::validate::ValidationErrors;
use folio_store::ProjectFilter;

use crate::error::ApiError;
use crate::state::AppState;

/// Query parameters for `GET /projects`.
#[derive(Debug, Deserialize)]
pub struct ProjectListQuery {
    page: Option<u32>,
    per_page: Option<u32>,
    category: Option<String>,
    featured: Option<bool>,
}

/// `POST /projects` - create a project (admin endpoint).
pub async fn create_project(
    State(state): State<AppState>,
    Json(input): Json<ProjectCreate>,
) -> Result<Json<Project>, ApiError> {
    Ok(Json(state.projects.create(input).await?))
}

/// `GET /projects` - page through projects in manual order.
pub async fn list_projects(
    State(state): State<AppState>,
    Query(query): Query<ProjectListQuery>,
) -> Result<Json<ProjectList>, ApiError> {
    let page = PageParams::new(query.page, query.per_page);
    page.validate()?;
    let filter = ProjectFilter {
        category: parse_category(query.category.as_deref())?,
        featured: query.featured,
    };
    Ok(Json(state.projects.list(&filter, page).await?))
}

/// `GET /projects/{id}` - fetch one project.
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Project>, ApiError> {
    Ok(Json(state.projects.get(&id).await?))
}

/// `PUT /projects/{id}` - update a project (admin endpoint).
pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<ProjectUpdate>,
) -> Result<Json<Project>, ApiError> {
    Ok(Json(state.projects.update(&id, update).await?))
}

/// `DELETE /projects/{id}` - remove a project (admin endpoint).
pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state.projects.delete(&id).await?;
    Ok(Json(json!({ "message": "Project deleted successfully" })))
}

fn parse_category(raw: Option<&str>) -> Result<Option<ProjectCategory>, ApiError> {
    match raw {
        None => Ok(None),
        Some(value) => match ProjectCategory::parse(value) {
            Some(category) => Ok(Some(category)),
            None => {
                let mut errors = ValidationErrors::new();
                errors.push(
                    "category",
                    format!("must be one of: {}", ProjectCategory::ALL.join(", ")),
                );
                Err(ApiError::from(errors))
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_category_accepts_known_values() {
        assert_eq!(
            parse_category(Some("AI/ML")).unwrap(),
            Some(ProjectCategory::AiMl)
        );
        assert_eq!(
            parse_category(Some("Full Stack")).unwrap(),
            Some(ProjectCategory::FullStack)
        );
    }

    #[test]
    fn test_parse_category_rejects_unknown_values() {
        assert!(parse_category(Some("Mobile")).is_err());
    }
}
