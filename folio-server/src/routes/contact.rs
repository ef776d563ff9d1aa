//! Contact endpoints.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use folio_models::contact::{Contact, ContactCreate, ContactList, ContactStats, ContactStatus, ContactUpdate};
use folio_models::pagination::PageParams;
use folio_models::validate::ValidationErrors;

use crate::error::ApiError;
use crate::state::AppState;

/// Query parameters for `GET /contact`.
#[derive(Debug, Deserialize)]
pub struct ContactListQuery {
    page: Option<u32>,
    per_page: Option<u32>,
    status: Option<String>,
}

/// `POST /contact` - submit a new contact form.
pub async fn create_contact(
    State(state): State<AppState>,
    Json(input): Json<ContactCreate>,
) -> Result<Json<Contact>, ApiError> {
    Ok(Json(state.contacts.create(input).await?))
}

/// `GET /contact` - page through submissions (admin endpoint).
pub async fn list_contacts(
    State(state): State<AppState>,
    Query(query): Query<ContactListQuery>,
) -> Result<Json<ContactList>, ApiError> {
    let page = PageParams::new(query.page, query.per_page);
    page.validate()?;
    let status = parse_status(query.status.as_deref())?;
    Ok(Json(state.contacts.list(status, page).await?))
}

/// `GET /contact/{id}` - fetch one submission.
pub async fn get_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Contact>, ApiError> {
    Ok(Json(state.contacts.get(&id).await?))
}

/// `PUT /contact/{id}` - update submission status (admin endpoint).
pub async fn update_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<ContactUpdate>,
) -> Result<Json<Contact>, ApiError> {
    Ok(Json(state.contacts.update(&id, update).await?))
}

/// `DELETE /contact/{id}` - remove a submission (admin endpoint).
pub async fn delete_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state.contacts.delete(&id).await?;
    Ok(Json(json!({ "message": "Contact deleted successfully" })))
}

/// `GET /contact/stats/summary` - grouped status counts (admin endpoint).
pub async fn contact_stats(
    State(state): State<AppState>,
) -> Result<Json<ContactStats>, ApiError> {
    Ok(Json(state.contacts.stats().await?))
}

fn parse_status(raw: Option<&str>) -> Result<Option<ContactStatus>, ApiError> {
    match raw {
        None => Ok(None),
        Some(value) => match ContactStatus::parse(value) {
            Some(status) => Ok(Some(status)),
            None => {
                let mut errors = ValidationErrors::new();
                errors.push(
                    "status",
                    format!("must be one of: {}", ContactStatus::ALL.join(", ")),
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
    fn test_parse_status_accepts_known_values() {
        assert_eq!(parse_status(None).unwrap(), None);
        assert_eq!(
            parse_status(Some("new")).unwrap(),
            Some(ContactStatus::New)
        );
        assert_eq!(
            parse_status(Some("responded")).unwrap(),
            Some(ContactStatus::Responded)
        );
    }

    #[test]
    fn test_parse_status_rejects_unknown_values() {
        assert!(parse_status(Some("archived")).is_err());
    }
}
