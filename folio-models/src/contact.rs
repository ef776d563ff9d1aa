//! Contact entity model.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use folio_core::constants::limits;

use crate::validate::{check_email, check_length, check_one_of, ValidationErrors};

/// Lifecycle status of a contact-form submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    #[default]
    New,
    Read,
    Responded,
}

impl ContactStatus {
    /// All legal status values, as stored.
    pub const ALL: &'static [&'static str] = &["new", "read", "responded"];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContactStatus::New => "new",
            ContactStatus::Read => "read",
            ContactStatus::Responded => "responded",
        }
    }

    /// Parse a stored status value. Unrecognized values yield None.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "new" => Some(ContactStatus::New),
            "read" => Some(ContactStatus::Read),
            "responded" => Some(ContactStatus::Responded),
            _ => None,
        }
    }
}

/// A contact-form submission as stored and served.
///
/// Created by the public form; mutated only through status updates by an
/// admin; removed only by an explicit delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub status: ContactStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contact {
    /// Build a freshly stamped record from validated input: new uuid,
    /// status `new`, both timestamps set to now.
    pub fn new(input: ContactCreate) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: input.name,
            email: input.email,
            subject: input.subject,
            message: input.message,
            status: ContactStatus::New,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Incoming contact-form submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactCreate {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactCreate {
    /// Check every constraint, collecting all violations.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_length(&mut errors, "name", &self.name, limits::CONTACT_NAME_MAX);
        check_email(&mut errors, "email", &self.email);
        check_length(&mut errors, "subject", &self.subject, limits::SUBJECT_MAX);
        check_length(&mut errors, "message", &self.message, limits::MESSAGE_MAX);
        errors.into_result()
    }
}

/// Partial contact update. Only the status is mutable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl ContactUpdate {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(status) = &self.status {
            check_one_of(&mut errors, "status", status, ContactStatus::ALL);
        }
        errors.into_result()
    }

    /// Whether the partial carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
    }
}

/// List envelope for contact queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactList {
    pub contacts: Vec<Contact>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
}

/// Aggregated contact counts for the admin dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactStats {
    pub total_contacts: u64,
    pub by_status: BTreeMap<String, i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> ContactCreate {
        ContactCreate {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            subject: "Project inquiry".to_string(),
            message: "I would like to discuss a project.".to_string(),
        }
    }

    #[test]
    fn test_new_stamps_id_status_and_timestamps() {
        let contact = Contact::new(valid_input());
        assert!(!contact.id.is_empty());
        assert_eq!(contact.status, ContactStatus::New);
        assert_eq!(contact.created_at, contact.updated_at);
    }

    #[test]
    fn test_distinct_ids_per_create() {
        let a = Contact::new(valid_input());
        let b = Contact::new(valid_input());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_valid_input_passes() {
        assert!(valid_input().validate().is_ok());
    }

    #[test]
    fn test_all_violations_collected() {
        let input = ContactCreate {
            name: String::new(),
            email: "nope".to_string(),
            subject: String::new(),
            message: "x".repeat(2001),
        };
        let err = input.validate().unwrap_err();
        assert_eq!(err.len(), 4);
    }

    #[test]
    fn test_status_serde_round_trip() {
        let json = serde_json::to_string(&ContactStatus::Responded).unwrap();
        assert_eq!(json, "\"responded\"");
        let parsed: ContactStatus = serde_json::from_str("\"read\"").unwrap();
        assert_eq!(parsed, ContactStatus::Read);
    }

    #[test]
    fn test_update_rejects_unknown_status() {
        let update = ContactUpdate {
            status: Some("archived".to_string()),
        };
        let err = update.validate().unwrap_err();
        assert!(err.errors()[0].message.contains("new, read, responded"));
    }

    #[test]
    fn test_empty_update_detected() {
        assert!(ContactUpdate::default().is_empty());
        assert!(!ContactUpdate {
            status: Some("read".to_string())
        }
        .is_empty());
    }
}
