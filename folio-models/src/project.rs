//! Portfolio project entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use folio_core::constants::limits;

use crate::validate::{check_items, check_length, check_length_opt, check_one_of, ValidationErrors};

/// Showcase category of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectCategory {
    #[serde(rename = "AI/ML")]
    AiMl,
    #[serde(rename = "Full Stack")]
    FullStack,
}

impl ProjectCategory {
    /// All legal category values, as stored.
    pub const ALL: &'static [&'static str] = &["AI/ML", "Full Stack"];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectCategory::AiMl => "AI/ML",
            ProjectCategory::FullStack => "Full Stack",
        }
    }

    /// Parse a stored category value. Unrecognized values yield None.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "AI/ML" => Some(ProjectCategory::AiMl),
            "Full Stack" => Some(ProjectCategory::FullStack),
            _ => None,
        }
    }
}

/// A portfolio project as stored and served.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub tech_stack: Vec<String>,
    pub category: ProjectCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    pub featured: bool,
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Build a freshly stamped record from validated input. Unknown
    /// categories (unreachable after `validate`) fall back to Full Stack.
    pub fn new(input: ProjectCreate) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: input.name,
            description: input.description,
            tech_stack: input.tech_stack,
            category: ProjectCategory::parse(&input.category).unwrap_or(ProjectCategory::FullStack),
            image: input.image,
            demo_url: input.demo_url,
            github_url: input.github_url,
            featured: input.featured,
            order: input.order,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Incoming project creation payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectCreate {
    pub name: String,
    pub description: String,
    pub tech_stack: Vec<String>,
    pub category: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub demo_url: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub order: i32,
}

impl ProjectCreate {
    /// Check every constraint, collecting all violations.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_length(&mut errors, "name", &self.name, limits::PROJECT_NAME_MAX);
        check_length(
            &mut errors,
            "description",
            &self.description,
            limits::DESCRIPTION_MAX,
        );
        check_items(
            &mut errors,
            "tech_stack",
            self.tech_stack.len(),
            1,
            limits::MAX_TECH_STACK,
        );
        check_one_of(&mut errors, "category", &self.category, ProjectCategory::ALL);
        errors.into_result()
    }
}

/// Partial project update. Only supplied fields are applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tech_stack: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
}

impl ProjectUpdate {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_length_opt(&mut errors, "name", self.name.as_deref(), limits::PROJECT_NAME_MAX);
        check_length_opt(
            &mut errors,
            "description",
            self.description.as_deref(),
            limits::DESCRIPTION_MAX,
        );
        if let Some(stack) = &self.tech_stack {
            check_items(&mut errors, "tech_stack", stack.len(), 1, limits::MAX_TECH_STACK);
        }
        if let Some(category) = &self.category {
            check_one_of(&mut errors, "category", category, ProjectCategory::ALL);
        }
        errors.into_result()
    }

    /// Whether the partial carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.tech_stack.is_none()
            && self.category.is_none()
            && self.image.is_none()
            && self.demo_url.is_none()
            && self.github_url.is_none()
            && self.featured.is_none()
            && self.order.is_none()
    }
}

/// List envelope for project queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectList {
    pub projects: Vec<Project>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> ProjectCreate {
        ProjectCreate {
            name: "AI Chatbot Assistant".to_string(),
            description: "GPT-powered assistant integrated with a CRM.".to_string(),
            tech_stack: vec!["OpenAI".to_string(), "React".to_string()],
            category: "AI/ML".to_string(),
            image: None,
            demo_url: Some("https://example.com/demo".to_string()),
            github_url: None,
            featured: true,
            order: 1,
        }
    }

    #[test]
    fn test_new_stamps_record() {
        let project = Project::new(valid_input());
        assert!(!project.id.is_empty());
        assert_eq!(project.category, ProjectCategory::AiMl);
        assert_eq!(project.order, 1);
        assert_eq!(project.created_at, project.updated_at);
    }

    #[test]
    fn test_valid_input_passes() {
        assert!(valid_input().validate().is_ok());
    }

    #[test]
    fn test_empty_tech_stack_rejected() {
        let mut input = valid_input();
        input.tech_stack.clear();
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_tech_stack_cap() {
        let mut input = valid_input();
        input.tech_stack = (0..21).map(|i| format!("tool-{i}")).collect();
        assert!(input.validate().is_err());
        input.tech_stack.truncate(20);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_category_serde_uses_stored_names() {
        assert_eq!(
            serde_json::to_string(&ProjectCategory::AiMl).unwrap(),
            "\"AI/ML\""
        );
        assert_eq!(
            serde_json::to_string(&ProjectCategory::FullStack).unwrap(),
            "\"Full Stack\""
        );
    }

    #[test]
    fn test_category_rejection_lists_legal_values() {
        let mut input = valid_input();
        input.category = "Mobile".to_string();
        let err = input.validate().unwrap_err();
        assert!(err.errors()[0].message.contains("AI/ML, Full Stack"));
    }

    #[test]
    fn test_empty_update_detected() {
        assert!(ProjectUpdate::default().is_empty());
        let update = ProjectUpdate {
            order: Some(5),
            ..ProjectUpdate::default()
        };
        assert!(!update.is_empty());
    }
}
