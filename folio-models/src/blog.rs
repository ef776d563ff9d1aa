//! Blog post entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use folio_core::constants::{limits, DEFAULT_AUTHOR};

use crate::validate::{check_length, check_length_opt, check_one_of, ValidationErrors};

/// Editorial category of a blog post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BlogCategory {
    #[serde(rename = "AI")]
    Ai,
    Backend,
    Frontend,
    #[default]
    General,
}

impl BlogCategory {
    /// All legal category values, as stored.
    pub const ALL: &'static [&'static str] = &["AI", "Backend", "Frontend", "General"];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlogCategory::Ai => "AI",
            BlogCategory::Backend => "Backend",
            BlogCategory::Frontend => "Frontend",
            BlogCategory::General => "General",
        }
    }

    /// Parse a stored category value. Unrecognized values yield None.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "AI" => Some(BlogCategory::Ai),
            "Backend" => Some(BlogCategory::Backend),
            "Frontend" => Some(BlogCategory::Frontend),
            "General" => Some(BlogCategory::General),
            _ => None,
        }
    }
}

/// A blog post as stored and served.
///
/// The slug is derived from the title at creation and kept unique across
/// the collection; it is the public lookup key for reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub author: String,
    pub category: BlogCategory,
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_time: Option<String>,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BlogPost {
    /// Build a freshly stamped record from validated input and a resolved
    /// slug. The author is fixed; unknown categories (unreachable after
    /// `validate`) fall back to the default.
    pub fn new(input: BlogCreate, slug: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: input.title,
            slug,
            excerpt: input.excerpt,
            content: input.content,
            author: DEFAULT_AUTHOR.to_string(),
            category: BlogCategory::parse(&input.category).unwrap_or_default(),
            tags: input.tags,
            image: input.image,
            read_time: input.read_time,
            published: input.published,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Incoming blog post creation payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogCreate {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub read_time: Option<String>,
    #[serde(default)]
    pub published: bool,
}

impl BlogCreate {
    /// Check every constraint, collecting all violations.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_length(&mut errors, "title", &self.title, limits::TITLE_MAX);
        check_length(&mut errors, "excerpt", &self.excerpt, limits::EXCERPT_MAX);
        if self.content.is_empty() {
            errors.push("content", "must not be empty");
        }
        check_one_of(&mut errors, "category", &self.category, BlogCategory::ALL);
        if self.tags.len() > limits::MAX_TAGS {
            errors.push("tags", format!("must have at most {} entries", limits::MAX_TAGS));
        }
        errors.into_result()
    }
}

/// Partial blog post update. Only supplied fields are applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlogUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
}

impl BlogUpdate {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_length_opt(&mut errors, "title", self.title.as_deref(), limits::TITLE_MAX);
        check_length_opt(
            &mut errors,
            "excerpt",
            self.excerpt.as_deref(),
            limits::EXCERPT_MAX,
        );
        if let Some(content) = &self.content {
            if content.is_empty() {
                errors.push("content", "must not be empty");
            }
        }
        if let Some(category) = &self.category {
            check_one_of(&mut errors, "category", category, BlogCategory::ALL);
        }
        if let Some(tags) = &self.tags {
            if tags.len() > limits::MAX_TAGS {
                errors.push("tags", format!("must have at most {} entries", limits::MAX_TAGS));
            }
        }
        errors.into_result()
    }

    /// Whether the partial carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.excerpt.is_none()
            && self.content.is_none()
            && self.category.is_none()
            && self.tags.is_none()
            && self.image.is_none()
            && self.read_time.is_none()
            && self.published.is_none()
    }
}

/// List envelope for blog queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogList {
    pub posts: Vec<BlogPost>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> BlogCreate {
        BlogCreate {
            title: "The Future of AI in Web Development".to_string(),
            excerpt: "How AI is reshaping the web development landscape.".to_string(),
            content: "Long form content goes here.".to_string(),
            category: "AI".to_string(),
            tags: vec!["AI".to_string(), "Web Development".to_string()],
            image: None,
            read_time: Some("8 min read".to_string()),
            published: true,
        }
    }

    #[test]
    fn test_new_stamps_author_and_ids() {
        let post = BlogPost::new(valid_input(), "the-future-of-ai".to_string());
        assert!(!post.id.is_empty());
        assert_eq!(post.author, "Amit");
        assert_eq!(post.slug, "the-future-of-ai");
        assert_eq!(post.category, BlogCategory::Ai);
        assert_eq!(post.created_at, post.updated_at);
    }

    #[test]
    fn test_valid_input_passes() {
        assert!(valid_input().validate().is_ok());
    }

    #[test]
    fn test_category_rejection_lists_legal_values() {
        let mut input = valid_input();
        input.category = "Lifestyle".to_string();
        let err = input.validate().unwrap_err();
        assert!(err.errors()[0]
            .message
            .contains("AI, Backend, Frontend, General"));
    }

    #[test]
    fn test_tag_cap() {
        let mut input = valid_input();
        input.tags = (0..11).map(|i| format!("tag-{i}")).collect();
        assert!(input.validate().is_err());
        input.tags.truncate(10);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_multiple_violations_collected() {
        let input = BlogCreate {
            title: String::new(),
            excerpt: "e".repeat(501),
            content: String::new(),
            category: "Nope".to_string(),
            tags: Vec::new(),
            image: None,
            read_time: None,
            published: false,
        };
        assert_eq!(input.validate().unwrap_err().len(), 4);
    }

    #[test]
    fn test_category_serde_uses_stored_names() {
        assert_eq!(serde_json::to_string(&BlogCategory::Ai).unwrap(), "\"AI\"");
        assert_eq!(
            serde_json::to_string(&BlogCategory::Backend).unwrap(),
            "\"Backend\""
        );
    }

    #[test]
    fn test_empty_update_detected() {
        assert!(BlogUpdate::default().is_empty());
        let update = BlogUpdate {
            published: Some(true),
            ..BlogUpdate::default()
        };
        assert!(!update.is_empty());
    }

    #[test]
    fn test_update_validates_supplied_fields_only() {
        let update = BlogUpdate {
            title: Some(String::new()),
            category: Some("Cooking".to_string()),
            ..BlogUpdate::default()
        };
        assert_eq!(update.validate().unwrap_err().len(), 2);
    }
}
