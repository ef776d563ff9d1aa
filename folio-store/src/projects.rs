//! Project repository.

use futures::TryStreamExt;
use mongodb::bson::{doc, to_bson, Bson, Document};
use mongodb::Collection;
use tracing::info;

use folio_core::error::{FolioError, FolioResult};
use folio_models::pagination::PageParams;
use folio_models::project::{
    Project, ProjectCategory, ProjectCreate, ProjectList, ProjectUpdate,
};

use crate::db::{now_bson, timed, Database};

/// Predicates for project list queries, combined as a conjunction.
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    /// Exact category match.
    pub category: Option<ProjectCategory>,
    /// Restrict to featured projects.
    pub featured: Option<bool>,
}

/// Data access for portfolio projects.
#[derive(Clone)]
pub struct ProjectRepository {
    collection: Collection<Project>,
    op_timeout: std::time::Duration,
}

impl ProjectRepository {
    /// Build a repository over the injected store handle.
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.projects(),
            op_timeout: db.op_timeout(),
        }
    }

    /// Validate and persist a new project. Returns the stamped record.
    pub async fn create(&self, input: ProjectCreate) -> FolioResult<Project> {
        input.validate().map_err(FolioError::from)?;

        let project = Project::new(input);
        let result = timed(
            self.op_timeout,
            "projects.insert",
            self.collection.insert_one(&project),
        )
        .await?;
        if result.inserted_id == Bson::Null {
            return Err(FolioError::Storage(
                "insert reported no document".to_string(),
            ));
        }

        info!("new project created: {}", project.name);
        Ok(project)
    }

    /// Page through projects in manual order (then newest first) under the
    /// given predicates. `total` counts every match regardless of the page
    /// window.
    pub async fn list(&self, filter: &ProjectFilter, page: PageParams) -> FolioResult<ProjectList> {
        let query = list_filter(filter);

        let cursor = timed(
            self.op_timeout,
            "projects.find",
            self.collection
                .find(query.clone())
                .sort(doc! { "order": 1, "created_at": -1 })
                .skip(page.skip())
                .limit(page.limit()),
        )
        .await?;
        let projects: Vec<Project> =
            timed(self.op_timeout, "projects.collect", cursor.try_collect()).await?;
        let total = timed(
            self.op_timeout,
            "projects.count",
            self.collection.count_documents(query),
        )
        .await?;

        Ok(ProjectList {
            projects,
            total,
            page: page.page,
            per_page: page.per_page,
        })
    }

    /// Look up a project by identifier.
    pub async fn get(&self, id: &str) -> FolioResult<Project> {
        timed(
            self.op_timeout,
            "projects.find_one",
            self.collection.find_one(doc! { "id": id }),
        )
        .await?
        .ok_or_else(|| FolioError::NotFound("project".to_string()))
    }

    /// Apply a partial update and refresh updated_at.
    pub async fn update(&self, id: &str, update: ProjectUpdate) -> FolioResult<Project> {
        update.validate().map_err(FolioError::from)?;
        if update.is_empty() {
            return Err(FolioError::NoChange);
        }

        // Existence first, so a bad id is a 404 rather than a no-op.
        self.get(id).await?;

        let mut set = update_document(&update)?;
        set.insert("updated_at", now_bson()?);

        let result = timed(
            self.op_timeout,
            "projects.update",
            self.collection
                .update_one(doc! { "id": id }, doc! { "$set": set }),
        )
        .await?;
        if result.modified_count == 0 {
            return Err(FolioError::NoChange);
        }

        info!("project {id} updated");
        self.get(id).await
    }

    /// Permanently remove a project.
    pub async fn delete(&self, id: &str) -> FolioResult<()> {
        let result = timed(
            self.op_timeout,
            "projects.delete",
            self.collection.delete_one(doc! { "id": id }),
        )
        .await?;
        if result.deleted_count == 0 {
            return Err(FolioError::NotFound("project".to_string()));
        }

        info!("project {id} deleted");
        Ok(())
    }
}

/// Conjunction of list predicates.
fn list_filter(filter: &ProjectFilter) -> Document {
    let mut query = Document::new();
    if let Some(category) = filter.category {
        query.insert("category", category.as_str());
    }
    if let Some(featured) = filter.featured {
        query.insert("featured", featured);
    }
    query
}

/// `$set` document for the supplied fields of a partial update.
fn update_document(update: &ProjectUpdate) -> FolioResult<Document> {
    let mut set = Document::new();
    if let Some(name) = &update.name {
        set.insert("name", name.as_str());
    }
    if let Some(description) = &update.description {
        set.insert("description", description.as_str());
    }
    if let Some(stack) = &update.tech_stack {
        let value = to_bson(stack).map_err(|e| FolioError::Serialization(e.to_string()))?;
        set.insert("tech_stack", value);
    }
    if let Some(category) = &update.category {
        set.insert("category", category.as_str());
    }
    if let Some(image) = &update.image {
        set.insert("image", image.as_str());
    }
    if let Some(demo_url) = &update.demo_url {
        set.insert("demo_url", demo_url.as_str());
    }
    if let Some(github_url) = &update.github_url {
        set.insert("github_url", github_url.as_str());
    }
    if let Some(featured) = update.featured {
        set.insert("featured", featured);
    }
    if let Some(order) = update.order {
        set.insert("order", order);
    }
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_filter_defaults_to_empty_query() {
        assert!(list_filter(&ProjectFilter::default()).is_empty());
    }

    #[test]
    fn test_list_filter_is_a_conjunction() {
        let filter = ProjectFilter {
            category: Some(ProjectCategory::AiMl),
            featured: Some(true),
        };
        let query = list_filter(&filter);
        assert_eq!(query.get_str("category").unwrap(), "AI/ML");
        assert_eq!(query.get_bool("featured").unwrap(), true);
        assert_eq!(query.len(), 2);
    }

    #[test]
    fn test_update_document_contains_only_supplied_fields() {
        let update = ProjectUpdate {
            order: Some(3),
            featured: Some(false),
            ..ProjectUpdate::default()
        };
        let set = update_document(&update).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get_i32("order").unwrap(), 3);
        assert_eq!(set.get_bool("featured").unwrap(), false);
    }

    #[test]
    fn test_update_document_serializes_tech_stack() {
        let update = ProjectUpdate {
            tech_stack: Some(vec!["Rust".to_string()]),
            ..ProjectUpdate::default()
        };
        let set = update_document(&update).unwrap();
        assert_eq!(set.get_array("tech_stack").unwrap().len(), 1);
    }
}
