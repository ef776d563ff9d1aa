//! Blog post repository.
//!
//! Owns the slug uniqueness invariant: slugs are computed from titles at
//! creation, recomputed when a title changes, and collision-suffixed with
//! epoch seconds whenever the computed slug already belongs to a different
//! post. Reads are keyed by slug; writes and deletes by identifier.

use chrono::Utc;
use futures::TryStreamExt;
use mongodb::bson::{doc, to_bson, Bson, Document};
use mongodb::Collection;
use tracing::info;

use folio_core::error::{FolioError, FolioResult};
use folio_models::blog::{BlogCategory, BlogCreate, BlogList, BlogPost, BlogUpdate};
use folio_models::pagination::PageParams;
use folio_models::slug::{disambiguate, slugify};

use crate::db::{now_bson, timed, Database};

/// Predicates for blog list queries, combined as a conjunction.
#[derive(Debug, Clone, Default)]
pub struct BlogFilter {
    /// Exact category match.
    pub category: Option<BlogCategory>,
    /// Restrict to published posts.
    pub published_only: bool,
    /// Case-insensitive substring match across title, excerpt, and tags.
    pub search: Option<String>,
}

/// Data access for blog posts.
#[derive(Clone)]
pub struct BlogRepository {
    collection: Collection<BlogPost>,
    op_timeout: std::time::Duration,
}

impl BlogRepository {
    /// Build a repository over the injected store handle.
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.blog_posts(),
            op_timeout: db.op_timeout(),
        }
    }

    /// Validate and persist a new post, resolving the slug first.
    pub async fn create(&self, input: BlogCreate) -> FolioResult<BlogPost> {
        input.validate().map_err(FolioError::from)?;

        let mut slug = slugify(&input.title);
        let collision = timed(
            self.op_timeout,
            "blog.find_slug",
            self.collection.find_one(doc! { "slug": slug.as_str() }),
        )
        .await?;
        if collision.is_some() {
            slug = disambiguate(&slug, Utc::now().timestamp());
        }

        let post = BlogPost::new(input, slug);
        let result = timed(
            self.op_timeout,
            "blog.insert",
            self.collection.insert_one(&post),
        )
        .await?;
        if result.inserted_id == Bson::Null {
            return Err(FolioError::Storage(
                "insert reported no document".to_string(),
            ));
        }

        info!("new blog post created: {}", post.title);
        Ok(post)
    }

    /// Page through posts, newest first, under the given predicates.
    /// `total` counts every match regardless of the page window.
    pub async fn list(&self, filter: &BlogFilter, page: PageParams) -> FolioResult<BlogList> {
        self.list_with(list_filter(filter), page).await
    }

    /// Published posts in one category, newest first.
    pub async fn list_by_category(
        &self,
        category: BlogCategory,
        page: PageParams,
    ) -> FolioResult<BlogList> {
        self.list_with(category_filter(category), page).await
    }

    async fn list_with(&self, filter: Document, page: PageParams) -> FolioResult<BlogList> {
        let cursor = timed(
            self.op_timeout,
            "blog.find",
            self.collection
                .find(filter.clone())
                .sort(doc! { "created_at": -1 })
                .skip(page.skip())
                .limit(page.limit()),
        )
        .await?;
        let posts: Vec<BlogPost> =
            timed(self.op_timeout, "blog.collect", cursor.try_collect()).await?;
        let total = timed(
            self.op_timeout,
            "blog.count",
            self.collection.count_documents(filter),
        )
        .await?;

        Ok(BlogList {
            posts,
            total,
            page: page.page,
            per_page: page.per_page,
        })
    }

    /// Look up a post by its public slug.
    pub async fn get_by_slug(&self, slug: &str) -> FolioResult<BlogPost> {
        timed(
            self.op_timeout,
            "blog.find_one",
            self.collection.find_one(doc! { "slug": slug }),
        )
        .await?
        .ok_or_else(|| FolioError::NotFound("blog post".to_string()))
    }

    /// Apply a partial update by identifier, recomputing the slug when the
    /// title changes and always refreshing updated_at.
    pub async fn update(&self, id: &str, update: BlogUpdate) -> FolioResult<BlogPost> {
        update.validate().map_err(FolioError::from)?;
        if update.is_empty() {
            return Err(FolioError::NoChange);
        }

        // Existence first, so a bad id is a 404 rather than a no-op.
        self.find_by_id(id).await?;

        let mut set = update_document(&update)?;
        if let Some(title) = &update.title {
            let mut slug = slugify(title);
            // Collision check excludes the post being updated.
            let collision = timed(
                self.op_timeout,
                "blog.find_slug",
                self.collection
                    .find_one(doc! { "slug": slug.as_str(), "id": { "$ne": id } }),
            )
            .await?;
            if collision.is_some() {
                slug = disambiguate(&slug, Utc::now().timestamp());
            }
            set.insert("slug", slug);
        }
        set.insert("updated_at", now_bson()?);

        let result = timed(
            self.op_timeout,
            "blog.update",
            self.collection
                .update_one(doc! { "id": id }, doc! { "$set": set }),
        )
        .await?;
        if result.modified_count == 0 {
            return Err(FolioError::NoChange);
        }

        info!("blog post {id} updated");
        self.find_by_id(id).await
    }

    /// Permanently remove a post by identifier.
    pub async fn delete(&self, id: &str) -> FolioResult<()> {
        let result = timed(
            self.op_timeout,
            "blog.delete",
            self.collection.delete_one(doc! { "id": id }),
        )
        .await?;
        if result.deleted_count == 0 {
            return Err(FolioError::NotFound("blog post".to_string()));
        }

        info!("blog post {id} deleted");
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> FolioResult<BlogPost> {
        timed(
            self.op_timeout,
            "blog.find_one",
            self.collection.find_one(doc! { "id": id }),
        )
        .await?
        .ok_or_else(|| FolioError::NotFound("blog post".to_string()))
    }
}

/// Conjunction of list predicates.
fn list_filter(filter: &BlogFilter) -> Document {
    let mut query = Document::new();
    if filter.published_only {
        query.insert("published", true);
    }
    if let Some(category) = filter.category {
        query.insert("category", category.as_str());
    }
    if let Some(search) = &filter.search {
        let pattern = doc! { "$regex": search.as_str(), "$options": "i" };
        query.insert(
            "$or",
            vec![
                doc! { "title": pattern.clone() },
                doc! { "excerpt": pattern.clone() },
                doc! { "tags": pattern },
            ],
        );
    }
    query
}

/// Published posts within one category.
fn category_filter(category: BlogCategory) -> Document {
    doc! { "category": category.as_str(), "published": true }
}

/// `$set` document for the supplied fields of a partial update. The slug
/// is handled separately because it needs a store round trip.
fn update_document(update: &BlogUpdate) -> FolioResult<Document> {
    let mut set = Document::new();
    if let Some(title) = &update.title {
        set.insert("title", title.as_str());
    }
    if let Some(excerpt) = &update.excerpt {
        set.insert("excerpt", excerpt.as_str());
    }
    if let Some(content) = &update.content {
        set.insert("content", content.as_str());
    }
    if let Some(category) = &update.category {
        set.insert("category", category.as_str());
    }
    if let Some(tags) = &update.tags {
        let value = to_bson(tags).map_err(|e| FolioError::Serialization(e.to_string()))?;
        set.insert("tags", value);
    }
    if let Some(image) = &update.image {
        set.insert("image", image.as_str());
    }
    if let Some(read_time) = &update.read_time {
        set.insert("read_time", read_time.as_str());
    }
    if let Some(published) = update.published {
        set.insert("published", published);
    }
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_filter_defaults_to_empty_query() {
        assert!(list_filter(&BlogFilter::default()).is_empty());
    }

    #[test]
    fn test_list_filter_is_a_conjunction() {
        let filter = BlogFilter {
            category: Some(BlogCategory::Backend),
            published_only: true,
            search: None,
        };
        let query = list_filter(&filter);
        assert_eq!(query.get_bool("published").unwrap(), true);
        assert_eq!(query.get_str("category").unwrap(), "Backend");
        assert_eq!(query.len(), 2);
    }

    #[test]
    fn test_search_spans_title_excerpt_and_tags() {
        let filter = BlogFilter {
            category: None,
            published_only: false,
            search: Some("fastapi".to_string()),
        };
        let query = list_filter(&filter);
        let or = query.get_array("$or").unwrap();
        assert_eq!(or.len(), 3);
        let first = or[0].as_document().unwrap();
        let title = first.get_document("title").unwrap();
        assert_eq!(title.get_str("$regex").unwrap(), "fastapi");
        assert_eq!(title.get_str("$options").unwrap(), "i");
    }

    #[test]
    fn test_category_filter_is_published_only() {
        let query = category_filter(BlogCategory::Ai);
        assert_eq!(query.get_str("category").unwrap(), "AI");
        assert_eq!(query.get_bool("published").unwrap(), true);
    }

    #[test]
    fn test_update_document_contains_only_supplied_fields() {
        let update = BlogUpdate {
            excerpt: Some("new excerpt".to_string()),
            published: Some(false),
            ..BlogUpdate::default()
        };
        let set = update_document(&update).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get_str("excerpt").unwrap(), "new excerpt");
        assert_eq!(set.get_bool("published").unwrap(), false);
        assert!(!set.contains_key("slug"));
    }

    #[test]
    fn test_update_document_serializes_tags() {
        let update = BlogUpdate {
            tags: Some(vec!["Rust".to_string(), "Axum".to_string()]),
            ..BlogUpdate::default()
        };
        let set = update_document(&update).unwrap();
        assert_eq!(set.get_array("tags").unwrap().len(), 2);
    }
}
