//! Document store initialization, index provisioning, and lifecycle.
//!
//! Wraps a single process-wide MongoDB client opened once at startup and
//! shut down once at exit. Indexes are declared here, once, at startup.

use std::future::IntoFuture;
use std::time::Duration;

use chrono::Utc;
use mongodb::bson::{doc, to_bson, Bson};
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Collection, IndexModel};
use tracing::info;

use folio_core::config::StoreConfig;
use folio_core::constants::{collections, APP_NAME};
use folio_core::error::{FolioError, FolioResult};
use folio_models::blog::BlogPost;
use folio_models::contact::Contact;
use folio_models::project::Project;

/// Handle to the document store, shared by all repositories.
#[derive(Clone)]
pub struct Database {
    client: Client,
    db: mongodb::Database,
    op_timeout: Duration,
}

impl Database {
    /// Connect to the store and verify it is reachable with a ping.
    pub async fn connect(config: &StoreConfig) -> FolioResult<Self> {
        let mut options = ClientOptions::parse(&config.uri)
            .await
            .map_err(|e| FolioError::Config(format!("invalid connection string: {e}")))?;
        options.app_name = Some(APP_NAME.to_string());
        options.connect_timeout = Some(Duration::from_millis(config.connect_timeout_ms));
        options.server_selection_timeout = Some(Duration::from_millis(config.connect_timeout_ms));

        let client = Client::with_options(options)
            .map_err(|e| FolioError::Storage(format!("failed to build store client: {e}")))?;
        let db = client.database(&config.database);

        db.run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| FolioError::Storage(format!("document store unreachable: {e}")))?;

        info!("connected to document store (db={})", config.database);

        Ok(Self {
            client,
            db,
            op_timeout: Duration::from_millis(config.op_timeout_ms),
        })
    }

    /// The contacts collection.
    pub fn contacts(&self) -> Collection<Contact> {
        self.db.collection(collections::CONTACTS)
    }

    /// The blog posts collection.
    pub fn blog_posts(&self) -> Collection<BlogPost> {
        self.db.collection(collections::BLOG_POSTS)
    }

    /// The projects collection.
    pub fn projects(&self) -> Collection<Project> {
        self.db.collection(collections::PROJECTS)
    }

    /// Per-operation time bound applied by repositories.
    pub fn op_timeout(&self) -> Duration {
        self.op_timeout
    }

    /// Declare every index, once, at startup.
    ///
    /// Identifiers and slugs are unique; list filters (status, category,
    /// published, featured) and the created_at sort get secondary indexes;
    /// blog search gets a text index.
    pub async fn ensure_indexes(&self) -> FolioResult<()> {
        let unique = || IndexOptions::builder().unique(true).build();

        self.contacts()
            .create_indexes(vec![
                IndexModel::builder()
                    .keys(doc! { "id": 1 })
                    .options(unique())
                    .build(),
                IndexModel::builder().keys(doc! { "email": 1 }).build(),
                IndexModel::builder().keys(doc! { "created_at": 1 }).build(),
                IndexModel::builder().keys(doc! { "status": 1 }).build(),
            ])
            .await
            .map_err(|e| FolioError::Storage(format!("failed to create contact indexes: {e}")))?;

        self.blog_posts()
            .create_indexes(vec![
                IndexModel::builder()
                    .keys(doc! { "id": 1 })
                    .options(unique())
                    .build(),
                IndexModel::builder()
                    .keys(doc! { "slug": 1 })
                    .options(unique())
                    .build(),
                IndexModel::builder().keys(doc! { "category": 1 }).build(),
                IndexModel::builder().keys(doc! { "published": 1 }).build(),
                IndexModel::builder().keys(doc! { "created_at": 1 }).build(),
                IndexModel::builder()
                    .keys(doc! { "title": "text", "excerpt": "text", "content": "text" })
                    .build(),
            ])
            .await
            .map_err(|e| FolioError::Storage(format!("failed to create blog indexes: {e}")))?;

        self.projects()
            .create_indexes(vec![
                IndexModel::builder()
                    .keys(doc! { "id": 1 })
                    .options(unique())
                    .build(),
                IndexModel::builder().keys(doc! { "category": 1 }).build(),
                IndexModel::builder().keys(doc! { "featured": 1 }).build(),
                IndexModel::builder().keys(doc! { "order": 1 }).build(),
                IndexModel::builder().keys(doc! { "created_at": 1 }).build(),
            ])
            .await
            .map_err(|e| FolioError::Storage(format!("failed to create project indexes: {e}")))?;

        info!("document store indexes created");
        Ok(())
    }

    /// Close the store connection. Called once at shutdown.
    pub async fn shutdown(self) {
        self.client.shutdown().await;
        info!("disconnected from document store");
    }
}

/// Run a single store round trip under the per-operation time bound.
///
/// Driver errors surface as `Storage`; an elapsed timer surfaces as
/// `Timeout`. No retries anywhere: the caller may resubmit.
pub(crate) async fn timed<T, F>(limit: Duration, op: &str, fut: F) -> FolioResult<T>
where
    F: IntoFuture<Output = Result<T, mongodb::error::Error>>,
{
    match tokio::time::timeout(limit, fut.into_future()).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(FolioError::Storage(format!("{op}: {e}"))),
        Err(_) => Err(FolioError::Timeout(format!(
            "{op} exceeded {}ms",
            limit.as_millis()
        ))),
    }
}

/// Current time in the stored timestamp representation.
pub(crate) fn now_bson() -> FolioResult<Bson> {
    to_bson(&Utc::now()).map_err(|e| FolioError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_timed_passes_success_through() {
        let result = timed(Duration::from_secs(1), "noop", async { Ok::<_, mongodb::error::Error>(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_timed_maps_elapsed_to_timeout() {
        let result: FolioResult<()> = timed(Duration::from_millis(5), "slow", async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        })
        .await;
        match result {
            Err(FolioError::Timeout(msg)) => assert!(msg.contains("slow")),
            other => panic!("expected timeout, got {other:?}"),
        }
    }
}
