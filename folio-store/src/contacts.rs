//! Contact repository.

use std::collections::BTreeMap;

use futures::TryStreamExt;
use mongodb::bson::{doc, Bson, Document};
use mongodb::Collection;
use tracing::info;

use folio_core::error::{FolioError, FolioResult};
use folio_models::contact::{
    Contact, ContactCreate, ContactList, ContactStats, ContactStatus, ContactUpdate,
};
use folio_models::pagination::PageParams;

use crate::db::{now_bson, timed, Database};

/// Data access for contact-form submissions.
#[derive(Clone)]
pub struct ContactRepository {
    collection: Collection<Contact>,
    op_timeout: std::time::Duration,
}

impl ContactRepository {
    /// Build a repository over the injected store handle.
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.contacts(),
            op_timeout: db.op_timeout(),
        }
    }

    /// Validate and persist a new submission. Returns the stamped record.
    pub async fn create(&self, input: ContactCreate) -> FolioResult<Contact> {
        input.validate().map_err(FolioError::from)?;

        let contact = Contact::new(input);
        let result = timed(
            self.op_timeout,
            "contacts.insert",
            self.collection.insert_one(&contact),
        )
        .await?;
        if result.inserted_id == Bson::Null {
            return Err(FolioError::Storage(
                "insert reported no document".to_string(),
            ));
        }

        info!("new contact form submitted: {} <{}>", contact.name, contact.email);
        Ok(contact)
    }

    /// Page through submissions, newest first, optionally by status.
    /// `total` counts every match regardless of the page window.
    pub async fn list(
        &self,
        status: Option<ContactStatus>,
        page: PageParams,
    ) -> FolioResult<ContactList> {
        let filter = list_filter(status);

        let cursor = timed(
            self.op_timeout,
            "contacts.find",
            self.collection
                .find(filter.clone())
                .sort(doc! { "created_at": -1 })
                .skip(page.skip())
                .limit(page.limit()),
        )
        .await?;
        let contacts: Vec<Contact> =
            timed(self.op_timeout, "contacts.collect", cursor.try_collect()).await?;
        let total = timed(
            self.op_timeout,
            "contacts.count",
            self.collection.count_documents(filter),
        )
        .await?;

        Ok(ContactList {
            contacts,
            total,
            page: page.page,
            per_page: page.per_page,
        })
    }

    /// Look up a submission by identifier.
    pub async fn get(&self, id: &str) -> FolioResult<Contact> {
        timed(
            self.op_timeout,
            "contacts.find_one",
            self.collection.find_one(doc! { "id": id }),
        )
        .await?
        .ok_or_else(|| FolioError::NotFound("contact".to_string()))
    }

    /// Apply a partial update (status only) and refresh updated_at.
    pub async fn update(&self, id: &str, update: ContactUpdate) -> FolioResult<Contact> {
        update.validate().map_err(FolioError::from)?;
        if update.is_empty() {
            return Err(FolioError::NoChange);
        }

        // Existence first, so a bad id is a 404 rather than a no-op.
        self.get(id).await?;

        let mut set = update_document(&update);
        set.insert("updated_at", now_bson()?);

        let result = timed(
            self.op_timeout,
            "contacts.update",
            self.collection
                .update_one(doc! { "id": id }, doc! { "$set": set }),
        )
        .await?;
        if result.modified_count == 0 {
            return Err(FolioError::NoChange);
        }

        info!("contact {id} updated");
        self.get(id).await
    }

    /// Permanently remove a submission.
    pub async fn delete(&self, id: &str) -> FolioResult<()> {
        let result = timed(
            self.op_timeout,
            "contacts.delete",
            self.collection.delete_one(doc! { "id": id }),
        )
        .await?;
        if result.deleted_count == 0 {
            return Err(FolioError::NotFound("contact".to_string()));
        }

        info!("contact {id} deleted");
        Ok(())
    }

    /// Grouped status counts plus the overall total, in one aggregation.
    pub async fn stats(&self) -> FolioResult<ContactStats> {
        let pipeline = stats_pipeline();
        let cursor = timed(
            self.op_timeout,
            "contacts.aggregate",
            self.collection.aggregate(pipeline),
        )
        .await?;
        let groups: Vec<Document> =
            timed(self.op_timeout, "contacts.aggregate.collect", cursor.try_collect()).await?;

        let mut by_status = BTreeMap::new();
        for group in groups {
            let status = group.get_str("_id").unwrap_or_default().to_string();
            let count = match group.get("count") {
                Some(Bson::Int32(n)) => i64::from(*n),
                Some(Bson::Int64(n)) => *n,
                _ => 0,
            };
            by_status.insert(status, count);
        }

        let total_contacts = timed(
            self.op_timeout,
            "contacts.count",
            self.collection.count_documents(doc! {}),
        )
        .await?;

        Ok(ContactStats {
            total_contacts,
            by_status,
        })
    }
}

/// Conjunction of list predicates: empty filter, or an exact status match.
fn list_filter(status: Option<ContactStatus>) -> Document {
    let mut filter = Document::new();
    if let Some(status) = status {
        filter.insert("status", status.as_str());
    }
    filter
}

/// `$set` document for the supplied fields of a partial update.
fn update_document(update: &ContactUpdate) -> Document {
    let mut set = Document::new();
    if let Some(status) = &update.status {
        set.insert("status", status.as_str());
    }
    set
}

/// Group-by-status aggregation, sorted by status for stable output.
fn stats_pipeline() -> Vec<Document> {
    vec![
        doc! { "$group": { "_id": "$status", "count": { "$sum": 1 } } },
        doc! { "$sort": { "_id": 1 } },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_filter_empty_without_status() {
        assert!(list_filter(None).is_empty());
    }

    #[test]
    fn test_list_filter_exact_status_match() {
        let filter = list_filter(Some(ContactStatus::New));
        assert_eq!(filter.get_str("status").unwrap(), "new");
        assert_eq!(filter.len(), 1);
    }

    #[test]
    fn test_update_document_contains_only_supplied_fields() {
        let empty = update_document(&ContactUpdate::default());
        assert!(empty.is_empty());

        let set = update_document(&ContactUpdate {
            status: Some("responded".to_string()),
        });
        assert_eq!(set.get_str("status").unwrap(), "responded");
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_stats_pipeline_groups_then_sorts() {
        let pipeline = stats_pipeline();
        assert_eq!(pipeline.len(), 2);
        assert!(pipeline[0].contains_key("$group"));
        assert!(pipeline[1].contains_key("$sort"));
    }
}
