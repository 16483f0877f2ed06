//! MongoDB implementation of ContactRepository

use async_trait::async_trait;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Bson, doc, to_bson},
    options::IndexOptions,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ContactError, ContactResult};
use crate::models::{Contact, ContactFilter, ContactStatus, CreateContact};
use crate::repository::ContactRepository;

/// MongoDB implementation of the ContactRepository
pub struct MongoContactRepository {
    collection: Collection<Contact>,
}

impl MongoContactRepository {
    /// Create a new MongoContactRepository
    pub fn new(db: &Database) -> Self {
        let collection = db.collection::<Contact>("contacts");
        Self { collection }
    }

    /// Create a new MongoContactRepository with a custom collection name
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<Contact>(collection_name);
        Self { collection }
    }

    /// Initialize indexes for the admin inbox
    pub async fn init_indexes(&self) -> ContactResult<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "status": 1, "created_at": -1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_status_created".to_string())
                        .build(),
                )
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Contact indexes created successfully");
        Ok(())
    }

    /// Build a MongoDB filter document from ContactFilter
    fn build_filter(filter: &ContactFilter) -> mongodb::bson::Document {
        let mut doc = doc! {};

        if let Some(ref status) = filter.status {
            doc.insert("status", status.to_string());
        }

        doc
    }

    fn skip_for(page: u64, limit: i64) -> u64 {
        page.saturating_sub(1) * limit.max(0) as u64
    }
}

#[async_trait]
impl ContactRepository for MongoContactRepository {
    #[instrument(skip(self, input), fields(subject = %input.subject))]
    async fn create(&self, input: CreateContact) -> ContactResult<Contact> {
        let contact = Contact::new(input);

        self.collection.insert_one(&contact).await?;

        tracing::info!(contact_id = %contact.id, "Contact message created successfully");
        Ok(contact)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> ContactResult<Option<Contact>> {
        let filter = doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) };
        let contact = self.collection.find_one(filter).await?;
        Ok(contact)
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: ContactFilter) -> ContactResult<Vec<Contact>> {
        use futures_util::TryStreamExt;

        let mongo_filter = Self::build_filter(&filter);

        let options = mongodb::options::FindOptions::builder()
            .limit(filter.limit)
            .skip(Self::skip_for(filter.page, filter.limit))
            .sort(doc! { "created_at": -1 })
            .build();

        let cursor = self
            .collection
            .find(mongo_filter)
            .with_options(options)
            .await?;
        let contacts: Vec<Contact> = cursor.try_collect().await?;

        Ok(contacts)
    }

    #[instrument(skip(self))]
    async fn update_status(&self, id: Uuid, status: ContactStatus) -> ContactResult<Contact> {
        let filter = doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) };
        let mut existing = self
            .collection
            .find_one(filter.clone())
            .await?
            .ok_or(ContactError::NotFound(id))?;

        existing.status = status;
        existing.updated_at = chrono::Utc::now();

        self.collection.replace_one(filter, &existing).await?;

        tracing::info!(contact_id = %id, status = %status, "Contact status updated");
        Ok(existing)
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: ContactFilter) -> ContactResult<u64> {
        let mongo_filter = Self::build_filter(&filter);
        let count = self.collection.count_documents(mongo_filter).await?;
        Ok(count)
    }
}
