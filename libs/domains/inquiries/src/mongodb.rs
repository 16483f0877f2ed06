//! MongoDB implementation of InquiryRepository

use async_trait::async_trait;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Bson, doc, to_bson},
    options::IndexOptions,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{InquiryError, InquiryResult};
use crate::models::{CreateInquiry, Inquiry, InquiryFilter, InquiryStatus};
use crate::repository::InquiryRepository;

/// MongoDB implementation of the InquiryRepository
pub struct MongoInquiryRepository {
    collection: Collection<Inquiry>,
}

impl MongoInquiryRepository {
    /// Create a new MongoInquiryRepository
    pub fn new(db: &Database) -> Self {
        let collection = db.collection::<Inquiry>("inquiries");
        Self { collection }
    }

    /// Create a new MongoInquiryRepository with a custom collection name
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<Inquiry>(collection_name);
        Self { collection }
    }

    /// Initialize indexes for the admin inbox and per-listing views
    pub async fn init_indexes(&self) -> InquiryResult<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "listing_id": 1, "created_at": -1 })
                .options(
                    IndexOptions::builder()
                        .sparse(true)
                        .name("idx_listing".to_string())
                        .build(),
                )
                .build(),
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
        tracing::info!("Inquiry indexes created successfully");
        Ok(())
    }

    /// Build a MongoDB filter document from InquiryFilter
    fn build_filter(filter: &InquiryFilter) -> mongodb::bson::Document {
        let mut doc = doc! {};

        if let Some(ref status) = filter.status {
            doc.insert("status", status.to_string());
        }

        if let Some(listing_id) = filter.listing_id {
            doc.insert("listing_id", to_bson(&listing_id).unwrap_or(Bson::Null));
        }

        doc
    }

    fn skip_for(page: u64, limit: i64) -> u64 {
        page.saturating_sub(1) * limit.max(0) as u64
    }
}

#[async_trait]
impl InquiryRepository for MongoInquiryRepository {
    #[instrument(skip(self, input), fields(listing_title = %input.listing_title))]
    async fn create(&self, input: CreateInquiry) -> InquiryResult<Inquiry> {
        let inquiry = Inquiry::new(input);

        self.collection.insert_one(&inquiry).await?;

        tracing::info!(inquiry_id = %inquiry.id, "Inquiry created successfully");
        Ok(inquiry)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> InquiryResult<Option<Inquiry>> {
        let filter = doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) };
        let inquiry = self.collection.find_one(filter).await?;
        Ok(inquiry)
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: InquiryFilter) -> InquiryResult<Vec<Inquiry>> {
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
        let inquiries: Vec<Inquiry> = cursor.try_collect().await?;

        Ok(inquiries)
    }

    #[instrument(skip(self))]
    async fn list_by_listing(&self, listing_id: Uuid) -> InquiryResult<Vec<Inquiry>> {
        use futures_util::TryStreamExt;

        let filter = doc! { "listing_id": to_bson(&listing_id).unwrap_or(Bson::Null) };

        let options = mongodb::options::FindOptions::builder()
            .sort(doc! { "created_at": -1 })
            .build();

        let cursor = self.collection.find(filter).with_options(options).await?;
        let inquiries: Vec<Inquiry> = cursor.try_collect().await?;

        Ok(inquiries)
    }

    #[instrument(skip(self))]
    async fn update_status(&self, id: Uuid, status: InquiryStatus) -> InquiryResult<Inquiry> {
        let filter = doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) };
        let mut existing = self
            .collection
            .find_one(filter.clone())
            .await?
            .ok_or(InquiryError::NotFound(id))?;

        existing.status = status;
        existing.updated_at = chrono::Utc::now();

        self.collection.replace_one(filter, &existing).await?;

        tracing::info!(inquiry_id = %id, status = %status, "Inquiry status updated");
        Ok(existing)
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: InquiryFilter) -> InquiryResult<u64> {
        let mongo_filter = Self::build_filter(&filter);
        let count = self.collection.count_documents(mongo_filter).await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_empty() {
        let filter = InquiryFilter::default();
        let doc = MongoInquiryRepository::build_filter(&filter);
        assert!(doc.is_empty());
    }

    #[test]
    fn test_build_filter_with_status() {
        let filter = InquiryFilter {
            status: Some(InquiryStatus::New),
            ..Default::default()
        };
        let doc = MongoInquiryRepository::build_filter(&filter);
        assert_eq!(doc.get_str("status").unwrap(), "new");
    }

    #[test]
    fn test_build_filter_with_listing_id() {
        let filter = InquiryFilter {
            listing_id: Some(Uuid::new_v4()),
            ..Default::default()
        };
        let doc = MongoInquiryRepository::build_filter(&filter);
        assert!(doc.contains_key("listing_id"));
    }
}
