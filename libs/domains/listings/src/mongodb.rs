//! MongoDB implementation of ListingRepository

use async_trait::async_trait;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Bson, doc, to_bson},
    options::IndexOptions,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ListingError, ListingResult};
use crate::models::{CreateListing, Listing, ListingFilter, UpdateListing};
use crate::repository::ListingRepository;

/// MongoDB implementation of the ListingRepository
pub struct MongoListingRepository {
    collection: Collection<Listing>,
}

/// Whether a driver error is a unique-index violation (duplicate key).
///
/// The unique index on `slug` turns the losing side of a concurrent
/// allocation into this error; callers map it to `DuplicateSlug` so the
/// service can reallocate and retry.
fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    use mongodb::error::{ErrorKind, WriteFailure};

    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == 11000,
        ErrorKind::Command(command_error) => command_error.code == 11000,
        _ => false,
    }
}

impl MongoListingRepository {
    /// Create a new MongoListingRepository
    pub fn new(db: &Database) -> Self {
        let collection = db.collection::<Listing>("listings");
        Self { collection }
    }

    /// Create a new MongoListingRepository with a custom collection name
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<Listing>(collection_name);
        Self { collection }
    }

    /// Initialize indexes for query performance and slug uniqueness
    ///
    /// The unique slug index is load-bearing: it is what rejects the losing
    /// writer when two requests allocate the same slug concurrently.
    pub async fn init_indexes(&self) -> ListingResult<()> {
        let indexes = vec![
            // Unique slug index
            IndexModel::builder()
                .keys(doc! { "slug": 1 })
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .name("idx_slug_unique".to_string())
                        .build(),
                )
                .build(),
            // Category + status for listing pages
            IndexModel::builder()
                .keys(doc! { "category": 1, "status": 1, "created_at": -1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_category_status".to_string())
                        .build(),
                )
                .build(),
            // Price range queries
            IndexModel::builder()
                .keys(doc! { "price": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_price".to_string())
                        .build(),
                )
                .build(),
            // Featured carousel
            IndexModel::builder()
                .keys(doc! { "is_featured": 1, "created_at": -1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_featured".to_string())
                        .build(),
                )
                .build(),
            // Vehicle make lookups (car listings)
            IndexModel::builder()
                .keys(doc! { "vehicle.make": 1 })
                .options(
                    IndexOptions::builder()
                        .sparse(true)
                        .name("idx_vehicle_make".to_string())
                        .build(),
                )
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Listing indexes created successfully");
        Ok(())
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<Listing> {
        &self.collection
    }

    /// Build a MongoDB filter document from ListingFilter
    fn build_filter(filter: &ListingFilter) -> mongodb::bson::Document {
        let mut doc = doc! {};

        if let Some(ref status) = filter.status {
            doc.insert("status", status.to_string());
        }

        if let Some(ref category) = filter.category {
            doc.insert("category", category.to_string());
        }

        if let Some(is_featured) = filter.is_featured {
            doc.insert("is_featured", is_featured);
        }

        // Price range
        if filter.min_price.is_some() || filter.max_price.is_some() {
            let mut price_filter = doc! {};
            if let Some(min) = filter.min_price {
                price_filter.insert("$gte", min);
            }
            if let Some(max) = filter.max_price {
                price_filter.insert("$lte", max);
            }
            doc.insert("price", price_filter);
        }

        if let Some(ref make) = filter.make {
            doc.insert("vehicle.make", make);
        }

        if let Some(ref search) = filter.search {
            doc.insert(
                "$or",
                vec![
                    doc! { "title": { "$regex": search, "$options": "i" } },
                    doc! { "description": { "$regex": search, "$options": "i" } },
                ],
            );
        }

        doc
    }

    /// Number of documents to skip for a 1-based page
    fn skip_for(page: u64, limit: i64) -> u64 {
        page.saturating_sub(1) * limit.max(0) as u64
    }
}

#[async_trait]
impl ListingRepository for MongoListingRepository {
    #[instrument(skip(self, input), fields(listing_title = %input.title, slug = %slug))]
    async fn create(&self, input: CreateListing, slug: String) -> ListingResult<Listing> {
        let listing = Listing::new(input, slug);

        self.collection.insert_one(&listing).await.map_err(|e| {
            if is_duplicate_key(&e) {
                ListingError::DuplicateSlug(listing.slug.clone())
            } else {
                e.into()
            }
        })?;

        tracing::info!(listing_id = %listing.id, "Listing created successfully");
        Ok(listing)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> ListingResult<Option<Listing>> {
        let filter = doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) };
        let listing = self.collection.find_one(filter).await?;
        Ok(listing)
    }

    #[instrument(skip(self))]
    async fn find_by_slug(&self, slug: &str) -> ListingResult<Option<Listing>> {
        let filter = doc! { "slug": slug };
        let listing = self.collection.find_one(filter).await?;
        Ok(listing)
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: ListingFilter) -> ListingResult<Vec<Listing>> {
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
        let listings: Vec<Listing> = cursor.try_collect().await?;

        Ok(listings)
    }

    #[instrument(skip(self, input))]
    async fn update(
        &self,
        id: Uuid,
        input: UpdateListing,
        slug: Option<String>,
    ) -> ListingResult<Listing> {
        let filter = doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) };
        let existing = self
            .collection
            .find_one(filter.clone())
            .await?
            .ok_or(ListingError::NotFound(id))?;

        let mut updated = existing;
        updated.apply_update(input);
        if let Some(slug) = slug {
            updated.slug = slug;
        }

        self.collection
            .replace_one(filter, &updated)
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    ListingError::DuplicateSlug(updated.slug.clone())
                } else {
                    e.into()
                }
            })?;

        tracing::info!(listing_id = %id, "Listing updated successfully");
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> ListingResult<bool> {
        let filter = doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) };
        let result = self.collection.delete_one(filter).await?;

        if result.deleted_count == 0 {
            return Err(ListingError::NotFound(id));
        }

        tracing::info!(listing_id = %id, "Listing deleted successfully");
        Ok(true)
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: ListingFilter) -> ListingResult<u64> {
        let mongo_filter = Self::build_filter(&filter);
        let count = self.collection.count_documents(mongo_filter).await?;
        Ok(count)
    }

    #[instrument(skip(self))]
    async fn get_featured(&self, limit: i64) -> ListingResult<Vec<Listing>> {
        use futures_util::TryStreamExt;

        let filter = doc! { "is_featured": true };

        let options = mongodb::options::FindOptions::builder()
            .limit(limit)
            .sort(doc! { "created_at": -1 })
            .build();

        let cursor = self.collection.find(filter).with_options(options).await?;
        let listings: Vec<Listing> = cursor.try_collect().await?;

        Ok(listings)
    }

    #[instrument(skip(self))]
    async fn get_by_category(
        &self,
        category: &str,
        page: u64,
        limit: i64,
    ) -> ListingResult<Vec<Listing>> {
        use futures_util::TryStreamExt;

        let filter = doc! { "category": category };

        let options = mongodb::options::FindOptions::builder()
            .limit(limit)
            .skip(Self::skip_for(page, limit))
            .sort(doc! { "created_at": -1 })
            .build();

        let cursor = self.collection.find(filter).with_options(options).await?;
        let listings: Vec<Listing> = cursor.try_collect().await?;

        Ok(listings)
    }
}
