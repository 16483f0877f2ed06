use async_trait::async_trait;
use uuid::Uuid;

use crate::error::ListingResult;
use crate::models::{CreateListing, Listing, ListingFilter, UpdateListing};

/// Repository trait for Listing persistence
///
/// This trait defines the data access interface for listings.
/// Implementations can use different storage backends (MongoDB, etc.).
///
/// The backend must enforce slug uniqueness at commit time and surface a
/// collision as `ListingError::DuplicateSlug`, so callers can reallocate
/// and retry (see the `slug` module).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// Create a new listing with a pre-allocated slug
    async fn create(&self, input: CreateListing, slug: String) -> ListingResult<Listing>;

    /// Get a listing by ID
    async fn get_by_id(&self, id: Uuid) -> ListingResult<Option<Listing>>;

    /// Find the listing holding `slug`, if any (the slug existence check)
    async fn find_by_slug(&self, slug: &str) -> ListingResult<Option<Listing>>;

    /// List listings with optional filters, newest first
    async fn list(&self, filter: ListingFilter) -> ListingResult<Vec<Listing>>;

    /// Update an existing listing; `slug` carries the freshly allocated slug
    /// when the title changed, `None` otherwise
    async fn update(
        &self,
        id: Uuid,
        input: UpdateListing,
        slug: Option<String>,
    ) -> ListingResult<Listing>;

    /// Delete a listing by ID
    async fn delete(&self, id: Uuid) -> ListingResult<bool>;

    /// Count listings matching a filter
    async fn count(&self, filter: ListingFilter) -> ListingResult<u64>;

    /// Get featured listings, newest first
    async fn get_featured(&self, limit: i64) -> ListingResult<Vec<Listing>>;

    /// Get listings in a category, newest first
    async fn get_by_category(
        &self,
        category: &str,
        page: u64,
        limit: i64,
    ) -> ListingResult<Vec<Listing>>;
}
