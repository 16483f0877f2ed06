use async_trait::async_trait;
use uuid::Uuid;

use crate::error::InquiryResult;
use crate::models::{CreateInquiry, Inquiry, InquiryFilter, InquiryStatus};

/// Repository trait for Inquiry persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InquiryRepository: Send + Sync {
    /// Create a new inquiry
    async fn create(&self, input: CreateInquiry) -> InquiryResult<Inquiry>;

    /// Get an inquiry by ID
    async fn get_by_id(&self, id: Uuid) -> InquiryResult<Option<Inquiry>>;

    /// List inquiries with optional filters, newest first
    async fn list(&self, filter: InquiryFilter) -> InquiryResult<Vec<Inquiry>>;

    /// List all inquiries referencing a listing, newest first
    async fn list_by_listing(&self, listing_id: Uuid) -> InquiryResult<Vec<Inquiry>>;

    /// Update an inquiry's status
    async fn update_status(&self, id: Uuid, status: InquiryStatus) -> InquiryResult<Inquiry>;

    /// Count inquiries matching a filter
    async fn count(&self, filter: InquiryFilter) -> InquiryResult<u64>;
}

/// Existence lookup into the listings collection.
///
/// Lets the inquiry service reject references to unknown listings without
/// depending on the listings domain; the application wires an adapter over
/// the listing repository.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingDirectory: Send + Sync {
    /// Whether a listing with this ID exists
    async fn exists(&self, listing_id: Uuid) -> InquiryResult<bool>;
}
