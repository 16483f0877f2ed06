//! Inquiry Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{InquiryError, InquiryResult};
use crate::models::{CreateInquiry, Inquiry, InquiryFilter, InquiryPage, InquiryStatus};
use crate::repository::{InquiryRepository, ListingDirectory};

/// Inquiry service providing business logic operations
///
/// When a listing directory is wired in, inquiries referencing a listing ID
/// are checked against it; without one, listing references are stored as-is.
pub struct InquiryService<R: InquiryRepository> {
    repository: Arc<R>,
    listings: Option<Arc<dyn ListingDirectory>>,
}

impl<R: InquiryRepository> InquiryService<R> {
    /// Create a new InquiryService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
            listings: None,
        }
    }

    /// Wire in a listing directory for listing-reference validation
    pub fn with_listing_directory(mut self, listings: Arc<dyn ListingDirectory>) -> Self {
        self.listings = Some(listings);
        self
    }

    /// Submit a new inquiry
    #[instrument(skip(self, input), fields(listing_title = %input.listing_title))]
    pub async fn create_inquiry(&self, input: CreateInquiry) -> InquiryResult<Inquiry> {
        // Validate input
        input
            .validate()
            .map_err(|e| InquiryError::Validation(e.to_string()))?;

        // Confirm the referenced listing exists, when we can check
        if let (Some(listing_id), Some(listings)) = (input.listing_id, &self.listings) {
            if !listings.exists(listing_id).await? {
                return Err(InquiryError::ListingNotFound(listing_id));
            }
        }

        self.repository.create(input).await
    }

    /// Get an inquiry by ID
    #[instrument(skip(self))]
    pub async fn get_inquiry(&self, id: Uuid) -> InquiryResult<Inquiry> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(InquiryError::NotFound(id))
    }

    /// List inquiries with optional filters, returning one page with totals
    #[instrument(skip(self))]
    pub async fn list_inquiries(&self, filter: InquiryFilter) -> InquiryResult<InquiryPage> {
        let page = filter.page.max(1);
        let limit = filter.limit;

        let data = self.repository.list(filter.clone()).await?;
        let total = self.repository.count(filter).await?;
        let total_pages = if limit > 0 {
            total.div_ceil(limit as u64)
        } else {
            0
        };

        Ok(InquiryPage {
            total,
            page,
            limit,
            total_pages,
            data,
        })
    }

    /// List all inquiries referencing a listing
    #[instrument(skip(self))]
    pub async fn inquiries_for_listing(&self, listing_id: Uuid) -> InquiryResult<Vec<Inquiry>> {
        self.repository.list_by_listing(listing_id).await
    }

    /// Update an inquiry's status
    #[instrument(skip(self))]
    pub async fn update_status(&self, id: Uuid, status: InquiryStatus) -> InquiryResult<Inquiry> {
        self.repository.update_status(id, status).await
    }

    /// Count inquiries matching a filter
    #[instrument(skip(self))]
    pub async fn count_inquiries(&self, filter: InquiryFilter) -> InquiryResult<u64> {
        self.repository.count(filter).await
    }
}

impl<R: InquiryRepository> Clone for InquiryService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            listings: self.listings.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{MockInquiryRepository, MockListingDirectory};

    fn inquiry_input(listing_id: Option<Uuid>) -> CreateInquiry {
        CreateInquiry {
            listing_id,
            listing_title: "Toyota Corolla 2020".to_string(),
            listing_price: 1_550_000,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: Some("+49 30 123456".to_string()),
            message: "Is it still available?".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_without_listing_reference() {
        let mut repo = MockInquiryRepository::new();
        repo.expect_create().returning(|input| Ok(Inquiry::new(input)));

        let service = InquiryService::new(repo);
        let inquiry = service.create_inquiry(inquiry_input(None)).await.unwrap();

        assert_eq!(inquiry.status, InquiryStatus::New);
        assert!(inquiry.listing_id.is_none());
    }

    #[tokio::test]
    async fn test_create_checks_listing_existence() {
        let listing_id = Uuid::new_v4();

        let mut repo = MockInquiryRepository::new();
        repo.expect_create().returning(|input| Ok(Inquiry::new(input)));

        let mut directory = MockListingDirectory::new();
        directory
            .expect_exists()
            .withf(move |id| *id == listing_id)
            .returning(|_| Ok(true));

        let service = InquiryService::new(repo).with_listing_directory(Arc::new(directory));
        let inquiry = service
            .create_inquiry(inquiry_input(Some(listing_id)))
            .await
            .unwrap();

        assert_eq!(inquiry.listing_id, Some(listing_id));
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_listing() {
        let repo = MockInquiryRepository::new();

        let mut directory = MockListingDirectory::new();
        directory.expect_exists().returning(|_| Ok(false));

        let service = InquiryService::new(repo).with_listing_directory(Arc::new(directory));
        let result = service
            .create_inquiry(inquiry_input(Some(Uuid::new_v4())))
            .await;

        assert!(matches!(result, Err(InquiryError::ListingNotFound(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_email() {
        let repo = MockInquiryRepository::new();
        let service = InquiryService::new(repo);

        let mut input = inquiry_input(None);
        input.email = "not-an-email".to_string();

        let result = service.create_inquiry(input).await;
        assert!(matches!(result, Err(InquiryError::Validation(_))));
    }

    #[tokio::test]
    async fn test_list_builds_page_envelope() {
        let mut repo = MockInquiryRepository::new();
        repo.expect_list()
            .returning(|_| Ok(vec![Inquiry::new(inquiry_input(None))]));
        repo.expect_count().returning(|_| Ok(11));

        let service = InquiryService::new(repo);
        let page = service
            .list_inquiries(InquiryFilter {
                page: 1,
                limit: 10,
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(page.total, 11);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.data.len(), 1);
    }
}
