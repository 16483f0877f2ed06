//! Listing Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ListingError, ListingResult};
use crate::models::{
    CreateListing, Listing, ListingCategory, ListingFilter, ListingPage, UpdateListing,
};
use crate::repository::ListingRepository;
use crate::slug;

/// Listing service providing business logic operations
///
/// The service layer handles validation, slug allocation, and orchestrates
/// repository operations. Slug uniqueness under concurrent writers is
/// resolved here: allocation is optimistic, the repository's unique index
/// is authoritative, and a `DuplicateSlug` at commit triggers reallocation.
pub struct ListingService<R: ListingRepository> {
    repository: Arc<R>,
}

impl<R: ListingRepository> ListingService<R> {
    /// Create a new ListingService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new listing
    ///
    /// Allocates a slug from the title and commits. If a concurrent request
    /// committed the same slug between the allocator's check and our insert,
    /// the unique index rejects the write and we allocate again; the fresh
    /// check then sees the committed slug and picks the next suffix.
    #[instrument(skip(self, input), fields(listing_title = %input.title))]
    pub async fn create_listing(&self, input: CreateListing) -> ListingResult<Listing> {
        // Validate input
        input
            .validate()
            .map_err(|e| ListingError::Validation(e.to_string()))?;

        loop {
            let slug = slug::allocate(self.repository.as_ref(), &input.title).await?;

            match self.repository.create(input.clone(), slug).await {
                Err(ListingError::DuplicateSlug(slug)) => {
                    tracing::warn!(%slug, "Slug taken at commit, reallocating");
                }
                other => return other,
            }
        }
    }

    /// Get a listing by ID
    #[instrument(skip(self))]
    pub async fn get_listing(&self, id: Uuid) -> ListingResult<Listing> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ListingError::NotFound(id))
    }

    /// Get a listing by slug
    #[instrument(skip(self))]
    pub async fn get_by_slug(&self, slug: &str) -> ListingResult<Listing> {
        self.repository
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| ListingError::SlugNotFound(slug.to_string()))
    }

    /// List listings with optional filters, returning one page with totals
    #[instrument(skip(self))]
    pub async fn list_listings(&self, filter: ListingFilter) -> ListingResult<ListingPage> {
        let page = filter.page.max(1);
        let limit = filter.limit;

        let data = self.repository.list(filter.clone()).await?;
        let total = self.repository.count(filter).await?;
        let total_pages = if limit > 0 {
            total.div_ceil(limit as u64)
        } else {
            0
        };

        Ok(ListingPage {
            total,
            page,
            limit,
            total_pages,
            data,
        })
    }

    /// Update an existing listing
    ///
    /// A changed title gets a freshly allocated slug, with the same
    /// reallocate-on-duplicate loop as creation. An unchanged title leaves
    /// the stored slug alone.
    #[instrument(skip(self, input))]
    pub async fn update_listing(&self, id: Uuid, input: UpdateListing) -> ListingResult<Listing> {
        // Validate input
        input
            .validate()
            .map_err(|e| ListingError::Validation(e.to_string()))?;

        // Check if listing exists
        let existing = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(ListingError::NotFound(id))?;

        let title_changed = input
            .title
            .as_ref()
            .is_some_and(|title| title != &existing.title);

        if !title_changed {
            return self.repository.update(id, input, None).await;
        }

        let new_title = input.title.clone().unwrap_or_default();
        loop {
            let slug = slug::allocate(self.repository.as_ref(), &new_title).await?;

            match self.repository.update(id, input.clone(), Some(slug)).await {
                Err(ListingError::DuplicateSlug(slug)) => {
                    tracing::warn!(%slug, "Slug taken at commit, reallocating");
                }
                other => return other,
            }
        }
    }

    /// Delete a listing
    #[instrument(skip(self))]
    pub async fn delete_listing(&self, id: Uuid) -> ListingResult<()> {
        self.repository.delete(id).await?;
        Ok(())
    }

    /// Count listings matching a filter
    #[instrument(skip(self))]
    pub async fn count_listings(&self, filter: ListingFilter) -> ListingResult<u64> {
        self.repository.count(filter).await
    }

    /// Get featured listings
    #[instrument(skip(self))]
    pub async fn featured_listings(&self, limit: i64) -> ListingResult<Vec<Listing>> {
        self.repository.get_featured(limit).await
    }

    /// Get listings in a category
    #[instrument(skip(self))]
    pub async fn listings_by_category(
        &self,
        category: ListingCategory,
        page: u64,
        limit: i64,
    ) -> ListingResult<Vec<Listing>> {
        self.repository
            .get_by_category(&category.to_string(), page, limit)
            .await
    }
}

impl<R: ListingRepository> Clone for ListingService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ListingStatus, VehicleDetails};
    use crate::repository::MockListingRepository;
    use mockall::Sequence;

    fn create_input(title: &str) -> CreateListing {
        CreateListing {
            title: title.to_string(),
            description: "Well kept, one owner".to_string(),
            price: 1_550_000,
            category: ListingCategory::Cars,
            status: ListingStatus::Active,
            stock: 1,
            is_featured: false,
            images: vec![],
            vehicle: Some(VehicleDetails {
                make: "Honda".to_string(),
                model: "Civic".to_string(),
                year: 2019,
                mileage_km: Some(64_000),
                transmission: None,
                fuel: None,
            }),
            metadata: serde_json::Value::Null,
        }
    }

    fn stored(title: &str, slug: &str) -> Listing {
        Listing::new(create_input(title), slug.to_string())
    }

    #[tokio::test]
    async fn test_create_uses_base_slug_when_free() {
        let mut repo = MockListingRepository::new();
        repo.expect_find_by_slug()
            .withf(|slug| slug == "honda-civic")
            .returning(|_| Ok(None));
        repo.expect_create()
            .returning(|input, slug| Ok(Listing::new(input, slug)));

        let service = ListingService::new(repo);
        let listing = service.create_listing(create_input("Honda Civic")).await.unwrap();

        assert_eq!(listing.slug, "honda-civic");
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input() {
        let repo = MockListingRepository::new();
        let service = ListingService::new(repo);

        let mut input = create_input("Honda Civic");
        input.title = String::new();

        let result = service.create_listing(input).await;
        assert!(matches!(result, Err(ListingError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_takes_next_suffix_when_base_taken() {
        let mut repo = MockListingRepository::new();
        repo.expect_find_by_slug()
            .withf(|slug| slug == "honda-civic")
            .returning(|slug| Ok(Some(stored("Honda Civic", slug))));
        repo.expect_find_by_slug()
            .withf(|slug| slug == "honda-civic-1")
            .returning(|_| Ok(None));
        repo.expect_create()
            .returning(|input, slug| Ok(Listing::new(input, slug)));

        let service = ListingService::new(repo);
        let listing = service.create_listing(create_input("Honda Civic")).await.unwrap();

        assert_eq!(listing.slug, "honda-civic-1");
    }

    #[tokio::test]
    async fn test_create_reallocates_when_commit_loses_race() {
        // Two concurrent creates for "Honda Civic": we observe "honda-civic"
        // free, but the other writer commits it first. The unique index
        // rejects our insert; the second allocation sees the committed slug
        // and we end up with "honda-civic-1".
        let mut seq = Sequence::new();
        let mut repo = MockListingRepository::new();

        repo.expect_find_by_slug()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|slug| slug == "honda-civic")
            .returning(|_| Ok(None));
        repo.expect_create()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, slug| Err(ListingError::DuplicateSlug(slug)));
        repo.expect_find_by_slug()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|slug| slug == "honda-civic")
            .returning(|slug| Ok(Some(stored("Honda Civic", slug))));
        repo.expect_find_by_slug()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|slug| slug == "honda-civic-1")
            .returning(|_| Ok(None));
        repo.expect_create()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|input, slug| Ok(Listing::new(input, slug)));

        let service = ListingService::new(repo);
        let listing = service.create_listing(create_input("Honda Civic")).await.unwrap();

        assert_eq!(listing.slug, "honda-civic-1");
    }

    #[tokio::test]
    async fn test_update_with_unchanged_title_keeps_slug() {
        let existing = stored("Honda Civic", "honda-civic");
        let existing_id = existing.id;

        let mut repo = MockListingRepository::new();
        repo.expect_get_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        // No find_by_slug expected: unchanged titles skip allocation
        repo.expect_update()
            .withf(|_, _, slug| slug.is_none())
            .returning(|id, input, _| {
                let mut listing = stored("Honda Civic", "honda-civic");
                listing.id = id;
                listing.apply_update(input);
                Ok(listing)
            });

        let service = ListingService::new(repo);
        let updated = service
            .update_listing(
                existing_id,
                UpdateListing {
                    title: Some("Honda Civic".to_string()),
                    price: Some(1_450_000),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.slug, "honda-civic");
        assert_eq!(updated.price, 1_450_000);
    }

    #[tokio::test]
    async fn test_update_with_new_title_reallocates_slug() {
        let existing = stored("Honda Civic", "honda-civic");
        let existing_id = existing.id;

        let mut repo = MockListingRepository::new();
        repo.expect_get_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        repo.expect_find_by_slug()
            .withf(|slug| slug == "honda-accord")
            .returning(|_| Ok(None));
        repo.expect_update()
            .withf(|_, _, slug| slug.as_deref() == Some("honda-accord"))
            .returning(|id, input, slug| {
                let mut listing = stored("Honda Civic", "honda-civic");
                listing.id = id;
                listing.apply_update(input);
                if let Some(slug) = slug {
                    listing.slug = slug;
                }
                Ok(listing)
            });

        let service = ListingService::new(repo);
        let updated = service
            .update_listing(
                existing_id,
                UpdateListing {
                    title: Some("Honda Accord".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "Honda Accord");
        assert_eq!(updated.slug, "honda-accord");
    }

    #[tokio::test]
    async fn test_update_missing_listing_is_not_found() {
        let mut repo = MockListingRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));

        let service = ListingService::new(repo);
        let result = service
            .update_listing(Uuid::new_v4(), UpdateListing::default())
            .await;

        assert!(matches!(result, Err(ListingError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_builds_page_envelope() {
        let mut repo = MockListingRepository::new();
        repo.expect_list()
            .returning(|_| Ok(vec![stored("Honda Civic", "honda-civic")]));
        repo.expect_count().returning(|_| Ok(21));

        let service = ListingService::new(repo);
        let page = service
            .list_listings(ListingFilter {
                limit: 10,
                page: 2,
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(page.total, 21);
        assert_eq!(page.page, 2);
        assert_eq!(page.limit, 10);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.data.len(), 1);
    }

    #[tokio::test]
    async fn test_get_by_slug_not_found() {
        let mut repo = MockListingRepository::new();
        repo.expect_find_by_slug().returning(|_| Ok(None));

        let service = ListingService::new(repo);
        let result = service.get_by_slug("nope").await;
        assert!(matches!(result, Err(ListingError::SlugNotFound(_))));
    }
}
