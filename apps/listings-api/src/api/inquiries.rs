//! Inquiries API routes
//!
//! This module wires up the inquiries domain to HTTP routes, with a
//! listing-existence adapter over the listings repository so inquiries
//! cannot reference unknown listings.

use async_trait::async_trait;
use axum::Router;
use domain_inquiries::{
    InquiryError, InquiryResult, InquiryService, ListingDirectory, MongoInquiryRepository,
    handlers,
};
use domain_listings::{ListingRepository, MongoListingRepository};
use mongodb::Database;
use std::sync::Arc;
use uuid::Uuid;

use crate::state::AppState;

/// Listing-existence lookups backed by the listings collection
struct ListingExistence {
    repository: MongoListingRepository,
}

#[async_trait]
impl ListingDirectory for ListingExistence {
    async fn exists(&self, listing_id: Uuid) -> InquiryResult<bool> {
        self.repository
            .get_by_id(listing_id)
            .await
            .map(|listing| listing.is_some())
            .map_err(|e| InquiryError::Database(e.to_string()))
    }
}

/// Create inquiries router
pub fn router(state: &AppState) -> Router {
    // Create the MongoDB repository
    let repository = MongoInquiryRepository::new(&state.db);

    // Create the service with the listing directory wired in
    let directory = ListingExistence {
        repository: MongoListingRepository::new(&state.db),
    };
    let service = InquiryService::new(repository).with_listing_directory(Arc::new(directory));

    // Return the domain's router
    handlers::router(service)
}

/// Initialize inquiry indexes
pub async fn init_indexes(db: &Database) -> eyre::Result<()> {
    MongoInquiryRepository::new(db).init_indexes().await?;
    Ok(())
}
