//! Listings API routes
//!
//! This module wires up the listings domain to HTTP routes.

use axum::Router;
use domain_listings::{ListingService, MongoListingRepository, handlers};
use mongodb::Database;

use crate::state::AppState;

/// Create listings router
pub fn router(state: &AppState) -> Router {
    // Create the MongoDB repository
    let repository = MongoListingRepository::new(&state.db);

    // Create the service
    let service = ListingService::new(repository);

    // Return the domain's router
    handlers::router(service)
}

/// Initialize listing indexes (including the unique slug index)
pub async fn init_indexes(db: &Database) -> eyre::Result<()> {
    MongoListingRepository::new(db).init_indexes().await?;
    Ok(())
}
