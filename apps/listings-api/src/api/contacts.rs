//! Contacts API routes
//!
//! This module wires up the contacts domain to HTTP routes.

use axum::Router;
use domain_contacts::{ContactService, MongoContactRepository, handlers};
use mongodb::Database;

use crate::state::AppState;

/// Create contacts router
pub fn router(state: &AppState) -> Router {
    // Create the MongoDB repository
    let repository = MongoContactRepository::new(&state.db);

    // Create the service
    let service = ContactService::new(repository);

    // Return the domain's router
    handlers::router(service)
}

/// Initialize contact indexes
pub async fn init_indexes(db: &Database) -> eyre::Result<()> {
    MongoContactRepository::new(db).init_indexes().await?;
    Ok(())
}
