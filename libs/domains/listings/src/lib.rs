//! Listings Domain
//!
//! This module provides a complete domain implementation for managing
//! classifieds listings (generic products and car listings) using MongoDB.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business logic, validation, slug allocation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! Every listing carries a URL-safe `slug` derived from its title. The
//! [`slug`] module derives and allocates slugs; the MongoDB repository
//! enforces uniqueness with a unique index, and the service retries
//! allocation when a concurrent writer wins the race (see [`slug`]).
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_listings::{
//!     handlers,
//!     mongodb::MongoListingRepository,
//!     service::ListingService,
//! };
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create a MongoDB client
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("mydb");
//!
//! // Create a repository and service
//! let repository = MongoListingRepository::new(&db);
//! let service = ListingService::new(repository);
//!
//! // Create Axum router
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;
pub mod slug;

// Re-export commonly used types
pub use error::{ListingError, ListingResult};
pub use handlers::ApiDoc;
pub use models::{
    CreateListing, FuelType, Listing, ListingCategory, ListingFilter, ListingImage, ListingPage,
    ListingStatus, Transmission, UpdateListing, VehicleDetails,
};
pub use mongodb::MongoListingRepository;
pub use repository::ListingRepository;
pub use service::ListingService;
