use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Listing status
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ListingStatus {
    /// Listing is live and visible
    #[default]
    Active,
    /// Listing is hidden from the public catalog
    Inactive,
    /// Listing is still being edited by its owner
    Draft,
}

/// Listing category
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ListingCategory {
    #[default]
    General,
    Cars,
    Electronics,
    Furniture,
    Clothing,
    Sports,
    RealEstate,
    Other,
}

/// Vehicle transmission type
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Transmission {
    Manual,
    Automatic,
}

/// Vehicle fuel type
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FuelType {
    Petrol,
    Diesel,
    Hybrid,
    Electric,
}

/// Listing image
///
/// Images live in an external blob store; listings only hold references.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListingImage {
    /// Image URL
    pub url: String,
    /// Alternative text for accessibility
    #[serde(default)]
    pub alt: Option<String>,
    /// Whether this is the primary/hero image
    #[serde(default)]
    pub is_primary: bool,
    /// Sort order for display
    #[serde(default)]
    pub sort_order: i32,
}

/// Structured details for the car-listing variant
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VehicleDetails {
    /// Manufacturer (e.g., "Toyota")
    pub make: String,
    /// Model name (e.g., "Corolla")
    pub model: String,
    /// Model year
    pub year: i32,
    /// Odometer reading in kilometers
    #[serde(default)]
    pub mileage_km: Option<i32>,
    #[serde(default)]
    pub transmission: Option<Transmission>,
    #[serde(default)]
    pub fuel: Option<FuelType>,
}

/// Listing entity - represents a listing stored in MongoDB
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Listing {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Human-supplied title
    pub title: String,
    /// URL-safe identifier derived from the title, unique across all listings.
    /// Regenerated when the title changes; never edited directly.
    pub slug: String,
    /// Listing description
    pub description: String,
    /// Price in minor currency units (cents)
    pub price: i64,
    /// Listing category
    pub category: ListingCategory,
    /// Current status
    pub status: ListingStatus,
    /// Number of units available
    pub stock: i32,
    /// Whether the listing is featured on the front page
    #[serde(default)]
    pub is_featured: bool,
    /// Listing images (blob store references)
    #[serde(default)]
    pub images: Vec<ListingImage>,
    /// Car-listing variant details, absent for generic product listings
    #[serde(default)]
    pub vehicle: Option<VehicleDetails>,
    /// Additional metadata as JSON
    #[serde(default)]
    pub metadata: serde_json::Value,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new listing
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateListing {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub description: String,
    /// Price in cents
    #[validate(range(min = 0))]
    pub price: i64,
    #[serde(default)]
    pub category: ListingCategory,
    #[serde(default)]
    pub status: ListingStatus,
    #[validate(range(min = 0))]
    #[serde(default = "default_stock")]
    pub stock: i32,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub images: Vec<ListingImage>,
    #[serde(default)]
    pub vehicle: Option<VehicleDetails>,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

/// DTO for updating an existing listing
///
/// The slug is intentionally absent: it is derived from the title and
/// reallocated by the service when the title changes.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateListing {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(range(min = 0))]
    pub price: Option<i64>,
    pub category: Option<ListingCategory>,
    pub status: Option<ListingStatus>,
    #[validate(range(min = 0))]
    pub stock: Option<i32>,
    pub is_featured: Option<bool>,
    pub images: Option<Vec<ListingImage>>,
    pub vehicle: Option<VehicleDetails>,
    pub metadata: Option<serde_json::Value>,
}

/// Query filters for listing listings
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct ListingFilter {
    /// Filter by status
    pub status: Option<ListingStatus>,
    /// Filter by category
    pub category: Option<ListingCategory>,
    /// Only featured listings
    pub is_featured: Option<bool>,
    /// Minimum price (in cents)
    pub min_price: Option<i64>,
    /// Maximum price (in cents)
    pub max_price: Option<i64>,
    /// Filter by vehicle make (car listings)
    pub make: Option<String>,
    /// Search in title and description
    pub search: Option<String>,
    /// Page number, starting at 1
    #[serde(default = "default_page")]
    pub page: u64,
    /// Page size
    #[serde(default = "default_limit")]
    pub limit: i64,
}

impl Default for ListingFilter {
    fn default() -> Self {
        Self {
            status: None,
            category: None,
            is_featured: None,
            min_price: None,
            max_price: None,
            make: None,
            search: None,
            page: default_page(),
            limit: default_limit(),
        }
    }
}

/// One page of listings with pagination metadata
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListingPage {
    /// Total number of listings matching the filter
    pub total: u64,
    /// Current page number (1-based)
    pub page: u64,
    /// Page size
    pub limit: i64,
    /// Total number of pages
    pub total_pages: u64,
    /// Listings on this page
    pub data: Vec<Listing>,
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> i64 {
    10
}

fn default_stock() -> i32 {
    1
}

impl Listing {
    /// Create a new listing from a CreateListing DTO and an allocated slug
    pub fn new(input: CreateListing, slug: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            title: input.title,
            slug,
            description: input.description,
            price: input.price,
            category: input.category,
            status: input.status,
            stock: input.stock,
            is_featured: input.is_featured,
            images: input.images,
            vehicle: input.vehicle,
            metadata: input.metadata,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply updates from an UpdateListing DTO
    ///
    /// The slug is left untouched; the caller swaps it in separately when the
    /// title changed and a new one was allocated.
    pub fn apply_update(&mut self, update: UpdateListing) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(stock) = update.stock {
            self.stock = stock;
        }
        if let Some(is_featured) = update.is_featured {
            self.is_featured = is_featured;
        }
        if let Some(images) = update.images {
            self.images = images;
        }
        if let Some(vehicle) = update.vehicle {
            self.vehicle = Some(vehicle);
        }
        if let Some(metadata) = update.metadata {
            self.metadata = metadata;
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_input(title: &str) -> CreateListing {
        CreateListing {
            title: title.to_string(),
            description: String::new(),
            price: 1_500_000,
            category: ListingCategory::Cars,
            status: ListingStatus::Active,
            stock: 1,
            is_featured: false,
            images: vec![],
            vehicle: None,
            metadata: serde_json::Value::Null,
        }
    }

    #[test]
    fn test_new_listing_takes_allocated_slug() {
        let listing = Listing::new(
            create_input("Toyota Corolla 2020!"),
            "toyota-corolla-2020".to_string(),
        );
        assert_eq!(listing.title, "Toyota Corolla 2020!");
        assert_eq!(listing.slug, "toyota-corolla-2020");
        assert_eq!(listing.created_at, listing.updated_at);
    }

    #[test]
    fn test_apply_update_keeps_slug() {
        let mut listing = Listing::new(create_input("Old title"), "old-title".to_string());

        listing.apply_update(UpdateListing {
            title: Some("New title".to_string()),
            price: Some(999),
            ..Default::default()
        });

        assert_eq!(listing.title, "New title");
        assert_eq!(listing.price, 999);
        // Slug swaps happen at the repository, driven by the service
        assert_eq!(listing.slug, "old-title");
    }

    #[test]
    fn test_apply_update_ignores_absent_fields() {
        let mut listing = Listing::new(create_input("Kept"), "kept".to_string());
        listing.apply_update(UpdateListing::default());
        assert_eq!(listing.title, "Kept");
        assert_eq!(listing.price, 1_500_000);
    }

    #[test]
    fn test_filter_defaults() {
        let filter = ListingFilter::default();
        assert_eq!(filter.page, 1);
        assert_eq!(filter.limit, 10);
        assert!(filter.status.is_none());
    }
}
