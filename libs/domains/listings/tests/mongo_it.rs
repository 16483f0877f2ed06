//! MongoDB integration tests for the listings domain
//!
//! These run against a real MongoDB instance and are ignored by default.
//! Point `MONGODB_URL` at a running server and run with `--ignored`.

use domain_listings::*;
use ::mongodb::{Client, Database};

async fn test_db() -> Database {
    let url =
        std::env::var("MONGODB_URL").unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
    let client = Client::with_uri_str(&url).await.unwrap();
    client.database("listings_it")
}

async fn fresh_repo(collection: &str) -> MongoListingRepository {
    let db = test_db().await;
    db.collection::<Listing>(collection).drop().await.ok();
    let repo = MongoListingRepository::with_collection(&db, collection);
    repo.init_indexes().await.unwrap();
    repo
}

fn car_input(title: &str) -> CreateListing {
    CreateListing {
        title: title.to_string(),
        description: "Integration test listing".to_string(),
        price: 1_550_000,
        category: ListingCategory::Cars,
        status: ListingStatus::Active,
        stock: 1,
        is_featured: false,
        images: vec![],
        vehicle: Some(VehicleDetails {
            make: "Toyota".to_string(),
            model: "Corolla".to_string(),
            year: 2020,
            mileage_km: Some(41_000),
            transmission: Some(Transmission::Automatic),
            fuel: Some(FuelType::Petrol),
        }),
        metadata: serde_json::Value::Null,
    }
}

#[tokio::test]
#[ignore] // Requires actual MongoDB
async fn test_create_and_get_by_slug() {
    let repo = fresh_repo("it_create_get").await;
    let service = ListingService::new(repo);

    let created = service
        .create_listing(car_input("Toyota Corolla 2020!"))
        .await
        .unwrap();
    assert_eq!(created.slug, "toyota-corolla-2020");

    let fetched = service.get_by_slug("toyota-corolla-2020").await.unwrap();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.title, "Toyota Corolla 2020!");
}

#[tokio::test]
#[ignore] // Requires actual MongoDB
async fn test_repeated_titles_get_incrementing_suffixes() {
    let repo = fresh_repo("it_suffixes").await;
    let service = ListingService::new(repo);

    let first = service
        .create_listing(car_input("Toyota Corolla 2020!"))
        .await
        .unwrap();
    let second = service
        .create_listing(car_input("Toyota Corolla 2020!"))
        .await
        .unwrap();
    let third = service
        .create_listing(car_input("Toyota Corolla 2020!"))
        .await
        .unwrap();

    assert_eq!(first.slug, "toyota-corolla-2020");
    assert_eq!(second.slug, "toyota-corolla-2020-1");
    assert_eq!(third.slug, "toyota-corolla-2020-2");
}

#[tokio::test]
#[ignore] // Requires actual MongoDB
async fn test_unique_index_rejects_duplicate_slug() {
    let repo = fresh_repo("it_unique_index").await;

    repo.create(car_input("Honda Civic"), "honda-civic".to_string())
        .await
        .unwrap();

    // Bypass allocation and force the same slug at the repository layer
    let result = repo
        .create(car_input("Honda Civic"), "honda-civic".to_string())
        .await;

    assert!(
        matches!(result, Err(ListingError::DuplicateSlug(ref slug)) if slug == "honda-civic"),
        "expected DuplicateSlug, got {:?}",
        result
    );
}

#[tokio::test]
#[ignore] // Requires actual MongoDB
async fn test_concurrent_creates_never_share_a_slug() {
    let repo = fresh_repo("it_concurrent").await;
    let service = ListingService::new(repo);

    let (a, b) = tokio::join!(
        service.create_listing(car_input("Honda Civic")),
        service.create_listing(car_input("Honda Civic")),
    );

    let a = a.unwrap();
    let b = b.unwrap();

    assert_ne!(a.slug, b.slug);
    let mut slugs = vec![a.slug, b.slug];
    slugs.sort();
    assert_eq!(slugs, vec!["honda-civic", "honda-civic-1"]);
}

#[tokio::test]
#[ignore] // Requires actual MongoDB
async fn test_title_change_reallocates_slug() {
    let repo = fresh_repo("it_title_change").await;
    let service = ListingService::new(repo);

    let created = service.create_listing(car_input("Honda Civic")).await.unwrap();
    assert_eq!(created.slug, "honda-civic");

    let updated = service
        .update_listing(
            created.id,
            UpdateListing {
                title: Some("Honda Accord".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.title, "Honda Accord");
    assert_eq!(updated.slug, "honda-accord");

    // The old slug is free again
    let result = service.get_by_slug("honda-civic").await;
    assert!(matches!(result, Err(ListingError::SlugNotFound(_))));
}

#[tokio::test]
#[ignore] // Requires actual MongoDB
async fn test_paginated_filtered_listing() {
    let repo = fresh_repo("it_pagination").await;
    let service = ListingService::new(repo);

    for i in 0..5 {
        let mut input = car_input(&format!("Car number {}", i));
        input.is_featured = i % 2 == 0;
        service.create_listing(input).await.unwrap();
    }

    let page = service
        .list_listings(ListingFilter {
            page: 1,
            limit: 2,
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(page.total, 5);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.data.len(), 2);

    let featured = service.featured_listings(10).await.unwrap();
    assert_eq!(featured.len(), 3);
}
