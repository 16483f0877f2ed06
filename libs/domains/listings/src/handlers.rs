//! HTTP handlers for the Listings API

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ListingResult;
use crate::models::{
    CreateListing, FuelType, Listing, ListingCategory, ListingFilter, ListingImage, ListingPage,
    ListingStatus, Transmission, UpdateListing, VehicleDetails,
};
use crate::repository::ListingRepository;
use crate::service::ListingService;

/// OpenAPI documentation for the Listings API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_listings,
        create_listing,
        count_listings,
        featured_listings,
        listings_by_category,
        get_by_slug,
        get_listing,
        update_listing,
        delete_listing,
    ),
    components(
        schemas(
            Listing, CreateListing, UpdateListing, ListingFilter, ListingPage,
            ListingStatus, ListingCategory, ListingImage, VehicleDetails,
            Transmission, FuelType
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Listings", description = "Listing management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the listings router with all HTTP endpoints
pub fn router<R: ListingRepository + 'static>(service: ListingService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_listings).post(create_listing))
        .route("/count", get(count_listings))
        .route("/featured", get(featured_listings))
        .route("/category/{category}", get(listings_by_category))
        .route("/slug/{slug}", get(get_by_slug))
        .route(
            "/{id}",
            get(get_listing).put(update_listing).delete(delete_listing),
        )
        .with_state(shared_service)
}

/// List listings with optional filters
#[utoipa::path(
    get,
    path = "",
    tag = "Listings",
    params(ListingFilter),
    responses(
        (status = 200, description = "One page of listings", body = ListingPage),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_listings<R: ListingRepository>(
    State(service): State<Arc<ListingService<R>>>,
    Query(filter): Query<ListingFilter>,
) -> ListingResult<Json<ListingPage>> {
    let page = service.list_listings(filter).await?;
    Ok(Json(page))
}

/// Create a new listing
#[utoipa::path(
    post,
    path = "",
    tag = "Listings",
    request_body = CreateListing,
    responses(
        (status = 201, description = "Listing created successfully", body = Listing),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_listing<R: ListingRepository>(
    State(service): State<Arc<ListingService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateListing>,
) -> ListingResult<impl IntoResponse> {
    let listing = service.create_listing(input).await?;
    Ok((StatusCode::CREATED, Json(listing)))
}

/// Count listings matching a filter
#[utoipa::path(
    get,
    path = "/count",
    tag = "Listings",
    params(ListingFilter),
    responses(
        (status = 200, description = "Listing count", body = u64),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn count_listings<R: ListingRepository>(
    State(service): State<Arc<ListingService<R>>>,
    Query(filter): Query<ListingFilter>,
) -> ListingResult<Json<u64>> {
    let count = service.count_listings(filter).await?;
    Ok(Json(count))
}

/// Query parameters for the featured carousel
#[derive(Debug, serde::Deserialize, utoipa::IntoParams)]
pub struct FeaturedQuery {
    /// Maximum number of results
    #[serde(default = "default_featured_limit")]
    pub limit: i64,
}

fn default_featured_limit() -> i64 {
    10
}

/// Get featured listings
#[utoipa::path(
    get,
    path = "/featured",
    tag = "Listings",
    params(FeaturedQuery),
    responses(
        (status = 200, description = "Featured listings", body = Vec<Listing>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn featured_listings<R: ListingRepository>(
    State(service): State<Arc<ListingService<R>>>,
    Query(query): Query<FeaturedQuery>,
) -> ListingResult<Json<Vec<Listing>>> {
    let listings = service.featured_listings(query.limit).await?;
    Ok(Json(listings))
}

/// Pagination query parameters
#[derive(Debug, serde::Deserialize, utoipa::IntoParams)]
pub struct PageQuery {
    /// Page number, starting at 1
    #[serde(default = "default_page")]
    pub page: u64,
    /// Page size
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> i64 {
    10
}

/// Get listings in a category
#[utoipa::path(
    get,
    path = "/category/{category}",
    tag = "Listings",
    params(
        ("category" = ListingCategory, Path, description = "Listing category"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Listings in the category", body = Vec<Listing>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn listings_by_category<R: ListingRepository>(
    State(service): State<Arc<ListingService<R>>>,
    Path(category): Path<ListingCategory>,
    Query(query): Query<PageQuery>,
) -> ListingResult<Json<Vec<Listing>>> {
    let listings = service
        .listings_by_category(category, query.page, query.limit)
        .await?;
    Ok(Json(listings))
}

/// Get a listing by slug
#[utoipa::path(
    get,
    path = "/slug/{slug}",
    tag = "Listings",
    params(
        ("slug" = String, Path, description = "Listing slug")
    ),
    responses(
        (status = 200, description = "Listing found", body = Listing),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_by_slug<R: ListingRepository>(
    State(service): State<Arc<ListingService<R>>>,
    Path(slug): Path<String>,
) -> ListingResult<Json<Listing>> {
    let listing = service.get_by_slug(&slug).await?;
    Ok(Json(listing))
}

/// Get a listing by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Listings",
    params(
        ("id" = Uuid, Path, description = "Listing ID")
    ),
    responses(
        (status = 200, description = "Listing found", body = Listing),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_listing<R: ListingRepository>(
    State(service): State<Arc<ListingService<R>>>,
    UuidPath(id): UuidPath,
) -> ListingResult<Json<Listing>> {
    let listing = service.get_listing(id).await?;
    Ok(Json(listing))
}

/// Update a listing
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Listings",
    params(
        ("id" = Uuid, Path, description = "Listing ID")
    ),
    request_body = UpdateListing,
    responses(
        (status = 200, description = "Listing updated successfully", body = Listing),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_listing<R: ListingRepository>(
    State(service): State<Arc<ListingService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateListing>,
) -> ListingResult<Json<Listing>> {
    let listing = service.update_listing(id, input).await?;
    Ok(Json(listing))
}

/// Delete a listing
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Listings",
    params(
        ("id" = Uuid, Path, description = "Listing ID")
    ),
    responses(
        (status = 204, description = "Listing deleted successfully"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_listing<R: ListingRepository>(
    State(service): State<Arc<ListingService<R>>>,
    UuidPath(id): UuidPath,
) -> ListingResult<impl IntoResponse> {
    service.delete_listing(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockListingRepository;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::json;
    use tower::ServiceExt; // For oneshot()

    async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
        let bytes = body.collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_create_listing_returns_201_with_slug() {
        let mut repo = MockListingRepository::new();
        repo.expect_find_by_slug().returning(|_| Ok(None));
        repo.expect_create()
            .returning(|input, slug| Ok(Listing::new(input, slug)));

        let app = router(ListingService::new(repo));

        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::to_string(&json!({
                    "title": "Toyota Corolla 2020!",
                    "description": "Low mileage",
                    "price": 1550000,
                    "category": "cars",
                    "vehicle": {
                        "make": "Toyota",
                        "model": "Corolla",
                        "year": 2020
                    }
                }))
                .unwrap(),
            ))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);

        let listing: Listing = json_body(response.into_body()).await;
        assert_eq!(listing.title, "Toyota Corolla 2020!");
        assert_eq!(listing.slug, "toyota-corolla-2020");
        assert_eq!(listing.category, ListingCategory::Cars);
    }

    #[tokio::test]
    async fn test_create_listing_validates_input() {
        let repo = MockListingRepository::new();
        let app = router(ListingService::new(repo));

        // Empty title fails validation before any repository call
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::to_string(&json!({
                    "title": "",
                    "price": 100
                }))
                .unwrap(),
            ))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_listing_unknown_id_returns_404() {
        let mut repo = MockListingRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));

        let app = router(ListingService::new(repo));

        let request = Request::builder()
            .method("GET")
            .uri(format!("/{}", uuid::Uuid::new_v4()))
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_get_listing_invalid_uuid_returns_400() {
        let repo = MockListingRepository::new();
        let app = router(ListingService::new(repo));

        let request = Request::builder()
            .method("GET")
            .uri("/not-a-uuid")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_listings_returns_page_envelope() {
        let mut repo = MockListingRepository::new();
        repo.expect_list().returning(|_| Ok(vec![]));
        repo.expect_count().returning(|_| Ok(0));

        let app = router(ListingService::new(repo));

        let request = Request::builder()
            .method("GET")
            .uri("/?status=active&page=1&limit=10")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let page: ListingPage = json_body(response.into_body()).await;
        assert_eq!(page.total, 0);
        assert_eq!(page.page, 1);
        assert!(page.data.is_empty());
    }

    #[tokio::test]
    async fn test_get_by_slug_returns_200() {
        let mut repo = MockListingRepository::new();
        repo.expect_find_by_slug()
            .withf(|slug| slug == "honda-civic")
            .returning(|slug| {
                Ok(Some(Listing::new(
                    CreateListing {
                        title: "Honda Civic".to_string(),
                        description: String::new(),
                        price: 1_000_000,
                        category: ListingCategory::Cars,
                        status: ListingStatus::Active,
                        stock: 1,
                        is_featured: false,
                        images: vec![],
                        vehicle: None,
                        metadata: serde_json::Value::Null,
                    },
                    slug.to_string(),
                )))
            });

        let app = router(ListingService::new(repo));

        let request = Request::builder()
            .method("GET")
            .uri("/slug/honda-civic")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let listing: Listing = json_body(response.into_body()).await;
        assert_eq!(listing.slug, "honda-civic");
    }

    #[tokio::test]
    async fn test_delete_listing_returns_204() {
        let mut repo = MockListingRepository::new();
        repo.expect_delete().returning(|_| Ok(true));

        let app = router(ListingService::new(repo));

        let request = Request::builder()
            .method("DELETE")
            .uri(format!("/{}", uuid::Uuid::new_v4()))
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}
