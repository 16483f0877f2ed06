//! HTTP handlers for the Inquiries API

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use axum_helpers::{
    UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::InquiryResult;
use crate::models::{
    CreateInquiry, Inquiry, InquiryFilter, InquiryPage, InquiryStatus, UpdateInquiryStatus,
};
use crate::repository::InquiryRepository;
use crate::service::InquiryService;

/// OpenAPI documentation for the Inquiries API
#[derive(OpenApi)]
#[openapi(
    paths(
        create_inquiry,
        list_inquiries,
        count_inquiries,
        inquiries_for_listing,
        update_status,
    ),
    components(
        schemas(
            Inquiry, CreateInquiry, UpdateInquiryStatus, InquiryFilter,
            InquiryPage, InquiryStatus
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Inquiries", description = "Buyer inquiry endpoints")
    )
)]
pub struct ApiDoc;

/// Create the inquiries router with all HTTP endpoints
pub fn router<R: InquiryRepository + 'static>(service: InquiryService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_inquiries).post(create_inquiry))
        .route("/count", get(count_inquiries))
        .route("/listing/{listingId}", get(inquiries_for_listing))
        .route("/{id}/status", put(update_status))
        .with_state(shared_service)
}

/// Submit a new inquiry
#[utoipa::path(
    post,
    path = "",
    tag = "Inquiries",
    request_body = CreateInquiry,
    responses(
        (status = 201, description = "Inquiry submitted successfully", body = Inquiry),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_inquiry<R: InquiryRepository>(
    State(service): State<Arc<InquiryService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateInquiry>,
) -> InquiryResult<impl IntoResponse> {
    let inquiry = service.create_inquiry(input).await?;
    Ok((StatusCode::CREATED, Json(inquiry)))
}

/// List inquiries with optional filters
#[utoipa::path(
    get,
    path = "",
    tag = "Inquiries",
    params(InquiryFilter),
    responses(
        (status = 200, description = "One page of inquiries", body = InquiryPage),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_inquiries<R: InquiryRepository>(
    State(service): State<Arc<InquiryService<R>>>,
    Query(filter): Query<InquiryFilter>,
) -> InquiryResult<Json<InquiryPage>> {
    let page = service.list_inquiries(filter).await?;
    Ok(Json(page))
}

/// Count inquiries matching a filter
#[utoipa::path(
    get,
    path = "/count",
    tag = "Inquiries",
    params(InquiryFilter),
    responses(
        (status = 200, description = "Inquiry count", body = u64),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn count_inquiries<R: InquiryRepository>(
    State(service): State<Arc<InquiryService<R>>>,
    Query(filter): Query<InquiryFilter>,
) -> InquiryResult<Json<u64>> {
    let count = service.count_inquiries(filter).await?;
    Ok(Json(count))
}

/// List all inquiries referencing a listing
#[utoipa::path(
    get,
    path = "/listing/{listingId}",
    tag = "Inquiries",
    params(
        ("listingId" = Uuid, Path, description = "Listing ID")
    ),
    responses(
        (status = 200, description = "Inquiries for the listing", body = Vec<Inquiry>),
        (status = 400, response = BadRequestUuidResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn inquiries_for_listing<R: InquiryRepository>(
    State(service): State<Arc<InquiryService<R>>>,
    UuidPath(listing_id): UuidPath,
) -> InquiryResult<Json<Vec<Inquiry>>> {
    let inquiries = service.inquiries_for_listing(listing_id).await?;
    Ok(Json(inquiries))
}

/// Update an inquiry's status
#[utoipa::path(
    put,
    path = "/{id}/status",
    tag = "Inquiries",
    params(
        ("id" = Uuid, Path, description = "Inquiry ID")
    ),
    request_body = UpdateInquiryStatus,
    responses(
        (status = 200, description = "Status updated", body = Inquiry),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_status<R: InquiryRepository>(
    State(service): State<Arc<InquiryService<R>>>,
    UuidPath(id): UuidPath,
    Json(input): Json<UpdateInquiryStatus>,
) -> InquiryResult<Json<Inquiry>> {
    let inquiry = service.update_status(id, input.status).await?;
    Ok(Json(inquiry))
}
