//! HTTP handlers for the Contacts API

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

use crate::error::ContactResult;
use crate::models::{
    Contact, ContactFilter, ContactPage, ContactStatus, CreateContact, UpdateContactStatus,
};
use crate::repository::ContactRepository;
use crate::service::ContactService;

/// OpenAPI documentation for the Contacts API
#[derive(OpenApi)]
#[openapi(
    paths(create_contact, list_contacts, count_contacts, update_status),
    components(
        schemas(
            Contact, CreateContact, UpdateContactStatus, ContactFilter,
            ContactPage, ContactStatus
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Contacts", description = "Contact message endpoints")
    )
)]
pub struct ApiDoc;

/// Create the contacts router with all HTTP endpoints
pub fn router<R: ContactRepository + 'static>(service: ContactService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_contacts).post(create_contact))
        .route("/count", get(count_contacts))
        .route("/{id}/status", put(update_status))
        .with_state(shared_service)
}

/// Submit a new contact message
#[utoipa::path(
    post,
    path = "",
    tag = "Contacts",
    request_body = CreateContact,
    responses(
        (status = 201, description = "Message sent successfully", body = Contact),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_contact<R: ContactRepository>(
    State(service): State<Arc<ContactService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateContact>,
) -> ContactResult<impl IntoResponse> {
    let contact = service.create_contact(input).await?;
    Ok((StatusCode::CREATED, Json(contact)))
}

/// List contact messages with optional filters
#[utoipa::path(
    get,
    path = "",
    tag = "Contacts",
    params(ContactFilter),
    responses(
        (status = 200, description = "One page of contact messages", body = ContactPage),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_contacts<R: ContactRepository>(
    State(service): State<Arc<ContactService<R>>>,
    Query(filter): Query<ContactFilter>,
) -> ContactResult<Json<ContactPage>> {
    let page = service.list_contacts(filter).await?;
    Ok(Json(page))
}

/// Count contact messages matching a filter
#[utoipa::path(
    get,
    path = "/count",
    tag = "Contacts",
    params(ContactFilter),
    responses(
        (status = 200, description = "Contact message count", body = u64),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn count_contacts<R: ContactRepository>(
    State(service): State<Arc<ContactService<R>>>,
    Query(filter): Query<ContactFilter>,
) -> ContactResult<Json<u64>> {
    let count = service.count_contacts(filter).await?;
    Ok(Json(count))
}

/// Update a contact message's status
#[utoipa::path(
    put,
    path = "/{id}/status",
    tag = "Contacts",
    params(
        ("id" = Uuid, Path, description = "Contact message ID")
    ),
    request_body = UpdateContactStatus,
    responses(
        (status = 200, description = "Status updated", body = Contact),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_status<R: ContactRepository>(
    State(service): State<Arc<ContactService<R>>>,
    UuidPath(id): UuidPath,
    Json(input): Json<UpdateContactStatus>,
) -> ContactResult<Json<Contact>> {
    let contact = service.update_status(id, input.status).await?;
    Ok(Json(contact))
}
