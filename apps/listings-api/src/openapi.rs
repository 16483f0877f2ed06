//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Listings API",
        version = "0.1.0",
        description = "MongoDB-based REST API for classifieds listings, inquiries, and contact messages",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/listings", api = domain_listings::ApiDoc),
        (path = "/api/inquiries", api = domain_inquiries::ApiDoc),
        (path = "/api/contacts", api = domain_contacts::ApiDoc)
    ),
    tags(
        (name = "Listings", description = "Listing management endpoints (MongoDB)"),
        (name = "Inquiries", description = "Buyer inquiry endpoints"),
        (name = "Contacts", description = "Contact message endpoints")
    )
)]
pub struct ApiDoc;
