//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "ShareHub Server",
        version = "0.1.0",
        description = "Peer-to-peer item sharing: users, items, bookings, requests"
    ),
    servers(
        (url = "http://localhost:9090", description = "Local development server")
    ),
    nest(
        (path = "/users", api = domain_users::ApiDoc),
        (path = "/items", api = domain_items::ApiDoc),
        (path = "/bookings", api = domain_bookings::ApiDoc),
        (path = "/requests", api = domain_requests::ApiDoc)
    ),
    tags(
        (name = "Users", description = "User registration and maintenance"),
        (name = "Items", description = "Item listings, search and comments"),
        (name = "Bookings", description = "Booking lifecycle and listings"),
        (name = "Requests", description = "Item requests and answering listings")
    )
)]
pub struct ApiDoc;
