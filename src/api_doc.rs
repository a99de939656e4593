use utoipa::OpenApi;

use crate::error::{ErrorResponse, HealthResponse, UnhealthyResponse};
use crate::handlers;
use crate::models::{Item, ItemInput};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "rust-redis-catalog API",
        version = "1.0.0",
        description = "A small catalog of priced items stored in Redis"
    ),
    paths(
        handlers::health::health_handler,
        handlers::list::list_handler,
        handlers::create::create_handler,
        handlers::get::get_handler,
        handlers::put::put_handler,
        handlers::delete::delete_handler
    ),
    components(
        schemas(
            Item,
            ItemInput,
            ErrorResponse,
            HealthResponse,
            UnhealthyResponse
        )
    ),
    tags(
        (name = "health", description = "Health check operations"),
        (name = "items", description = "Item catalog operations")
    )
)]
pub struct ApiDoc;
