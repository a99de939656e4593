use crate::error::{parse_item_id, ApiError, ErrorResponse};
use crate::models::Item;
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, extract::Path, http::StatusCode, Json};

/// GET /items/:id handler - Retrieve a single item
#[utoipa::path(
    get,
    path = routes::ITEM,
    params(
        ("id" = u64, Path, description = "Item id")
    ),
    responses(
        (status = 200, description = "Item found", body = Item),
        (status = 400, description = "Invalid id or undecodable record", body = ErrorResponse),
        (status = 404, description = "Item not found", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    ),
    tag = "items"
)]
pub async fn get_handler(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    let id = parse_item_id(&id_str)?;

    let item = state.item_store.read(id).await?;

    tracing::info!("Successfully retrieved item with id: {}", id);
    Ok((StatusCode::OK, Json(item)))
}
