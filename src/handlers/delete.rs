use crate::error::{parse_item_id, ApiError, ErrorResponse};
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, extract::Path, http::StatusCode};

/// DELETE /items/:id handler - Remove an item
///
/// Succeeds whether or not the item existed.
#[utoipa::path(
    delete,
    path = routes::ITEM,
    params(
        ("id" = u64, Path, description = "Item id")
    ),
    responses(
        (status = 204, description = "Item removed or already absent"),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    ),
    tag = "items"
)]
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_item_id(&id_str)?;

    if state.item_store.delete(id).await? {
        tracing::info!("Deleted item with id: {}", id);
    } else {
        tracing::info!("Delete of absent item with id: {}", id);
    }
    Ok(StatusCode::NO_CONTENT)
}
