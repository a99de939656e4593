use crate::error::{parse_item_id, ApiError, ErrorResponse};
use crate::models::{Item, ItemInput};
use crate::routes;
use crate::state::AppState;
use axum::{extract::rejection::JsonRejection, extract::State, extract::Path, http::StatusCode, Json};

/// PUT /items/:id handler - Replace an item
///
/// The stored id always comes from the path. Writing to an id that has no
/// record creates it.
#[utoipa::path(
    put,
    path = routes::ITEM,
    params(
        ("id" = u64, Path, description = "Item id")
    ),
    request_body = ItemInput,
    responses(
        (status = 200, description = "Item stored", body = Item),
        (status = 400, description = "Invalid id or item body", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    ),
    tag = "items"
)]
pub async fn put_handler(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    payload: Result<Json<ItemInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    let id = parse_item_id(&id_str)?;
    let Json(input) = payload?;

    let item = state.item_store.update(id, input.into()).await?;

    tracing::info!("Successfully stored item with id: {}", id);
    Ok((StatusCode::OK, Json(item)))
}
