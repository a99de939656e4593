use crate::error::{ApiError, ErrorResponse};
use crate::models::{Item, ItemInput};
use crate::routes;
use crate::state::AppState;
use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};

/// POST /items handler - Create an item with a store-assigned id
#[utoipa::path(
    post,
    path = routes::ITEMS,
    request_body = ItemInput,
    responses(
        (status = 201, description = "Item created", body = Item),
        (status = 400, description = "Invalid item body", body = ErrorResponse),
        (status = 500, description = "Store error", body = ErrorResponse)
    ),
    tag = "items"
)]
pub async fn create_handler(
    State(state): State<AppState>,
    payload: Result<Json<ItemInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    let Json(input) = payload?;

    let item = state.item_store.create(input.into()).await?;

    tracing::info!("Successfully created item with id: {}", item.id);
    Ok((StatusCode::CREATED, Json(item)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_util::{read_json, send};
    use std::collections::HashSet;

    #[tokio::test]
    async fn test_create_endpoint_success() {
        let (state, _) = AppState::in_memory();
        let app = routes::app(state);

        let body = serde_json::json!({"name": "Widget", "price": 9.99}).to_string();
        let response = send(&app, "POST", "/items", Some(body)).await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let item: Item = read_json(response).await;
        assert_eq!(
            item,
            Item { id: 1, name: "Widget".to_string(), price: 9.99 }
        );
    }

    #[tokio::test]
    async fn test_create_endpoint_ignores_client_id() {
        let (state, _) = AppState::in_memory();
        let app = routes::app(state);

        let body = serde_json::json!({"id": 77, "name": "Widget", "price": 1.0}).to_string();
        let response = send(&app, "POST", "/items", Some(body)).await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let item: Item = read_json(response).await;
        assert_eq!(item.id, 1);

        let response = send(&app, "GET", "/items/77", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_endpoint_accepts_null_and_negative_id() {
        let (state, _) = AppState::in_memory();
        let app = routes::app(state);

        let bodies = [
            r#"{"id": null, "name": "Widget", "price": 1.0}"#,
            r#"{"id": -1, "name": "Gadget", "price": 2.0}"#,
        ];
        for (expected_id, body) in (1u64..).zip(bodies) {
            let response = send(&app, "POST", "/items", Some(body.to_string())).await;

            assert_eq!(response.status(), StatusCode::CREATED);
            let item: Item = read_json(response).await;
            assert_eq!(item.id, expected_id);
        }
    }

    #[tokio::test]
    async fn test_create_endpoint_invalid_json() {
        let (state, _) = AppState::in_memory();
        let app = routes::app(state);

        let response = send(&app, "POST", "/items", Some("{invalid json}".to_string())).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ErrorResponse = read_json(response).await;
        assert!(error.error.contains("Invalid item body"));
    }

    #[tokio::test]
    async fn test_create_endpoint_missing_field() {
        let (state, _) = AppState::in_memory();
        let app = routes::app(state);

        let body = serde_json::json!({"name": "No price"}).to_string();
        let response = send(&app, "POST", "/items", Some(body)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_endpoint_concurrent_ids_unique() {
        let (state, _) = AppState::in_memory();
        let app = routes::app(state);

        let requests = (0..20).map(|i| {
            let app = app.clone();
            async move {
                let body = serde_json::json!({"name": format!("item-{}", i), "price": 1.0});
                let response = send(&app, "POST", "/items", Some(body.to_string())).await;
                read_json::<Item>(response).await.id
            }
        });
        let handles: Vec<_> = requests.map(tokio::spawn).collect();

        let mut ids = HashSet::new();
        for handle in handles {
            ids.insert(handle.await.unwrap());
        }
        assert_eq!(ids.len(), 20);
    }

    #[tokio::test]
    async fn test_create_endpoint_store_down() {
        let (state, kv) = AppState::in_memory();
        let app = routes::app(state);
        kv.set_offline(true);

        let body = serde_json::json!({"name": "Widget", "price": 9.99}).to_string();
        let response = send(&app, "POST", "/items", Some(body)).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let error: ErrorResponse = read_json(response).await;
        assert!(error.error.contains("Store error"));
    }
}
