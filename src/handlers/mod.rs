pub mod health;
pub mod list;
pub mod create;
pub mod get;
pub mod put;
pub mod delete;

pub use health::health_handler;
pub use list::list_handler;
pub use create::create_handler;
pub use get::get_handler;
pub use put::put_handler;
pub use delete::delete_handler;

#[cfg(test)]
pub(crate) mod test_util {
    use axum::{body::Body, http::Request, response::Response};
    use serde::de::DeserializeOwned;
    use tower::ServiceExt;

    pub async fn send(app: &axum::Router, method: &str, uri: &str, body: Option<String>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json)
            }
            None => Body::empty(),
        };

        app.clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap()
    }

    pub async fn read_json<T: DeserializeOwned>(response: Response) -> T {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }
}
