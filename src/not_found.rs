use axum::response::{IntoResponse, Response};

use crate::Error;

/// The fallback for requests that match no route.
pub async fn get_404_not_found() -> Response {
    Error::NotFound.into_response()
}
