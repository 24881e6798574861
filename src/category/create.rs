//! Category creation endpoint.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    AppState, Error,
    category::{CategoryResponse, create_category, domain::CategoryBody},
    db::lock_connection,
    json::ApiJson,
};

/// Create a category from a JSON body with a `title`.
///
/// Responds with 201 and the created category, or 400 if the title is missing or blank.
pub async fn create_category_endpoint(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CategoryBody>,
) -> Result<Response, Error> {
    let title = body.title()?;

    let connection = lock_connection(&state.db_connection)?;
    let category = create_category(title, &connection)?;
    tracing::info!("Created category {} \"{}\"", category.id, category.title);

    Ok((
        StatusCode::CREATED,
        Json(CategoryResponse {
            message: "Category created successfully".to_owned(),
            category,
        }),
    )
        .into_response())
}
