//! Category rename endpoint.

use axum::{Json, extract::State};

use crate::{
    AppState, Error,
    category::{
        CategoryId, CategoryResponse, db::update_category, domain::CategoryBody,
        ensure_category_exists,
    },
    db::lock_connection,
    json::{ApiJson, ApiPath},
};

/// Rename a category.
///
/// A missing category is reported before a missing or blank title.
pub async fn update_category_endpoint(
    State(state): State<AppState>,
    ApiPath(category_id): ApiPath<CategoryId>,
    ApiJson(body): ApiJson<CategoryBody>,
) -> Result<Json<CategoryResponse>, Error> {
    let connection = lock_connection(&state.db_connection)?;
    ensure_category_exists(category_id, &connection)?;

    let title = body.title()?;
    let category = update_category(category_id, title, &connection)?;
    tracing::info!("Renamed category {} to \"{}\"", category.id, category.title);

    Ok(Json(CategoryResponse {
        message: "Category updated successfully".to_owned(),
        category,
    }))
}
