//! Category read endpoints.

use axum::{Json, extract::State};

use crate::{
    AppState, Error,
    category::{Category, CategoryId, get_all_categories, get_category},
    db::lock_connection,
    json::ApiPath,
};

/// List all categories ordered by title.
pub async fn get_categories_endpoint(
    State(state): State<AppState>,
) -> Result<Json<Vec<Category>>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    get_all_categories(&connection).map(Json)
}

/// Get a single category.
pub async fn get_category_endpoint(
    State(state): State<AppState>,
    ApiPath(category_id): ApiPath<CategoryId>,
) -> Result<Json<Category>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    get_category(category_id, &connection).map(Json)
}
