//! Category deletion endpoint.

use axum::{Json, extract::State};

use crate::{
    AppState, Error,
    category::{CategoryId, db::delete_category},
    db::lock_connection,
    json::{ApiPath, MessageResponse},
};

/// Delete a category that no expense or goal refers to.
pub async fn delete_category_endpoint(
    State(state): State<AppState>,
    ApiPath(category_id): ApiPath<CategoryId>,
) -> Result<Json<MessageResponse>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    match delete_category(category_id, &connection) {
        Ok(()) => {
            tracing::info!("Deleted category {category_id}");
            Ok(Json(MessageResponse::new("Category deleted successfully")))
        }
        Err(Error::CategoryInUse) => {
            tracing::warn!("Refused to delete category {category_id}, it is still in use");
            Err(Error::CategoryInUse)
        }
        Err(error) => Err(error),
    }
}

#[cfg(test)]
mod delete_category_endpoint_tests {
    use axum::extract::State;
    use time::macros::datetime;

    use crate::{
        Error,
        category::{CategoryTitle, create_category, delete_category_endpoint, get_category},
        expense::{NewExpense, create_expense},
        json::ApiPath,
        test_utils::get_test_app_state,
    };

    #[tokio::test]
    async fn delete_category_endpoint_succeeds() {
        let state = get_test_app_state();
        let category = create_category(
            CategoryTitle::new_unchecked("Test Category"),
            &state.db_connection.lock().unwrap(),
        )
        .expect("Could not create test category");

        let response = delete_category_endpoint(State(state.clone()), ApiPath(category.id))
            .await
            .expect("Could not delete category");

        assert_eq!(response.message, "Category deleted successfully");
        assert_eq!(
            get_category(category.id, &state.db_connection.lock().unwrap()),
            Err(Error::CategoryNotFound)
        );
    }

    #[tokio::test]
    async fn delete_category_endpoint_with_invalid_id_returns_not_found() {
        let state = get_test_app_state();

        let result = delete_category_endpoint(State(state), ApiPath(999999)).await;

        assert_eq!(result.err(), Some(Error::CategoryNotFound));
    }

    #[tokio::test]
    async fn delete_category_endpoint_refuses_referenced_category() {
        let state = get_test_app_state();
        let category = {
            let connection = state.db_connection.lock().unwrap();
            let category =
                create_category(CategoryTitle::new_unchecked("Food"), &connection).unwrap();
            create_expense(
                NewExpense::new_unchecked(
                    25.0,
                    datetime!(2025-08-10 18:30 UTC),
                    "Dinner",
                    category.id,
                ),
                &connection,
            )
            .unwrap();
            category
        };

        let result = delete_category_endpoint(State(state.clone()), ApiPath(category.id)).await;

        assert_eq!(result.err(), Some(Error::CategoryInUse));
        assert!(get_category(category.id, &state.db_connection.lock().unwrap()).is_ok());
    }
}
