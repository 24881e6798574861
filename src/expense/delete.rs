//! Expense deletion endpoint.

use axum::{Json, extract::State};

use crate::{
    AppState, Error,
    db::lock_connection,
    expense::{ExpenseId, db::delete_expense},
    goal::refresh_goals_for_categories,
    json::{ApiPath, MessageResponse},
};

/// Delete an expense and refresh the goals of its category.
pub async fn delete_expense_endpoint(
    State(state): State<AppState>,
    ApiPath(expense_id): ApiPath<ExpenseId>,
) -> Result<Json<MessageResponse>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    let expense = delete_expense(expense_id, &connection)?;
    tracing::info!("Deleted expense {expense_id}");

    refresh_goals_for_categories(&[expense.category_id], &connection);

    Ok(Json(MessageResponse::new("Expense deleted successfully")))
}

#[cfg(test)]
mod delete_expense_endpoint_tests {
    use axum::extract::State;
    use time::macros::datetime;

    use crate::{
        Error,
        category::{CategoryTitle, create_category},
        expense::{NewExpense, create_expense, delete_expense_endpoint, get_expense},
        goal::{NewGoal, create_goal, get_goal, refresh_goals_for_categories},
        json::ApiPath,
        test_utils::get_test_app_state,
    };

    #[tokio::test]
    async fn delete_expense_endpoint_succeeds() {
        let state = get_test_app_state();
        let expense = {
            let connection = state.db_connection.lock().unwrap();
            let category =
                create_category(CategoryTitle::new_unchecked("Food"), &connection).unwrap();
            create_expense(
                NewExpense::new_unchecked(9.5, datetime!(2025-08-01 09:00 UTC), "Coffee", category.id),
                &connection,
            )
            .unwrap()
        };

        let response = delete_expense_endpoint(State(state.clone()), ApiPath(expense.id))
            .await
            .expect("Could not delete expense");

        assert_eq!(response.message, "Expense deleted successfully");
        assert_eq!(
            get_expense(expense.id, &state.db_connection.lock().unwrap()),
            Err(Error::ExpenseNotFound)
        );
    }

    #[tokio::test]
    async fn delete_missing_expense_returns_not_found() {
        let state = get_test_app_state();

        let result = delete_expense_endpoint(State(state), ApiPath(999999)).await;

        assert_eq!(result.err(), Some(Error::ExpenseNotFound));
    }

    #[tokio::test]
    async fn deleting_expense_refreshes_goal_and_clears_link() {
        let state = get_test_app_state();
        let (expense, goal) = {
            let connection = state.db_connection.lock().unwrap();
            let category =
                create_category(CategoryTitle::new_unchecked("Food"), &connection).unwrap();
            let expense = create_expense(
                NewExpense::new_unchecked(
                    300.0,
                    datetime!(2025-08-15 19:00 UTC),
                    "Fancy dinner",
                    category.id,
                ),
                &connection,
            )
            .unwrap();
            let goal = create_goal(
                NewGoal {
                    target_amount: 200.0,
                    window_start: datetime!(2025-08-01 00:00 UTC),
                    window_end: datetime!(2025-08-31 23:59:59 UTC),
                    linked_expense_id: Some(expense.id),
                    category_id: category.id,
                },
                &connection,
            )
            .unwrap();
            refresh_goals_for_categories(&[category.id], &connection);
            (expense, goal)
        };
        assert!(!get_goal(goal.id, &state.db_connection.lock().unwrap()).unwrap().achieved);

        delete_expense_endpoint(State(state.clone()), ApiPath(expense.id))
            .await
            .expect("Could not delete expense");

        let goal = get_goal(goal.id, &state.db_connection.lock().unwrap()).unwrap();
        assert!(goal.achieved);
        assert_eq!(goal.linked_expense_id, None);
    }
}
