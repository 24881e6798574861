//! Goal read endpoints. Every read re-evaluates the goals it returns.

use axum::{Json, extract::State};

use crate::{
    AppState, Error,
    db::lock_connection,
    goal::{
        GoalId, GoalStatus, get_all_goals,
        status::{evaluate_goal, evaluate_goals},
    },
    json::ApiPath,
};

/// List the status of every goal, the most recently started first.
pub async fn get_goals_endpoint(
    State(state): State<AppState>,
) -> Result<Json<Vec<GoalStatus>>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    let goals = get_all_goals(&connection)?;

    Ok(Json(evaluate_goals(goals, &connection)))
}

/// Get the status of a single goal.
pub async fn get_goal_endpoint(
    State(state): State<AppState>,
    ApiPath(goal_id): ApiPath<GoalId>,
) -> Result<Json<GoalStatus>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    evaluate_goal(goal_id, &connection).map(Json)
}

#[cfg(test)]
mod goal_read_endpoint_tests {
    use axum::extract::State;
    use time::macros::datetime;

    use crate::{
        Error,
        category::{CategoryTitle, create_category},
        expense::{NewExpense, create_expense},
        goal::{NewGoal, create_goal, get_goal, get_goal_endpoint, get_goals_endpoint},
        json::ApiPath,
        test_utils::get_test_app_state,
    };

    #[tokio::test]
    async fn reading_goals_evaluates_them() {
        let state = get_test_app_state();
        let goal = {
            let connection = state.db_connection.lock().unwrap();
            let category =
                create_category(CategoryTitle::new_unchecked("Food"), &connection).unwrap();
            let goal = create_goal(
                NewGoal {
                    target_amount: 200.0,
                    window_start: datetime!(2025-08-01 00:00 UTC),
                    window_end: datetime!(2025-08-31 23:59:59 UTC),
                    linked_expense_id: None,
                    category_id: category.id,
                },
                &connection,
            )
            .unwrap();
            create_expense(
                NewExpense::new_unchecked(160.0, datetime!(2025-08-15 12:00 UTC), "Market", category.id),
                &connection,
            )
            .unwrap();
            goal
        };
        // Written directly to the database, so the stored flag is stale.
        assert!(!goal.achieved);

        let statuses = get_goals_endpoint(State(state.clone()))
            .await
            .expect("Could not list goals");
        let single = get_goal_endpoint(State(state.clone()), ApiPath(goal.id))
            .await
            .expect("Could not get goal");

        assert_eq!(statuses.len(), 1);
        assert_eq!(statuses[0], single.0);
        assert_eq!(single.total_spent, 160.0);
        assert_eq!(single.progress, 80.0);
        assert_eq!(single.remaining, 40.0);
        assert!(single.achieved);
        assert!(get_goal(goal.id, &state.db_connection.lock().unwrap()).unwrap().achieved);
    }

    #[tokio::test]
    async fn missing_goal_is_not_found() {
        let state = get_test_app_state();

        let result = get_goal_endpoint(State(state), ApiPath(3)).await;

        assert_eq!(result.err(), Some(Error::GoalNotFound));
    }
}
