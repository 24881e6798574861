//! Goal update endpoint.

use axum::{Json, extract::State};

use crate::{
    AppState, Error,
    category::ensure_category_exists,
    db::lock_connection,
    expense::ensure_expense_exists,
    goal::{
        GoalId, GoalResponse, db::update_goal, domain::UpdateGoalBody, get_goal, status::evaluate,
    },
    json::{ApiJson, ApiPath},
};

/// Partially update a goal and re-evaluate it.
///
/// Sending `"linkedExpenseId": null` unlinks the expense.
pub async fn update_goal_endpoint(
    State(state): State<AppState>,
    ApiPath(goal_id): ApiPath<GoalId>,
    ApiJson(body): ApiJson<UpdateGoalBody>,
) -> Result<Json<GoalResponse>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    let existing = get_goal(goal_id, &connection)?;

    if let Some(category_id) = body.category_id {
        ensure_category_exists(category_id, &connection)?;
    }

    if let Some(Some(expense_id)) = body.linked_expense_id {
        ensure_expense_exists(expense_id, &connection)?;
    }

    let changes = body.apply_to(&existing)?;
    let goal = update_goal(goal_id, changes, &connection)?;
    tracing::info!("Updated goal {}", goal.id);

    let status = evaluate(goal, &connection)?;

    Ok(Json(GoalResponse {
        message: "Goal updated successfully".to_owned(),
        goal: status.goal,
    }))
}
