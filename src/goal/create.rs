//! Goal creation endpoint.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    AppState, Error,
    category::ensure_category_exists,
    db::lock_connection,
    expense::ensure_expense_exists,
    goal::{GoalResponse, create_goal, domain::CreateGoalBody, status::evaluate},
    json::ApiJson,
    timestamp,
};

/// Create a goal and evaluate it against the expenses already in its window.
pub async fn create_goal_endpoint(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateGoalBody>,
) -> Result<Response, Error> {
    let new_goal = body.into_new_goal(timestamp::now())?;

    let connection = lock_connection(&state.db_connection)?;
    ensure_category_exists(new_goal.category_id, &connection)?;

    if let Some(expense_id) = new_goal.linked_expense_id {
        ensure_expense_exists(expense_id, &connection)?;
    }

    let goal = create_goal(new_goal, &connection)?;
    tracing::info!(
        "Created goal {} of {} for category {}",
        goal.id,
        goal.target_amount,
        goal.category_id
    );

    let status = evaluate(goal, &connection)?;

    Ok((
        StatusCode::CREATED,
        Json(GoalResponse {
            message: "Goal created successfully".to_owned(),
            goal: status.goal,
        }),
    )
        .into_response())
}
