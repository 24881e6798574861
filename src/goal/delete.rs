//! Goal deletion endpoint.

use axum::{Json, extract::State};

use crate::{
    AppState, Error,
    db::lock_connection,
    goal::{GoalId, db::delete_goal},
    json::{ApiPath, MessageResponse},
};

/// Delete a goal.
pub async fn delete_goal_endpoint(
    State(state): State<AppState>,
    ApiPath(goal_id): ApiPath<GoalId>,
) -> Result<Json<MessageResponse>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    delete_goal(goal_id, &connection)?;
    tracing::info!("Deleted goal {goal_id}");

    Ok(Json(MessageResponse::new("Goal deleted successfully")))
}
