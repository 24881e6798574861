//! The per-category goal report: every goal of a category plus summary statistics.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    AppState, Error,
    category::{Category, CategoryId, get_category},
    db::lock_connection,
    expense::sum_expenses_in_category,
    goal::{GoalStatus, get_goals_for_category, status::evaluate_goals},
    json::ApiPath,
    timestamp,
};

/// Summary statistics over the goals of a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalStatistics {
    /// Everything spent in the category, regardless of goal windows.
    pub total_category_spending: f64,
    pub total_goals: usize,
    /// Goals whose window has not ended yet.
    pub active_goals: usize,
    pub achieved_goals: usize,
    /// Goals whose window has ended without being achieved.
    pub missed_goals: usize,
    /// The percentage of goals achieved, zero when there are no goals.
    pub success_rate: f64,
}

impl GoalStatistics {
    /// Summarise `goals` as of `now`.
    pub fn new(goals: &[GoalStatus], total_category_spending: f64, now: OffsetDateTime) -> Self {
        let total_goals = goals.len();
        let active_goals = goals
            .iter()
            .filter(|status| status.goal.window_end >= now)
            .count();
        let achieved_goals = goals.iter().filter(|status| status.achieved).count();
        let missed_goals = goals
            .iter()
            .filter(|status| !status.achieved && status.goal.window_end < now)
            .count();

        let success_rate = if total_goals == 0 {
            0.0
        } else {
            achieved_goals as f64 * 100.0 / total_goals as f64
        };

        Self {
            total_category_spending,
            total_goals,
            active_goals,
            achieved_goals,
            missed_goals,
            success_rate,
        }
    }
}

/// Response body of the category goal report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryGoalReport {
    pub category: Category,
    pub goals: Vec<GoalStatus>,
    pub statistics: GoalStatistics,
}

/// Evaluate every goal of a category and summarise them.
pub async fn get_category_goal_report_endpoint(
    State(state): State<AppState>,
    ApiPath(category_id): ApiPath<CategoryId>,
) -> Result<Json<CategoryGoalReport>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    let category = get_category(category_id, &connection)?;
    let goals = evaluate_goals(get_goals_for_category(category_id, &connection)?, &connection);
    let total_category_spending = sum_expenses_in_category(category_id, &connection)?;
    let statistics = GoalStatistics::new(&goals, total_category_spending, timestamp::now());

    Ok(Json(CategoryGoalReport {
        category,
        goals,
        statistics,
    }))
}
