//! Evaluation of goals against the expenses made in their window.

use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    category::CategoryId,
    expense::sum_expenses_in_window,
    goal::{
        Goal, GoalId,
        db::{get_goal_ids_for_category, set_goal_achieved},
        get_goal,
    },
};

/// A goal together with how much has been spent against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalStatus {
    pub goal: Goal,
    /// The sum of the expenses in the goal's category and window.
    pub total_spent: f64,
    /// Whether `total_spent` is within the goal's target.
    pub achieved: bool,
    /// How much of the target has been spent, as a percentage capped at 100.
    pub progress: f64,
    /// How much may still be spent before the target is exceeded, never negative.
    pub remaining: f64,
}

impl GoalStatus {
    /// Compute the status of `goal` given the amount spent in its window.
    ///
    /// The `achieved` flag of the returned goal is set to the computed value.
    pub fn new(mut goal: Goal, total_spent: f64) -> Self {
        let target = goal.target_amount;
        let achieved = total_spent <= target;
        goal.achieved = achieved;

        Self {
            goal,
            total_spent,
            achieved,
            progress: (total_spent * 100.0 / target).min(100.0),
            remaining: (target - total_spent).max(0.0),
        }
    }

    /// The status reported for a goal that could not be evaluated.
    ///
    /// Keeps the stored `achieved` flag and reports nothing spent.
    pub fn fallback(goal: Goal) -> Self {
        Self {
            total_spent: 0.0,
            achieved: goal.achieved,
            progress: 0.0,
            remaining: goal.target_amount,
            goal,
        }
    }
}

/// Evaluate `goal` and persist its `achieved` flag if it changed.
pub fn evaluate(goal: Goal, connection: &Connection) -> Result<GoalStatus, Error> {
    let total_spent =
        sum_expenses_in_window(goal.category_id, goal.window_start, goal.window_end, connection)?;

    let stored_achieved = goal.achieved;
    let status = GoalStatus::new(goal, total_spent);

    if status.achieved != stored_achieved {
        set_goal_achieved(status.goal.id, status.achieved, connection)?;
        tracing::debug!(
            "Goal {} is now {}",
            status.goal.id,
            if status.achieved { "achieved" } else { "not achieved" }
        );
    }

    Ok(status)
}

/// Fetch and evaluate a goal.
///
/// # Errors
/// Returns [Error::GoalNotFound] if there is no goal with `goal_id`.
pub fn evaluate_goal(goal_id: GoalId, connection: &Connection) -> Result<GoalStatus, Error> {
    let goal = get_goal(goal_id, connection)?;

    evaluate(goal, connection)
}

/// Evaluate each goal in order.
///
/// A goal that fails to evaluate is logged and reported with [GoalStatus::fallback].
pub fn evaluate_goals(goals: Vec<Goal>, connection: &Connection) -> Vec<GoalStatus> {
    goals
        .into_iter()
        .map(|goal| {
            let goal_id = goal.id;

            evaluate(goal.clone(), connection).unwrap_or_else(|error| {
                tracing::error!("Could not evaluate goal {goal_id}: {error}");
                GoalStatus::fallback(goal)
            })
        })
        .collect()
}

/// Re-evaluate the given goals one after another, returning how many succeeded.
///
/// Failures are logged and skipped so that one broken goal does not stop the others.
pub fn refresh_goals(goal_ids: &[GoalId], connection: &Connection) -> usize {
    goal_ids
        .iter()
        .filter(|&&goal_id| match evaluate_goal(goal_id, connection) {
            Ok(_) => true,
            Err(error) => {
                tracing::error!("Could not refresh goal {goal_id}: {error}");
                false
            }
        })
        .count()
}

/// Re-evaluate every goal of the given categories, returning how many succeeded.
///
/// Duplicate category IDs are only refreshed once.
pub fn refresh_goals_for_categories(category_ids: &[CategoryId], connection: &Connection) -> usize {
    let mut category_ids = category_ids.to_vec();
    category_ids.sort_unstable();
    category_ids.dedup();

    let mut refreshed = 0;

    for category_id in category_ids {
        match get_goal_ids_for_category(category_id, connection) {
            Ok(goal_ids) => refreshed += refresh_goals(&goal_ids, connection),
            Err(error) => {
                tracing::error!("Could not load the goals of category {category_id}: {error}")
            }
        }
    }

    tracing::debug!("Refreshed {refreshed} goals");

    refreshed
}
