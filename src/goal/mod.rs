//! Goals: caps on how much may be spent in a category over a window of time.

mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod list;
mod report;
mod status;

pub use create::create_goal_endpoint;
pub use db::{create_goal, create_goal_table, get_all_goals, get_goal, get_goals_for_category};
pub use delete::delete_goal_endpoint;
pub use domain::{Goal, GoalId, GoalResponse, NewGoal};
pub use edit::update_goal_endpoint;
pub use list::{get_goal_endpoint, get_goals_endpoint};
pub use report::{CategoryGoalReport, GoalStatistics, get_category_goal_report_endpoint};
pub use status::{GoalStatus, refresh_goals_for_categories};
