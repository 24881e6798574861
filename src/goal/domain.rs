//! Core goal domain types and request validation.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    Error,
    amount::validate_amount,
    category::CategoryId,
    expense::ExpenseId,
    json::deserialize_some,
    timestamp::{TimestampInput, normalize},
};

/// Database identifier for a goal.
pub type GoalId = i64;

/// A cap on how much may be spent in a category over a window of time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: GoalId,
    /// The most that may be spent in the window for the goal to be achieved.
    pub target_amount: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub window_start: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub window_end: OffsetDateTime,
    /// Whether spending in the window stayed within the target as of the last evaluation.
    pub achieved: bool,
    pub linked_expense_id: Option<ExpenseId>,
    pub category_id: CategoryId,
    /// The title of the goal's category, joined in when reading.
    pub category_title: String,
}

/// The validated fields of a goal that is about to be inserted or overwritten.
#[derive(Debug, Clone, PartialEq)]
pub struct NewGoal {
    pub target_amount: f64,
    pub window_start: OffsetDateTime,
    pub window_end: OffsetDateTime,
    pub linked_expense_id: Option<ExpenseId>,
    pub category_id: CategoryId,
}

impl NewGoal {
    fn validated(self) -> Result<Self, Error> {
        validate_amount(self.target_amount, "targetAmount")?;

        if self.window_end < self.window_start {
            return Err(Error::InvalidWindow);
        }

        Ok(self)
    }
}

const REQUIRED_GOAL_FIELDS: &str = "targetAmount, windowEnd and categoryId";

/// Request body for creating a goal.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGoalBody {
    pub target_amount: Option<f64>,
    pub window_start: Option<TimestampInput>,
    pub window_end: Option<TimestampInput>,
    pub linked_expense_id: Option<ExpenseId>,
    pub category_id: Option<CategoryId>,
}

impl CreateGoalBody {
    /// Validate the body, defaulting the start of the window to `now`.
    ///
    /// # Errors
    /// Returns [Error::MissingFields] if the target, window end or category is absent,
    /// [Error::InvalidAmount] for a non-positive target, or [Error::InvalidWindow]
    /// if the window ends before it starts.
    pub fn into_new_goal(self, now: OffsetDateTime) -> Result<NewGoal, Error> {
        let (Some(target_amount), Some(window_end), Some(category_id)) =
            (self.target_amount, self.window_end, self.category_id)
        else {
            return Err(Error::MissingFields(REQUIRED_GOAL_FIELDS));
        };

        let window_start = match self.window_start {
            Some(window_start) => window_start.start_of_period()?,
            None => normalize(now)?,
        };

        NewGoal {
            target_amount,
            window_start,
            window_end: window_end.end_of_period()?,
            linked_expense_id: self.linked_expense_id,
            category_id,
        }
        .validated()
    }
}

/// Request body for updating a goal. Absent fields keep their current value.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGoalBody {
    pub target_amount: Option<f64>,
    pub window_start: Option<TimestampInput>,
    pub window_end: Option<TimestampInput>,
    /// `Some(None)` when the client sent `null` to unlink the expense.
    #[serde(default, deserialize_with = "deserialize_some")]
    pub linked_expense_id: Option<Option<ExpenseId>>,
    pub category_id: Option<CategoryId>,
}

impl UpdateGoalBody {
    /// Merge the body into `existing`.
    ///
    /// # Errors
    /// Returns [Error::InvalidAmount] for a non-positive target,
    /// [Error::DateOutOfRange] for a timestamp that cannot be stored, or
    /// [Error::InvalidWindow] if the merged window ends before it starts.
    pub fn apply_to(self, existing: &Goal) -> Result<NewGoal, Error> {
        let window_start = match self.window_start {
            Some(window_start) => window_start.start_of_period()?,
            None => existing.window_start,
        };
        let window_end = match self.window_end {
            Some(window_end) => window_end.end_of_period()?,
            None => existing.window_end,
        };

        NewGoal {
            target_amount: self.target_amount.unwrap_or(existing.target_amount),
            window_start,
            window_end,
            linked_expense_id: self
                .linked_expense_id
                .unwrap_or(existing.linked_expense_id),
            category_id: self.category_id.unwrap_or(existing.category_id),
        }
        .validated()
    }
}

/// Response body for a created or updated goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalResponse {
    pub message: String,
    pub goal: Goal,
}
