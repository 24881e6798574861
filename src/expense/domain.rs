//! Core expense domain types and request validation.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    Error,
    amount::validate_amount,
    category::CategoryId,
    timestamp::{TimestampInput, normalize},
};

/// Database identifier for an expense.
pub type ExpenseId = i64;

/// A validated, non-empty description of what an expense was for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Description(String);

impl Description {
    /// Create a description, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [Error::EmptyDescription] if `description` is empty or only whitespace.
    pub fn new(description: &str) -> Result<Self, Error> {
        let description = description.trim();

        if description.is_empty() {
            Err(Error::EmptyDescription)
        } else {
            Ok(Self(description.to_string()))
        }
    }

    /// Create a description without validation.
    ///
    /// The caller should ensure that the string is not empty.
    pub fn new_unchecked(description: &str) -> Self {
        Self(description.to_string())
    }
}

impl AsRef<str> for Description {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Description {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A dated monetary outflow assigned to a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: ExpenseId,
    /// How much was spent, always positive.
    pub amount: f64,
    /// When the money was spent.
    #[serde(with = "time::serde::rfc3339")]
    pub occurred_at: OffsetDateTime,
    pub description: Description,
    pub category_id: CategoryId,
    /// The title of the expense's category, joined in when reading.
    pub category_title: String,
}

/// The validated fields of an expense that is about to be inserted or overwritten.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub amount: f64,
    pub occurred_at: OffsetDateTime,
    pub description: Description,
    pub category_id: CategoryId,
}

impl NewExpense {
    /// Build an expense without validating any field.
    ///
    /// The caller should ensure that `occurred_at` is in UTC with whole seconds.
    pub fn new_unchecked(
        amount: f64,
        occurred_at: OffsetDateTime,
        description: &str,
        category_id: CategoryId,
    ) -> Self {
        Self {
            amount,
            occurred_at,
            description: Description::new_unchecked(description),
            category_id,
        }
    }
}

const REQUIRED_EXPENSE_FIELDS: &str = "amount, description and categoryId";

/// Request body for creating an expense.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpenseBody {
    pub amount: Option<f64>,
    pub occurred_at: Option<TimestampInput>,
    pub description: Option<String>,
    pub category_id: Option<CategoryId>,
}

impl CreateExpenseBody {
    /// Validate the body, defaulting the date of the expense to `now`.
    ///
    /// # Errors
    /// Returns [Error::MissingFields] if the amount, description or category is absent,
    /// otherwise any validation error for the individual fields.
    pub fn into_new_expense(self, now: OffsetDateTime) -> Result<NewExpense, Error> {
        let (Some(amount), Some(description), Some(category_id)) =
            (self.amount, self.description, self.category_id)
        else {
            return Err(Error::MissingFields(REQUIRED_EXPENSE_FIELDS));
        };

        let occurred_at = match self.occurred_at {
            Some(occurred_at) => occurred_at.start_of_period()?,
            None => normalize(now)?,
        };

        Ok(NewExpense {
            amount: validate_amount(amount, "amount")?,
            occurred_at,
            description: Description::new(&description)?,
            category_id,
        })
    }
}

/// Request body for updating an expense. Absent fields keep their current value.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExpenseBody {
    pub amount: Option<f64>,
    pub occurred_at: Option<TimestampInput>,
    pub description: Option<String>,
    pub category_id: Option<CategoryId>,
}

impl UpdateExpenseBody {
    /// Merge the body into `existing`.
    ///
    /// # Errors
    /// Returns a validation error for any supplied field that is invalid.
    pub fn apply_to(self, existing: &Expense) -> Result<NewExpense, Error> {
        let amount = match self.amount {
            Some(amount) => validate_amount(amount, "amount")?,
            None => existing.amount,
        };

        let description = match self.description {
            Some(description) => Description::new(&description)?,
            None => existing.description.clone(),
        };

        let occurred_at = match self.occurred_at {
            Some(occurred_at) => occurred_at.start_of_period()?,
            None => existing.occurred_at,
        };

        Ok(NewExpense {
            amount,
            occurred_at,
            description,
            category_id: self.category_id.unwrap_or(existing.category_id),
        })
    }
}

/// Response body for a created or updated expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseResponse {
    pub message: String,
    pub expense: Expense,
}
