//! The API endpoints URIs.

/// The route to list and create categories.
pub const CATEGORIES: &str = "/categorias";
/// The route to access a single category.
pub const CATEGORY: &str = "/categorias/{category_id}";
/// The route to list and create expenses.
pub const EXPENSES: &str = "/gastos";
/// The route to access a single expense.
pub const EXPENSE: &str = "/gastos/{expense_id}";
/// The route to list and create goals.
pub const GOALS: &str = "/metas";
/// The route to access a single goal.
pub const GOAL: &str = "/metas/{goal_id}";
/// The route for the goal report of a category.
pub const CATEGORY_GOAL_REPORT: &str = "/metas/categoria/{category_id}";
