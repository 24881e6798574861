//! Expense read endpoints.

use axum::{Json, extract::State};

use crate::{
    AppState, Error,
    db::lock_connection,
    expense::{Expense, ExpenseId, get_all_expenses, get_expense},
    json::ApiPath,
};

/// List all expenses, most recent first.
pub async fn get_expenses_endpoint(
    State(state): State<AppState>,
) -> Result<Json<Vec<Expense>>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    get_all_expenses(&connection).map(Json)
}

/// Get a single expense.
pub async fn get_expense_endpoint(
    State(state): State<AppState>,
    ApiPath(expense_id): ApiPath<ExpenseId>,
) -> Result<Json<Expense>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    get_expense(expense_id, &connection).map(Json)
}
