//! Expense update endpoint.

use axum::{Json, extract::State};

use crate::{
    AppState, Error,
    category::ensure_category_exists,
    db::lock_connection,
    expense::{
        ExpenseId, ExpenseResponse, db::update_expense, domain::UpdateExpenseBody, get_expense,
    },
    goal::refresh_goals_for_categories,
    json::{ApiJson, ApiPath},
};

/// Partially update an expense.
///
/// Goals of both the previous and the new category are refreshed, since
/// moving an expense changes the totals of both.
pub async fn update_expense_endpoint(
    State(state): State<AppState>,
    ApiPath(expense_id): ApiPath<ExpenseId>,
    ApiJson(body): ApiJson<UpdateExpenseBody>,
) -> Result<Json<ExpenseResponse>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    let existing = get_expense(expense_id, &connection)?;

    if let Some(category_id) = body.category_id {
        ensure_category_exists(category_id, &connection)?;
    }

    let changes = body.apply_to(&existing)?;
    let expense = update_expense(expense_id, changes, &connection)?;
    tracing::info!("Updated expense {}", expense.id);

    refresh_goals_for_categories(&[existing.category_id, expense.category_id], &connection);

    Ok(Json(ExpenseResponse {
        message: "Expense updated successfully".to_owned(),
        expense,
    }))
}
