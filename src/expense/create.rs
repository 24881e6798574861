//! Expense creation endpoint.

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
    expense::{ExpenseResponse, create_expense, domain::CreateExpenseBody},
    goal::refresh_goals_for_categories,
    json::ApiJson,
    timestamp,
};

/// Create an expense and refresh the goals of its category.
///
/// The body is validated before the category is looked up, so a request
/// missing fields gets a 400 even if its category does not exist.
pub async fn create_expense_endpoint(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateExpenseBody>,
) -> Result<Response, Error> {
    let new_expense = body.into_new_expense(timestamp::now())?;

    let connection = lock_connection(&state.db_connection)?;
    ensure_category_exists(new_expense.category_id, &connection)?;

    let expense = create_expense(new_expense, &connection)?;
    tracing::info!(
        "Created expense {} of {} in category {}",
        expense.id,
        expense.amount,
        expense.category_id
    );

    refresh_goals_for_categories(&[expense.category_id], &connection);

    Ok((
        StatusCode::CREATED,
        Json(ExpenseResponse {
            message: "Expense created successfully".to_owned(),
            expense,
        }),
    )
        .into_response())
}
