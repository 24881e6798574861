//! Expenses: dated amounts of money spent in a category.

mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod list;

pub use create::create_expense_endpoint;
pub use db::{
    create_expense, create_expense_table, ensure_expense_exists, get_all_expenses, get_expense,
    sum_expenses_in_category, sum_expenses_in_window,
};
pub use delete::delete_expense_endpoint;
pub use domain::{Description, Expense, ExpenseId, ExpenseResponse, NewExpense};
pub use edit::update_expense_endpoint;
pub use list::{get_expense_endpoint, get_expenses_endpoint};
