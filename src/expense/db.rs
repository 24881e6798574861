//! Database operations for expenses.

use rusqlite::{Connection, Row};
use time::OffsetDateTime;

use crate::{
    Error,
    category::CategoryId,
    error::is_foreign_key_violation,
    expense::{Description, Expense, ExpenseId, NewExpense},
};

const SELECT_EXPENSE: &str = "SELECT expense.id, expense.amount, expense.occurred_at, \
    expense.description, expense.category_id, category.title \
    FROM expense INNER JOIN category ON expense.category_id = category.id";

/// Insert an expense and return it joined with its category title.
///
/// # Errors
/// Returns [Error::CategoryNotFound] if the category does not exist, or
/// [Error::SqlError] if there is some other SQL error.
pub fn create_expense(new_expense: NewExpense, connection: &Connection) -> Result<Expense, Error> {
    connection
        .execute(
            "INSERT INTO expense (amount, occurred_at, description, category_id)
             VALUES (?1, ?2, ?3, ?4)",
            (
                new_expense.amount,
                new_expense.occurred_at,
                new_expense.description.as_ref(),
                new_expense.category_id,
            ),
        )
        .map_err(map_category_error)?;

    get_expense(connection.last_insert_rowid(), connection)
}

/// Retrieve a single expense by ID.
///
/// # Errors
/// Returns [Error::ExpenseNotFound] if there is no expense with `expense_id`.
pub fn get_expense(expense_id: ExpenseId, connection: &Connection) -> Result<Expense, Error> {
    connection
        .prepare(&format!("{SELECT_EXPENSE} WHERE expense.id = :id;"))?
        .query_row(&[(":id", &expense_id)], map_expense_row)
        .map_err(|error| match error {
            rusqlite::Error::QueryReturnedNoRows => Error::ExpenseNotFound,
            error => error.into(),
        })
}

/// Retrieve all expenses, most recent first.
pub fn get_all_expenses(connection: &Connection) -> Result<Vec<Expense>, Error> {
    connection
        .prepare(&format!(
            "{SELECT_EXPENSE} ORDER BY expense.occurred_at DESC, expense.id DESC;"
        ))?
        .query_map([], map_expense_row)?
        .map(|maybe_expense| maybe_expense.map_err(|error| error.into()))
        .collect()
}

/// Check that an expense exists.
///
/// # Errors
/// Returns [Error::ExpenseNotFound] if there is no expense with `expense_id`.
pub fn ensure_expense_exists(expense_id: ExpenseId, connection: &Connection) -> Result<(), Error> {
    let exists: bool = connection.query_row(
        "SELECT EXISTS(SELECT 1 FROM expense WHERE id = ?1);",
        [expense_id],
        |row| row.get(0),
    )?;

    if exists {
        Ok(())
    } else {
        Err(Error::ExpenseNotFound)
    }
}

/// Overwrite every field of an expense.
///
/// # Errors
/// Returns [Error::ExpenseNotFound] if the expense doesn't exist, or
/// [Error::CategoryNotFound] if the new category doesn't exist.
pub fn update_expense(
    expense_id: ExpenseId,
    expense: NewExpense,
    connection: &Connection,
) -> Result<Expense, Error> {
    let rows_affected = connection
        .execute(
            "UPDATE expense
             SET amount = ?1, occurred_at = ?2, description = ?3, category_id = ?4
             WHERE id = ?5",
            (
                expense.amount,
                expense.occurred_at,
                expense.description.as_ref(),
                expense.category_id,
                expense_id,
            ),
        )
        .map_err(map_category_error)?;

    if rows_affected == 0 {
        return Err(Error::ExpenseNotFound);
    }

    get_expense(expense_id, connection)
}

/// Delete an expense by ID and return the deleted expense.
///
/// Goals linking to the expense have their link cleared.
///
/// # Errors
/// Returns [Error::ExpenseNotFound] if the expense doesn't exist.
pub fn delete_expense(expense_id: ExpenseId, connection: &Connection) -> Result<Expense, Error> {
    let expense = get_expense(expense_id, connection)?;

    connection.execute("DELETE FROM expense WHERE id = ?1", [expense_id])?;

    Ok(expense)
}

/// Sum the amounts of the expenses in a category made within `[start, end]`, inclusive.
///
/// Returns zero when no expense matches.
pub fn sum_expenses_in_window(
    category_id: CategoryId,
    start: OffsetDateTime,
    end: OffsetDateTime,
    connection: &Connection,
) -> Result<f64, Error> {
    connection
        .query_row(
            "SELECT COALESCE(SUM(amount), 0.0) FROM expense
             WHERE category_id = ?1 AND occurred_at BETWEEN ?2 AND ?3;",
            (category_id, start, end),
            |row| row.get(0),
        )
        .map_err(|error| error.into())
}

/// Sum the amounts of every expense in a category.
pub fn sum_expenses_in_category(
    category_id: CategoryId,
    connection: &Connection,
) -> Result<f64, Error> {
    connection
        .query_row(
            "SELECT COALESCE(SUM(amount), 0.0) FROM expense WHERE category_id = ?1;",
            [category_id],
            |row| row.get(0),
        )
        .map_err(|error| error.into())
}

/// Initialize the expense table and indexes.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS expense (
            id INTEGER PRIMARY KEY,
            amount REAL NOT NULL CHECK (amount > 0),
            occurred_at TEXT NOT NULL,
            description TEXT NOT NULL,
            category_id INTEGER NOT NULL,
            FOREIGN KEY(category_id) REFERENCES category(id)
        );

        CREATE INDEX IF NOT EXISTS idx_expense_category_date ON expense(category_id, occurred_at);",
    )?;

    Ok(())
}

fn map_category_error(error: rusqlite::Error) -> Error {
    if is_foreign_key_violation(&error) {
        Error::CategoryNotFound
    } else {
        error.into()
    }
}

fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    let raw_description: String = row.get(3)?;

    Ok(Expense {
        id: row.get(0)?,
        amount: row.get(1)?,
        occurred_at: row.get(2)?,
        description: Description::new_unchecked(&raw_description),
        category_id: row.get(4)?,
        category_title: row.get(5)?,
    })
}
