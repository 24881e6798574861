//! Database operations for goals.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    category::CategoryId,
    error::is_foreign_key_violation,
    goal::{Goal, GoalId, NewGoal},
};

const SELECT_GOAL: &str = "SELECT goal.id, goal.target_amount, goal.window_start, \
    goal.window_end, goal.achieved, goal.linked_expense_id, goal.category_id, category.title \
    FROM goal INNER JOIN category ON goal.category_id = category.id";

/// Insert a goal and return it joined with its category title.
///
/// The goal starts out as not achieved; evaluate it to compute its status.
///
/// # Errors
/// Returns [Error::NotFound] if the category or linked expense does not exist,
/// or [Error::SqlError] if there is some other SQL error.
pub fn create_goal(new_goal: NewGoal, connection: &Connection) -> Result<Goal, Error> {
    connection
        .execute(
            "INSERT INTO goal (target_amount, window_start, window_end, achieved, linked_expense_id, category_id)
             VALUES (?1, ?2, ?3, FALSE, ?4, ?5)",
            (
                new_goal.target_amount,
                new_goal.window_start,
                new_goal.window_end,
                new_goal.linked_expense_id,
                new_goal.category_id,
            ),
        )
        .map_err(map_reference_error)?;

    get_goal(connection.last_insert_rowid(), connection)
}

/// Retrieve a single goal by ID.
///
/// # Errors
/// Returns [Error::GoalNotFound] if there is no goal with `goal_id`.
pub fn get_goal(goal_id: GoalId, connection: &Connection) -> Result<Goal, Error> {
    connection
        .prepare(&format!("{SELECT_GOAL} WHERE goal.id = :id;"))?
        .query_row(&[(":id", &goal_id)], map_goal_row)
        .map_err(|error| match error {
            rusqlite::Error::QueryReturnedNoRows => Error::GoalNotFound,
            error => error.into(),
        })
}

/// Retrieve all goals, the most recently started first.
pub fn get_all_goals(connection: &Connection) -> Result<Vec<Goal>, Error> {
    connection
        .prepare(&format!(
            "{SELECT_GOAL} ORDER BY goal.window_start DESC, goal.id DESC;"
        ))?
        .query_map([], map_goal_row)?
        .map(|maybe_goal| maybe_goal.map_err(|error| error.into()))
        .collect()
}

/// Retrieve the goals of a category, the most recently started first.
pub fn get_goals_for_category(
    category_id: CategoryId,
    connection: &Connection,
) -> Result<Vec<Goal>, Error> {
    connection
        .prepare(&format!(
            "{SELECT_GOAL} WHERE goal.category_id = :category_id
             ORDER BY goal.window_start DESC, goal.id DESC;"
        ))?
        .query_map(&[(":category_id", &category_id)], map_goal_row)?
        .map(|maybe_goal| maybe_goal.map_err(|error| error.into()))
        .collect()
}

/// Retrieve the IDs of the goals of a category.
pub fn get_goal_ids_for_category(
    category_id: CategoryId,
    connection: &Connection,
) -> Result<Vec<GoalId>, Error> {
    connection
        .prepare("SELECT id FROM goal WHERE category_id = ?1 ORDER BY id;")?
        .query_map([category_id], |row| row.get(0))?
        .map(|maybe_id| maybe_id.map_err(|error| error.into()))
        .collect()
}

/// Overwrite the user editable fields of a goal.
///
/// The `achieved` flag is left alone; evaluate the goal afterwards.
///
/// # Errors
/// Returns [Error::GoalNotFound] if the goal doesn't exist.
pub fn update_goal(goal_id: GoalId, goal: NewGoal, connection: &Connection) -> Result<Goal, Error> {
    let rows_affected = connection
        .execute(
            "UPDATE goal
             SET target_amount = ?1, window_start = ?2, window_end = ?3,
                 linked_expense_id = ?4, category_id = ?5
             WHERE id = ?6",
            (
                goal.target_amount,
                goal.window_start,
                goal.window_end,
                goal.linked_expense_id,
                goal.category_id,
                goal_id,
            ),
        )
        .map_err(map_reference_error)?;

    if rows_affected == 0 {
        return Err(Error::GoalNotFound);
    }

    get_goal(goal_id, connection)
}

/// Persist a newly computed `achieved` flag.
pub fn set_goal_achieved(
    goal_id: GoalId,
    achieved: bool,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE goal SET achieved = ?1 WHERE id = ?2",
        (achieved, goal_id),
    )?;

    if rows_affected == 0 {
        return Err(Error::GoalNotFound);
    }

    Ok(())
}

/// Delete a goal by ID.
///
/// # Errors
/// Returns [Error::GoalNotFound] if the goal doesn't exist.
pub fn delete_goal(goal_id: GoalId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM goal WHERE id = ?1", [goal_id])?;

    if rows_affected == 0 {
        return Err(Error::GoalNotFound);
    }

    Ok(())
}

/// Initialize the goal table and indexes.
pub fn create_goal_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS goal (
            id INTEGER PRIMARY KEY,
            target_amount REAL NOT NULL CHECK (target_amount > 0),
            window_start TEXT NOT NULL,
            window_end TEXT NOT NULL,
            achieved INTEGER NOT NULL DEFAULT FALSE,
            linked_expense_id INTEGER,
            category_id INTEGER NOT NULL,
            FOREIGN KEY(linked_expense_id) REFERENCES expense(id) ON DELETE SET NULL,
            FOREIGN KEY(category_id) REFERENCES category(id)
        );

        CREATE INDEX IF NOT EXISTS idx_goal_category ON goal(category_id);",
    )?;

    Ok(())
}

fn map_reference_error(error: rusqlite::Error) -> Error {
    if is_foreign_key_violation(&error) {
        Error::NotFound
    } else {
        error.into()
    }
}

fn map_goal_row(row: &Row) -> Result<Goal, rusqlite::Error> {
    Ok(Goal {
        id: row.get(0)?,
        target_amount: row.get(1)?,
        window_start: row.get(2)?,
        window_end: row.get(3)?,
        achieved: row.get(4)?,
        linked_expense_id: row.get(5)?,
        category_id: row.get(6)?,
        category_title: row.get(7)?,
    })
}
