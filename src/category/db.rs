//! Database operations for categories.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    category::{Category, CategoryId, CategoryTitle},
    error::is_foreign_key_violation,
};

/// Create a category and return it with its generated ID.
pub fn create_category(title: CategoryTitle, connection: &Connection) -> Result<Category, Error> {
    connection.execute("INSERT INTO category (title) VALUES (?1);", (title.as_ref(),))?;

    let id = connection.last_insert_rowid();

    Ok(Category { id, title })
}

/// Retrieve a single category by ID.
///
/// # Errors
/// Returns [Error::CategoryNotFound] if there is no category with `category_id`.
pub fn get_category(category_id: CategoryId, connection: &Connection) -> Result<Category, Error> {
    connection
        .prepare("SELECT id, title FROM category WHERE id = :id;")?
        .query_row(&[(":id", &category_id)], map_row)
        .map_err(|error| match error {
            rusqlite::Error::QueryReturnedNoRows => Error::CategoryNotFound,
            error => error.into(),
        })
}

/// Retrieve all categories ordered alphabetically by title.
pub fn get_all_categories(connection: &Connection) -> Result<Vec<Category>, Error> {
    connection
        .prepare("SELECT id, title FROM category ORDER BY title ASC, id ASC;")?
        .query_map([], map_row)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Check that a category exists.
///
/// # Errors
/// Returns [Error::CategoryNotFound] if there is no category with `category_id`.
pub fn ensure_category_exists(category_id: CategoryId, connection: &Connection) -> Result<(), Error> {
    let exists: bool = connection.query_row(
        "SELECT EXISTS(SELECT 1 FROM category WHERE id = ?1);",
        [category_id],
        |row| row.get(0),
    )?;

    if exists {
        Ok(())
    } else {
        Err(Error::CategoryNotFound)
    }
}

/// Rename a category. Returns an error if the category doesn't exist.
pub fn update_category(
    category_id: CategoryId,
    new_title: CategoryTitle,
    connection: &Connection,
) -> Result<Category, Error> {
    let rows_affected = connection.execute(
        "UPDATE category SET title = ?1 WHERE id = ?2",
        (new_title.as_ref(), category_id),
    )?;

    if rows_affected == 0 {
        return Err(Error::CategoryNotFound);
    }

    Ok(Category {
        id: category_id,
        title: new_title,
    })
}

/// Delete a category by ID.
///
/// Deletion never cascades: a category that is referenced by an expense or a
/// goal is left untouched.
///
/// # Errors
/// Returns [Error::CategoryNotFound] if the category doesn't exist, or
/// [Error::CategoryInUse] if an expense or goal references it.
pub fn delete_category(category_id: CategoryId, connection: &Connection) -> Result<(), Error> {
    ensure_category_exists(category_id, connection)?;

    if is_category_referenced(category_id, connection)? {
        return Err(Error::CategoryInUse);
    }

    connection
        .execute("DELETE FROM category WHERE id = ?1", [category_id])
        .map_err(|error| {
            if is_foreign_key_violation(&error) {
                Error::CategoryInUse
            } else {
                error.into()
            }
        })?;

    Ok(())
}

fn is_category_referenced(category_id: CategoryId, connection: &Connection) -> Result<bool, Error> {
    connection
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM expense WHERE category_id = ?1)
                OR EXISTS(SELECT 1 FROM goal WHERE category_id = ?1);",
            [category_id],
            |row| row.get(0),
        )
        .map_err(|error| error.into())
}

/// Initialize the category table.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY,
            title TEXT NOT NULL
        );",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Category, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_title: String = row.get(1)?;
    let title = CategoryTitle::new_unchecked(&raw_title);

    Ok(Category { id, title })
}

#[cfg(test)]
mod category_query_tests {
    use std::collections::HashSet;

    use rusqlite::Connection;
    use time::macros::datetime;

    use crate::{
        Error,
        category::{CategoryTitle, create_category, get_all_categories, get_category},
        expense::{NewExpense, create_expense},
        goal::{NewGoal, create_goal},
        test_utils::get_test_db_connection,
    };

    use super::{delete_category, ensure_category_exists, update_category};

    fn create_food_category(connection: &Connection) -> crate::category::Category {
        create_category(CategoryTitle::new_unchecked("Food"), connection)
            .expect("Could not create test category")
    }

    #[test]
    fn create_category_succeeds() {
        let connection = get_test_db_connection();
        let title = CategoryTitle::new("Terrifically a category").unwrap();

        let category = create_category(title.clone(), &connection);

        let got_category = category.expect("Could not create category");
        assert!(got_category.id > 0);
        assert_eq!(got_category.title, title);
    }

    #[test]
    fn get_category_succeeds() {
        let connection = get_test_db_connection();
        let inserted_category = create_food_category(&connection);

        let selected_category = get_category(inserted_category.id, &connection);

        assert_eq!(Ok(inserted_category), selected_category);
    }

    #[test]
    fn get_category_with_invalid_id_returns_not_found() {
        let connection = get_test_db_connection();
        let inserted_category = create_food_category(&connection);

        let selected_category = get_category(inserted_category.id + 123, &connection);

        assert_eq!(selected_category, Err(Error::CategoryNotFound));
    }

    #[test]
    fn get_all_categories_orders_by_title() {
        let connection = get_test_db_connection();
        let transport = create_category(CategoryTitle::new_unchecked("Transport"), &connection)
            .expect("Could not create test category");
        let food = create_food_category(&connection);

        let categories = get_all_categories(&connection).expect("Could not get all categories");

        assert_eq!(categories, vec![food, transport]);
    }

    #[test]
    fn get_all_categories_returns_every_category() {
        let connection = get_test_db_connection();
        let inserted = HashSet::from([
            create_category(CategoryTitle::new_unchecked("Foo"), &connection).unwrap(),
            create_category(CategoryTitle::new_unchecked("Bar"), &connection).unwrap(),
        ]);

        let selected = get_all_categories(&connection).expect("Could not get all categories");

        assert_eq!(inserted, HashSet::from_iter(selected));
    }

    #[test]
    fn ensure_category_exists_fails_for_missing_category() {
        let connection = get_test_db_connection();

        assert_eq!(
            ensure_category_exists(42, &connection),
            Err(Error::CategoryNotFound)
        );
    }

    #[test]
    fn update_category_succeeds() {
        let connection = get_test_db_connection();
        let category = create_food_category(&connection);
        let new_title = CategoryTitle::new_unchecked("Groceries");

        let result = update_category(category.id, new_title.clone(), &connection);

        assert!(result.is_ok());
        let updated = get_category(category.id, &connection).expect("Could not get category");
        assert_eq!(updated.title, new_title);
    }

    #[test]
    fn update_category_with_invalid_id_returns_not_found() {
        let connection = get_test_db_connection();

        let result = update_category(999999, CategoryTitle::new_unchecked("Nope"), &connection);

        assert_eq!(result, Err(Error::CategoryNotFound));
    }

    #[test]
    fn delete_unreferenced_category_succeeds() {
        let connection = get_test_db_connection();
        let category = create_food_category(&connection);

        let result = delete_category(category.id, &connection);

        assert_eq!(result, Ok(()));
        assert_eq!(
            get_category(category.id, &connection),
            Err(Error::CategoryNotFound)
        );
    }

    #[test]
    fn delete_missing_category_returns_not_found() {
        let connection = get_test_db_connection();

        assert_eq!(
            delete_category(999999, &connection),
            Err(Error::CategoryNotFound)
        );
    }

    #[test]
    fn delete_category_with_expense_is_blocked() {
        let connection = get_test_db_connection();
        let category = create_food_category(&connection);
        create_expense(
            NewExpense::new_unchecked(10.0, datetime!(2025-08-02 12:00 UTC), "Lunch", category.id),
            &connection,
        )
        .expect("Could not create test expense");

        let result = delete_category(category.id, &connection);

        assert_eq!(result, Err(Error::CategoryInUse));
        assert!(get_category(category.id, &connection).is_ok());
    }

    #[test]
    fn delete_category_with_goal_is_blocked() {
        let connection = get_test_db_connection();
        let category = create_food_category(&connection);
        create_goal(
            NewGoal {
                target_amount: 200.0,
                window_start: datetime!(2025-08-01 00:00 UTC),
                window_end: datetime!(2025-08-31 23:59:59 UTC),
                linked_expense_id: None,
                category_id: category.id,
            },
            &connection,
        )
        .expect("Could not create test goal");

        let result = delete_category(category.id, &connection);

        assert_eq!(result, Err(Error::CategoryInUse));
    }
}
