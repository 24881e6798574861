//! Defines the app level error type and its conversion to JSON error responses.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// One or more required fields were missing from the request body.
    ///
    /// The string lists the required fields for the client.
    #[error("Required fields: {0}")]
    MissingFields(&'static str),

    /// An empty string was used as a category title.
    #[error("Category title cannot be empty")]
    EmptyCategoryTitle,

    /// An empty string was used as an expense description.
    #[error("Expense description cannot be empty")]
    EmptyDescription,

    /// A monetary amount was zero, negative or not a finite number.
    ///
    /// The string names the offending field.
    #[error("{0} must be a positive number")]
    InvalidAmount(&'static str),

    /// A goal's window ends before it starts.
    #[error("windowEnd must not be earlier than windowStart")]
    InvalidWindow,

    /// A date or timestamp string could not be parsed.
    #[error("invalid date \"{0}\", expected an RFC 3339 timestamp or a YYYY-MM-DD date")]
    InvalidDate(String),

    /// A timestamp could not be represented once converted to UTC.
    #[error("date \"{0}\" is outside the supported range")]
    DateOutOfRange(String),

    /// The request body was not valid JSON for the endpoint.
    #[error("Invalid request body: {0}")]
    InvalidJson(String),

    /// A path parameter could not be parsed, e.g. a non-numeric ID.
    #[error("Invalid path parameter: {0}")]
    InvalidPath(String),

    /// The category ID did not refer to a category in the database.
    #[error("Category not found")]
    CategoryNotFound,

    /// The expense ID did not refer to an expense in the database.
    #[error("Expense not found")]
    ExpenseNotFound,

    /// The goal ID did not refer to a goal in the database.
    #[error("Goal not found")]
    GoalNotFound,

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("Resource not found")]
    NotFound,

    /// Tried to delete a category that is still referenced by expenses or goals.
    #[error("Cannot delete a category that has associated expenses or goals")]
    CategoryInUse,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// A response body could not be buffered for logging.
    #[error("could not read response body: {0}")]
    ResponseBodyError(String),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl Error {
    /// The HTTP status code the error is reported with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::MissingFields(_)
            | Error::EmptyCategoryTitle
            | Error::EmptyDescription
            | Error::InvalidAmount(_)
            | Error::InvalidWindow
            | Error::InvalidDate(_)
            | Error::DateOutOfRange(_)
            | Error::InvalidJson(_)
            | Error::InvalidPath(_)
            | Error::CategoryInUse => StatusCode::BAD_REQUEST,
            Error::CategoryNotFound
            | Error::ExpenseNotFound
            | Error::GoalNotFound
            | Error::NotFound => StatusCode::NOT_FOUND,
            Error::SqlError(_) | Error::ResponseBodyError(_) | Error::DatabaseLockError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::InvalidJson(rejection.body_text())
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        Error::InvalidPath(rejection.body_text())
    }
}

/// Whether `error` was caused by a FOREIGN KEY constraint failing.
pub(crate) fn is_foreign_key_violation(error: &rusqlite::Error) -> bool {
    matches!(
        error,
        rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error {
                code: _,
                extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
            },
            _,
        )
    )
}

/// The JSON body sent to clients when a request fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// A human readable description of what went wrong.
    pub error: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            // Details of internal errors stay in the server logs.
            tracing::error!("An unexpected error occurred: {}", self);
            "Internal server error".to_owned()
        } else {
            self.to_string()
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
