#![allow(missing_docs)]

use axum::{body::Body, http::StatusCode, response::Response};
use axum_test::TestServer;
use rusqlite::Connection;
use serde::de::DeserializeOwned;

use crate::{AppState, ErrorBody, build_router, db::initialize};

pub(crate) fn get_test_db_connection() -> Connection {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");
    initialize(&connection).expect("Could not initialize database");

    connection
}

pub(crate) fn get_test_app_state() -> AppState {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");

    AppState::new(connection).expect("Could not create app state")
}

pub(crate) fn get_test_server() -> TestServer {
    TestServer::new(build_router(get_test_app_state()))
}

pub(crate) async fn parse_json_body<T: DeserializeOwned>(response: Response<Body>) -> T {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Could not get response body");

    serde_json::from_slice(&body).expect("Could not parse response body as JSON")
}

pub(crate) async fn assert_error_response(
    response: Response<Body>,
    status: StatusCode,
    message: &str,
) {
    assert_eq!(response.status(), status);

    let body: ErrorBody = parse_json_body(response).await;
    assert_eq!(body.error, message);
}

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/metas/{goal_id}', '{goal_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns
/// the original `endpoint_path`.
pub(crate) fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_string();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map_or(endpoint_path.len(), |end| param_start + end + 1);

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}

mod format_endpoint_tests {
    use axum::http::Uri;

    use crate::endpoints;

    use super::format_endpoint;

    #[test]
    fn produces_valid_uri() {
        let formatted_path = format_endpoint(endpoints::GOAL, 1);

        assert_eq!(formatted_path, "/metas/1");
        assert!(formatted_path.parse::<Uri>().is_ok());

        let formatted_path = format_endpoint(endpoints::CATEGORY_GOAL_REPORT, 12);

        assert_eq!(formatted_path, "/metas/categoria/12");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn returns_path_unchanged_with_no_parameter() {
        assert_eq!(format_endpoint(endpoints::EXPENSES, 1), "/gastos");
    }

    #[test]
    fn parameter_in_middle() {
        let formatted_path = format_endpoint("/metas/{goal_id}/status", 1);

        assert_eq!(formatted_path, "/metas/1/status");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }
}
