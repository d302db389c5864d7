pub mod course;
pub mod health;
pub mod student;

use axum::routing::MethodRouter;
use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /courses                                  list, create
/// /courses/{id}                             get, partial update, delete
/// /courses/{id}/students                    list enrolled students
/// /courses/{id}/students/{student_id}       enroll (PUT), unenroll (DELETE)
///
/// /students                                 list, create
/// /students/{id}                            get, partial update, delete
/// ```
///
/// Every path also answers with a trailing slash.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(course::router())
        .merge(student::router())
}

/// Register `method_router` at `path` and at `path` followed by `/`.
pub(crate) fn route_with_slash(
    router: Router<AppState>,
    path: &str,
    method_router: MethodRouter<AppState>,
) -> Router<AppState> {
    router
        .route(path, method_router.clone())
        .route(&format!("{path}/"), method_router)
}
