//! Route definitions for the `/courses` resource.

use axum::routing::{get, put};
use axum::Router;

use super::route_with_slash;
use crate::handlers::course;
use crate::state::AppState;

/// Routes for courses and their enrollments.
///
/// ```text
/// GET    /courses                               -> list
/// POST   /courses                               -> create
/// GET    /courses/{id}                          -> get_by_id
/// PATCH  /courses/{id}                          -> update
/// DELETE /courses/{id}                          -> delete
/// GET    /courses/{id}/students                 -> list_students
/// PUT    /courses/{id}/students/{student_id}    -> enroll
/// DELETE /courses/{id}/students/{student_id}    -> unenroll
/// ```
pub fn router() -> Router<AppState> {
    let router = Router::new();
    let router = route_with_slash(router, "/courses", get(course::list).post(course::create));
    let router = route_with_slash(
        router,
        "/courses/{id}",
        get(course::get_by_id)
            .patch(course::update)
            .delete(course::delete),
    );
    let router = route_with_slash(router, "/courses/{id}/students", get(course::list_students));
    route_with_slash(
        router,
        "/courses/{id}/students/{student_id}",
        put(course::enroll).delete(course::unenroll),
    )
}
