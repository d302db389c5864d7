//! Route definitions for the `/students` resource.

use axum::routing::get;
use axum::Router;

use super::route_with_slash;
use crate::handlers::student;
use crate::state::AppState;

/// ```text
/// GET    /students          -> list
/// POST   /students          -> create
/// GET    /students/{id}     -> get_by_id
/// PATCH  /students/{id}     -> update
/// DELETE /students/{id}     -> delete
/// ```
pub fn router() -> Router<AppState> {
    let router = route_with_slash(
        Router::new(),
        "/students",
        get(student::list).post(student::create),
    );
    route_with_slash(
        router,
        "/students/{id}",
        get(student::get_by_id)
            .patch(student::update)
            .delete(student::delete),
    )
}
