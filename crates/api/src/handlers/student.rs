//! Handlers for the `/students` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use courses_core::error::CoreError;
use courses_core::naming::validate_name;
use courses_core::types::DbId;
use courses_db::models::student::{CreateStudent, Student, UpdateStudent};
use courses_db::repositories::StudentRepo;

use crate::error::{AppError, AppResult};
use crate::extractors::{JsonBody, PathParams, QueryParams};
use crate::query::StudentListParams;
use crate::state::AppState;

/// POST /api/v1/students/
pub async fn create(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateStudent>,
) -> AppResult<(StatusCode, Json<Student>)> {
    validate_name("Student", &input.name)?;
    let student = StudentRepo::create(&state.pool, &input).await?;
    tracing::info!(student_id = student.id, name = %student.name, "Student created");
    Ok((StatusCode::CREATED, Json(student)))
}

/// GET /api/v1/students/?name=
pub async fn list(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<StudentListParams>,
) -> AppResult<Json<Vec<Student>>> {
    let students = StudentRepo::list(&state.pool, params.name.as_deref()).await?;
    Ok(Json(students))
}

/// GET /api/v1/students/{id}/
pub async fn get_by_id(
    State(state): State<AppState>,
    PathParams(id): PathParams<DbId>,
) -> AppResult<Json<Student>> {
    let student = StudentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Student",
            id,
        }))?;
    Ok(Json(student))
}

/// PATCH /api/v1/students/{id}/
pub async fn update(
    State(state): State<AppState>,
    PathParams(id): PathParams<DbId>,
    JsonBody(input): JsonBody<UpdateStudent>,
) -> AppResult<Json<Student>> {
    if let Some(ref name) = input.name {
        validate_name("Student", name)?;
    }
    let student = StudentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Student",
            id,
        }))?;
    tracing::info!(student_id = student.id, name = %student.name, "Student updated");
    Ok(Json(student))
}

/// DELETE /api/v1/students/{id}/
pub async fn delete(
    State(state): State<AppState>,
    PathParams(id): PathParams<DbId>,
) -> AppResult<StatusCode> {
    if StudentRepo::delete(&state.pool, id).await? {
        tracing::info!(student_id = id, "Student deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Student",
            id,
        }))
    }
}
