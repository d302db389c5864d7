//! Handlers for the `/courses` resource and its enrollments.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use courses_core::enrollment;
use courses_core::error::CoreError;
use courses_core::naming::validate_name;
use courses_core::types::DbId;
use courses_db::models::course::{Course, CreateCourse, UpdateCourse};
use courses_db::models::student::Student;
use courses_db::repositories::{CourseRepo, StudentRepo};

use crate::error::{AppError, AppResult};
use crate::extractors::{JsonBody, PathParams, QueryParams};
use crate::query::CourseListParams;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Verify that a course exists, returning the full row.
async fn ensure_course_exists(pool: &sqlx::PgPool, id: DbId) -> AppResult<Course> {
    CourseRepo::find_by_id(pool, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "Course",
            id,
        })
    })
}

/// Normalize a requested enrollment set and check it against the cap and
/// the students table.
async fn checked_student_ids(state: &AppState, ids: &[DbId]) -> AppResult<Vec<DbId>> {
    let ids = enrollment::normalize_student_ids(ids);
    enrollment::validate_enrollment(&ids, state.config.max_students_per_course)?;

    let missing = StudentRepo::find_missing(&state.pool, &ids).await?;
    if !missing.is_empty() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unknown student ids: {missing:?}"
        ))));
    }
    Ok(ids)
}

// ---------------------------------------------------------------------------
// Course CRUD
// ---------------------------------------------------------------------------

/// POST /api/v1/courses/
pub async fn create(
    State(state): State<AppState>,
    JsonBody(mut input): JsonBody<CreateCourse>,
) -> AppResult<(StatusCode, Json<Course>)> {
    validate_name("Course", &input.name)?;
    input.students = checked_student_ids(&state, &input.students).await?;

    let course = CourseRepo::create(&state.pool, &input).await?;
    tracing::info!(
        course_id = course.id,
        name = %course.name,
        students = course.students.len(),
        "Course created",
    );
    Ok((StatusCode::CREATED, Json(course)))
}

/// GET /api/v1/courses/?pk=&id=&name=
pub async fn list(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<CourseListParams>,
) -> AppResult<Json<Vec<Course>>> {
    let courses = CourseRepo::list(&state.pool, &params.into()).await?;
    tracing::debug!(count = courses.len(), "Listed courses");
    Ok(Json(courses))
}

/// GET /api/v1/courses/{id}/
pub async fn get_by_id(
    State(state): State<AppState>,
    PathParams(id): PathParams<DbId>,
) -> AppResult<Json<Course>> {
    let course = ensure_course_exists(&state.pool, id).await?;
    Ok(Json(course))
}

/// PATCH /api/v1/courses/{id}/
///
/// Only the supplied fields change. `students`, when present, replaces the
/// whole enrollment set.
pub async fn update(
    State(state): State<AppState>,
    PathParams(id): PathParams<DbId>,
    JsonBody(mut input): JsonBody<UpdateCourse>,
) -> AppResult<Json<Course>> {
    ensure_course_exists(&state.pool, id).await?;
    if let Some(ref name) = input.name {
        validate_name("Course", name)?;
    }
    if let Some(students) = input.students.take() {
        input.students = Some(checked_student_ids(&state, &students).await?);
    }

    let course = CourseRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id,
        }))?;
    tracing::info!(course_id = course.id, name = %course.name, "Course updated");
    Ok(Json(course))
}

/// DELETE /api/v1/courses/{id}/
pub async fn delete(
    State(state): State<AppState>,
    PathParams(id): PathParams<DbId>,
) -> AppResult<StatusCode> {
    let deleted = CourseRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(course_id = id, "Course deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Enrollments
// ---------------------------------------------------------------------------

/// GET /api/v1/courses/{id}/students/
pub async fn list_students(
    State(state): State<AppState>,
    PathParams(id): PathParams<DbId>,
) -> AppResult<Json<Vec<Student>>> {
    ensure_course_exists(&state.pool, id).await?;
    let students = CourseRepo::list_students(&state.pool, id).await?;
    Ok(Json(students))
}

/// PUT /api/v1/courses/{id}/students/{student_id}/
///
/// Idempotent: enrolling an already-enrolled student is a no-op.
pub async fn enroll(
    State(state): State<AppState>,
    PathParams((id, student_id)): PathParams<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let course = ensure_course_exists(&state.pool, id).await?;
    StudentRepo::find_by_id(&state.pool, student_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Student",
            id: student_id,
        }))?;

    if !course.students.contains(&student_id) {
        let mut ids = course.students;
        ids.push(student_id);
        enrollment::validate_enrollment(&ids, state.config.max_students_per_course)?;

        CourseRepo::add_student(&state.pool, id, student_id).await?;
        tracing::info!(course_id = id, student_id, "Student enrolled");
    }
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/courses/{id}/students/{student_id}/
pub async fn unenroll(
    State(state): State<AppState>,
    PathParams((id, student_id)): PathParams<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    ensure_course_exists(&state.pool, id).await?;

    let removed = CourseRepo::remove_student(&state.pool, id, student_id).await?;
    if removed {
        tracing::info!(course_id = id, student_id, "Student unenrolled");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Enrollment of student",
            id: student_id,
        }))
    }
}
