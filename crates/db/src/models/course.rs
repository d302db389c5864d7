//! Course model, DTOs, and list filter.

use courses_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A course together with the ids of its enrolled students.
///
/// `students` is aggregated from `course_students` and is always sorted
/// ascending; it is empty when nobody is enrolled.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Course {
    pub id: DbId,
    pub name: String,
    pub students: Vec<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new course.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCourse {
    pub name: String,
    /// Student ids to enroll. Defaults to none.
    #[serde(default)]
    pub students: Vec<DbId>,
}

/// DTO for updating an existing course. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCourse {
    pub name: Option<String>,
    /// If `Some`, replaces all enrollments. If `None`, leaves them unchanged.
    pub students: Option<Vec<DbId>>,
}

/// Exact-match filters for listing courses. Conditions are AND-combined and
/// an empty filter matches every course.
#[derive(Debug, Clone, Default)]
pub struct CourseFilter {
    /// Every id listed here must equal the course id. Two different ids
    /// therefore match nothing.
    pub ids: Vec<DbId>,
    pub name: Option<String>,
}
