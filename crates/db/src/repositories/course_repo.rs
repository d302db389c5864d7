//! Repository for the `courses` and `course_students` tables.

use courses_core::types::DbId;
use sqlx::postgres::PgExecutor;
use sqlx::PgPool;

use crate::models::course::{Course, CourseFilter, CreateCourse, UpdateCourse};
use crate::models::student::Student;

/// Course columns plus the aggregated, sorted student id list. Callers append
/// their own `WHERE` clause followed by `GROUP BY c.id`.
const SELECT_COURSE: &str = "SELECT c.id, c.name, \
    COALESCE(ARRAY_AGG(cs.student_id ORDER BY cs.student_id) \
        FILTER (WHERE cs.student_id IS NOT NULL), '{}') AS students, \
    c.created_at, c.updated_at \
    FROM courses c \
    LEFT JOIN course_students cs ON cs.course_id = c.id";

/// Column list for the `students` table (used in JOIN queries).
const STUDENT_COLUMNS: &str = "s.id, s.name, s.created_at, s.updated_at";

/// Provides CRUD operations for courses and their student enrollments.
pub struct CourseRepo;

impl CourseRepo {
    /// Insert a new course and enroll `input.students`, in one transaction.
    ///
    /// The caller is responsible for checking that the student ids exist and
    /// respect the enrollment cap.
    pub async fn create(pool: &PgPool, input: &CreateCourse) -> Result<Course, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let id: DbId = sqlx::query_scalar("INSERT INTO courses (name) VALUES ($1) RETURNING id")
            .bind(&input.name)
            .fetch_one(&mut *tx)
            .await?;

        if !input.students.is_empty() {
            Self::set_students_inner(&mut tx, id, &input.students).await?;
        }

        let course = Self::fetch_one(&mut *tx, id).await?;
        tx.commit().await?;
        Ok(course)
    }

    /// Find a course by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Course>, sqlx::Error> {
        let query = format!("{SELECT_COURSE} WHERE c.id = $1 GROUP BY c.id");
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List courses matching `filter`, oldest first.
    pub async fn list(pool: &PgPool, filter: &CourseFilter) -> Result<Vec<Course>, sqlx::Error> {
        // `= ALL('{}')` is true, so an empty id list imposes no constraint.
        let query = format!(
            "{SELECT_COURSE} \
             WHERE c.id = ALL($1::BIGINT[]) \
               AND ($2::TEXT IS NULL OR c.name = $2) \
             GROUP BY c.id \
             ORDER BY c.id"
        );
        sqlx::query_as::<_, Course>(&query)
            .bind(&filter.ids)
            .bind(&filter.name)
            .fetch_all(pool)
            .await
    }

    /// Update a course. Only non-`None` fields in `input` are applied.
    ///
    /// If `students` is `Some`, replaces all enrollments.
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCourse,
    ) -> Result<Option<Course>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let updated: Option<DbId> = sqlx::query_scalar(
            "UPDATE courses SET \
                name = COALESCE($2, name), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING id",
        )
        .bind(id)
        .bind(&input.name)
        .fetch_optional(&mut *tx)
        .await?;

        if updated.is_none() {
            return Ok(None);
        }

        if let Some(ref students) = input.students {
            Self::set_students_inner(&mut tx, id, students).await?;
        }

        let course = Self::fetch_one(&mut *tx, id).await?;
        tx.commit().await?;
        Ok(Some(course))
    }

    /// Delete a course by ID. Enrollments go with it; students stay.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Total number of courses.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM courses")
            .fetch_one(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Enrollment helpers
    // -----------------------------------------------------------------------

    /// Get all students enrolled in a course, ordered by id.
    pub async fn list_students(
        pool: &PgPool,
        course_id: DbId,
    ) -> Result<Vec<Student>, sqlx::Error> {
        let query = format!(
            "SELECT {STUDENT_COLUMNS} \
             FROM students s \
             JOIN course_students cs ON cs.student_id = s.id \
             WHERE cs.course_id = $1 \
             ORDER BY s.id"
        );
        sqlx::query_as::<_, Student>(&query)
            .bind(course_id)
            .fetch_all(pool)
            .await
    }

    /// Enroll a single student in a course (idempotent).
    ///
    /// Returns `true` if a new enrollment was created.
    pub async fn add_student(
        pool: &PgPool,
        course_id: DbId,
        student_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO course_students (course_id, student_id) \
             VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(course_id)
        .bind(student_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove a single student from a course.
    ///
    /// Returns `true` if the enrollment was removed.
    pub async fn remove_student(
        pool: &PgPool,
        course_id: DbId,
        student_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM course_students \
             WHERE course_id = $1 AND student_id = $2",
        )
        .bind(course_id)
        .bind(student_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Re-read a course that is known to exist, using any executor so the
    /// read can happen inside an open transaction.
    async fn fetch_one<'e, E>(executor: E, id: DbId) -> Result<Course, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("{SELECT_COURSE} WHERE c.id = $1 GROUP BY c.id");
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .fetch_one(executor)
            .await
    }

    /// Replace a course's enrollments within an existing transaction.
    async fn set_students_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        course_id: DbId,
        student_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM course_students WHERE course_id = $1")
            .bind(course_id)
            .execute(&mut **tx)
            .await?;

        sqlx::query(
            "INSERT INTO course_students (course_id, student_id) \
             SELECT $1, UNNEST($2::BIGINT[]) \
             ON CONFLICT DO NOTHING",
        )
        .bind(course_id)
        .bind(student_ids)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }
}
