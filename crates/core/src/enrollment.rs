//! Course enrollment rules.
//!
//! A course holds a set of student ids. The set is normalized (sorted,
//! de-duplicated) before it is checked or stored, and its size is capped by
//! the configurable per-course maximum.

use crate::error::CoreError;
use crate::types::DbId;

/// Default cap on the number of students enrolled in one course.
pub const DEFAULT_MAX_STUDENTS_PER_COURSE: usize = 20;

/// Sort and de-duplicate a list of student ids.
pub fn normalize_student_ids(ids: &[DbId]) -> Vec<DbId> {
    let mut ids = ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// Reject an enrollment set larger than `max_students`.
///
/// `student_ids` is expected to be normalized already; duplicates would be
/// counted twice.
pub fn validate_enrollment(student_ids: &[DbId], max_students: usize) -> Result<(), CoreError> {
    if student_ids.len() > max_students {
        return Err(CoreError::Validation(format!(
            "A course may have at most {max_students} students, got {}",
            student_ids.len()
        )));
    }
    Ok(())
}
