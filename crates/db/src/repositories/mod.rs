//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod course_repo;
pub mod student_repo;

pub use course_repo::CourseRepo;
pub use student_repo::StudentRepo;
