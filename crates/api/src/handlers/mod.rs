pub mod course;
pub mod student;
