pub mod assignment;
pub mod grading;
