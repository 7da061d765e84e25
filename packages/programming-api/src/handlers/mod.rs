pub mod assignment;
pub mod grading;
pub mod score;
