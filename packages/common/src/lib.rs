pub mod config;
pub mod database;
pub mod entity;
#[cfg(feature = "http")]
pub mod http;
pub mod seed;
pub mod shutdown;
pub mod store;
pub mod submission_status;


pub use submission_status::SubmissionStatus;
