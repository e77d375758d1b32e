pub mod board;
pub mod dates;
pub mod dto;
pub mod handlers;
pub mod models;
pub mod service;

// Re-export commonly used types
pub use models::{JobApplication, JobStatus, Priority};
pub use service::{JobService, ServiceError};
