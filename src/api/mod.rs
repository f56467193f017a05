pub mod client;
pub mod error;
pub mod types;

pub use client::{JobApi, JobClient, Timeouts};
pub use error::ApiError;
pub use types::{StartRequest, StatusRecord};
