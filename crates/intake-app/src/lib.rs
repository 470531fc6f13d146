pub mod availability_service;
pub mod error;

pub use availability_service::AvailabilityService;
pub use error::AppError;
