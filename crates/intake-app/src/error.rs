use intake_core::error::DomainError;
use intake_ports::error::PortError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),
    #[error("port error: {0}")]
    Port(#[from] PortError),
    #[error("date range end precedes start")]
    InvalidDateRange,
    #[error("date range spans {days} days, limit is {max}")]
    RangeTooLarge { days: i64, max: i64 },
    #[error("no admissible day within {max_days} days")]
    NoAvailableDay { max_days: u32 },
}
