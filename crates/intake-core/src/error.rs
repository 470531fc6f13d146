use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("unknown timezone: {0}")]
    InvalidTimezone(String),
    #[error("window requires at least one weekday")]
    WindowRequiresWeekday,
    #[error("window start minute must be before end minute, both within a day")]
    InvalidWindowBounds,
    #[error("event ends before it starts")]
    InvalidEventPeriod,
    #[error("invalid id: {0}")]
    InvalidId(String),
}
