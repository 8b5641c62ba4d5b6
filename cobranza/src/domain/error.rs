use chrono::NaiveDate;
use thiserror::Error;

/// Reasons a schedule submitted by a form is rejected.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("end date {end} is before start date {start}")]
    InvalidEndDate { start: NaiveDate, end: NaiveDate },
    #[error("invalid custom interval: {0}")]
    InvalidCustomInterval(IntervalError),
    #[error("custom recurrence requires a unit (days, weeks or months)")]
    MissingCustomUnit,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum IntervalError {
    #[error("an interval is required for custom recurrence")]
    Missing,
    #[error("{0} is not a whole number")]
    NotWhole(f64),
    #[error("{0} is less than 1")]
    NotPositive(f64),
    #[error("{0} exceeds the largest supported interval")]
    TooLarge(f64),
}

impl From<IntervalError> for ValidationError {
    fn from(err: IntervalError) -> Self {
        ValidationError::InvalidCustomInterval(err)
    }
}
