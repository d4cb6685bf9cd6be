use crate::engine::ChartId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChartError {
    #[error("chart {0} is not registered")]
    UnknownChart(ChartId),

    #[error("date range end {end} precedes start {start}")]
    InvalidDateRange { start: i64, end: i64 },

    #[error("timestamp {0} is out of range")]
    TimestampOutOfRange(i64),
}

pub type ChartResult<T> = Result<T, ChartError>;
