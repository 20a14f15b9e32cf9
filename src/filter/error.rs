use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("{field} must be greater than or equal to {min}")]
    BelowMinimum { field: &'static str, min: i64 },

    #[error("{0} must not be empty")]
    EmptyValue(&'static str),

    #[error("Min employees cannot be greater than max")]
    InvalidEmployeeRange,

    #[error("Invalid query string: {0}")]
    InvalidQuery(String),
}
