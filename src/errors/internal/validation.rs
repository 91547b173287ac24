use thiserror::Error;

/// Malformed input, reported before anything touches the store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("Invalid value for {field}: {value}")]
    InvalidEnumValue { field: &'static str, value: String },

    #[error("Update contains no fields")]
    EmptyUpdate,

    #[error("Amount must not be negative: {0}")]
    NegativeAmount(String),

    #[error("Amount must be finite: {0}")]
    NonFiniteAmount(String),

    #[error("Amount has more than two decimal places: {0}")]
    TooManyDecimalPlaces(String),

    #[error("Amount out of range: {0}")]
    AmountOutOfRange(String),

    #[error("Not a monetary amount: {0}")]
    InvalidAmount(String),

    #[error("Vehicle year {year} outside {min}..={max}")]
    YearOutOfRange { year: i32, min: i32, max: i32 },

    #[error("Administrators cannot deactivate their own account")]
    SelfDeactivation,
}

impl ValidationError {
    pub fn invalid_enum(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidEnumValue {
            field,
            value: value.into(),
        }
    }
}
