use thiserror::Error;

/// Failure raised when an assertion over actual vs. expected values does not hold.
#[derive(Debug, Error)]
pub enum ComparisonError {
    /// The two values were expected to be equal.
    #[error("expected {expected}, but was {actual}")]
    NotEqual { expected: String, actual: String },
    /// The two values were expected to differ.
    #[error("expected values to differ, but both were {actual}")]
    Equal { actual: String },
    /// A boolean condition did not hold.
    #[error("{0}")]
    ConditionFailed(String),
    /// A value fell outside the expected range.
    #[error("expected {value} to be within {min}..={max}")]
    OutOfRange {
        value: String,
        min: String,
        max: String,
    },
    /// A string did not match the expected pattern.
    #[error("value '{value}' does not match pattern '{pattern}'")]
    PatternMismatch { value: String, pattern: String },
    /// The assertion itself was given an uncompilable pattern.
    #[error("invalid assertion pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}
