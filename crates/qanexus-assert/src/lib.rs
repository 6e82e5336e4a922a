//! Value-comparison assertion helpers for QA tests.
//!
//! Each helper compares actual vs. expected values and returns a descriptive
//! [`ComparisonError`] instead of panicking, so callers can collect or wrap
//! failures. Typically consumed by validators over synthetically generated
//! data (see the `qanexus-generate` crate).

use std::fmt;

use regex::Regex;

mod error;

pub use error::ComparisonError;

/// Convenience alias for results returned by assertion helpers.
pub type Result<T> = std::result::Result<T, ComparisonError>;

/// Asserts that two values are equal.
pub fn assert_equal<T: PartialEq + fmt::Debug>(actual: &T, expected: &T) -> Result<()> {
    if actual == expected {
        Ok(())
    } else {
        Err(ComparisonError::NotEqual {
            expected: format!("{expected:?}"),
            actual: format!("{actual:?}"),
        })
    }
}

/// Asserts that two values differ.
pub fn assert_not_equal<T: PartialEq + fmt::Debug>(actual: &T, expected: &T) -> Result<()> {
    if actual == expected {
        Err(ComparisonError::Equal {
            actual: format!("{actual:?}"),
        })
    } else {
        Ok(())
    }
}

/// Asserts that a condition holds.
pub fn assert_true(condition: bool, message: &str) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(ComparisonError::ConditionFailed(message.to_string()))
    }
}

/// Asserts that a condition does not hold.
pub fn assert_false(condition: bool, message: &str) -> Result<()> {
    if condition {
        Err(ComparisonError::ConditionFailed(message.to_string()))
    } else {
        Ok(())
    }
}

/// Asserts that a value lies within the inclusive range `min..=max`.
pub fn assert_in_range<T: PartialOrd + fmt::Debug>(value: &T, min: &T, max: &T) -> Result<()> {
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(ComparisonError::OutOfRange {
            value: format!("{value:?}"),
            min: format!("{min:?}"),
            max: format!("{max:?}"),
        })
    }
}

/// Asserts that a string matches the given regular expression.
pub fn assert_matches_pattern(value: &str, pattern: &str) -> Result<()> {
    let regex = Regex::new(pattern).map_err(|err| ComparisonError::InvalidPattern {
        pattern: pattern.to_string(),
        message: err.to_string(),
    })?;
    if regex.is_match(value) {
        Ok(())
    } else {
        Err(ComparisonError::PatternMismatch {
            value: value.to_string(),
            pattern: pattern.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_values_pass() {
        assert!(assert_equal(&42, &42).is_ok());
        assert!(assert_not_equal(&42, &41).is_ok());
    }

    #[test]
    fn unequal_values_report_both_sides() {
        let err = assert_equal(&"actual", &"expected").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("expected"));
        assert!(message.contains("actual"));
    }

    #[test]
    fn range_is_inclusive() {
        assert!(assert_in_range(&10, &10, &20).is_ok());
        assert!(assert_in_range(&20, &10, &20).is_ok());
        assert!(matches!(
            assert_in_range(&21, &10, &20),
            Err(ComparisonError::OutOfRange { .. })
        ));
    }

    #[test]
    fn pattern_mismatch_is_reported() {
        assert!(assert_matches_pattern("abc-123", r"^[a-z]+-\d+$").is_ok());
        assert!(matches!(
            assert_matches_pattern("abc", r"^\d+$"),
            Err(ComparisonError::PatternMismatch { .. })
        ));
        assert!(matches!(
            assert_matches_pattern("abc", r"("),
            Err(ComparisonError::InvalidPattern { .. })
        ));
    }
}
