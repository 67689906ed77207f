//! Error types shared by all calculators

use thiserror::Error;

/// Failure of a single calculation call
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// Out-of-range or non-finite input, rejected before any computation
    #[error("invalid argument `{field}`: {reason}")]
    InvalidArgument { field: &'static str, reason: String },

    /// A computed figure came out non-finite (overflow or a zero denominator)
    #[error("degenerate computation in {context}")]
    DivisionDegenerate { context: &'static str },
}

impl CalcError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        CalcError::InvalidArgument {
            field,
            reason: reason.into(),
        }
    }
}

/// Failure while writing a time series to CSV
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reject NaN and infinities
pub(crate) fn require_finite(field: &'static str, value: f64) -> Result<(), CalcError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CalcError::invalid(field, format!("must be finite, got {}", value)))
    }
}

/// Reject negative, NaN and infinite values
pub(crate) fn require_non_negative(field: &'static str, value: f64) -> Result<(), CalcError> {
    require_finite(field, value)?;
    if value < 0.0 {
        return Err(CalcError::invalid(field, format!("must be >= 0, got {}", value)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_non_negative() {
        assert!(require_non_negative("principal", 0.0).is_ok());
        assert!(require_non_negative("principal", 10.0).is_ok());

        let err = require_non_negative("principal", -1.0).unwrap_err();
        assert!(matches!(err, CalcError::InvalidArgument { field: "principal", .. }));

        assert!(require_non_negative("principal", f64::NAN).is_err());
        assert!(require_finite("rate", f64::INFINITY).is_err());
    }

    #[test]
    fn test_error_messages() {
        let err = CalcError::invalid("termYears", "must be > 0");
        assert_eq!(err.to_string(), "invalid argument `termYears`: must be > 0");

        let err = CalcError::DivisionDegenerate { context: "loan payment" };
        assert_eq!(err.to_string(), "degenerate computation in loan payment");
    }
}
