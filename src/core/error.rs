//! Typed errors for the calculators.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CalcError {
    pub fn invalid(message: impl Into<String>) -> Self {
        CalcError::InvalidInput(message.into())
    }
}

/// Rejects non-finite or non-positive amounts.
pub(crate) fn ensure_positive(name: &str, value: f64) -> Result<(), CalcError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CalcError::invalid(format!(
            "{name} must be a positive number, got {value}"
        )));
    }
    Ok(())
}

/// Rejects negative or non-finite rates. Zero is allowed.
pub(crate) fn ensure_rate(value: f64) -> Result<(), CalcError> {
    if !value.is_finite() || value < 0.0 {
        return Err(CalcError::invalid(format!(
            "annual rate must be zero or positive, got {value}"
        )));
    }
    Ok(())
}

/// Longest accepted term. Keeps month counts well inside `u32`.
pub const MAX_TERM_YEARS: u32 = 100;

pub(crate) fn ensure_term(years: u32) -> Result<(), CalcError> {
    if years == 0 {
        return Err(CalcError::invalid("term must be at least one year"));
    }
    if years > MAX_TERM_YEARS {
        return Err(CalcError::invalid(format!(
            "term must be at most {MAX_TERM_YEARS} years, got {years}"
        )));
    }
    Ok(())
}

/// Rejects results that overflowed or lost all precision.
pub(crate) fn ensure_finite(name: &str, value: f64) -> Result<(), CalcError> {
    if !value.is_finite() {
        return Err(CalcError::invalid(format!(
            "{name} is not representable for these inputs"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validators() {
        assert!(ensure_positive("principal", 1.0).is_ok());
        assert!(ensure_positive("principal", 0.0).is_err());
        assert!(ensure_positive("principal", f64::NAN).is_err());
        assert!(ensure_rate(0.0).is_ok());
        assert!(ensure_rate(-0.1).is_err());
        assert!(ensure_rate(f64::INFINITY).is_err());
        assert_eq!(
            ensure_term(0).unwrap_err().to_string(),
            "Invalid input: term must be at least one year"
        );
        assert!(ensure_term(MAX_TERM_YEARS).is_ok());
        assert_eq!(
            ensure_term(MAX_TERM_YEARS + 1).unwrap_err().to_string(),
            "Invalid input: term must be at most 100 years, got 101"
        );
        assert!(ensure_term(u32::MAX).is_err());
        assert!(ensure_finite("payment", 1.0).is_ok());
        assert!(ensure_finite("payment", f64::INFINITY).is_err());
        assert!(ensure_finite("payment", f64::NAN).is_err());
    }
}
