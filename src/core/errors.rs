//! Errors surfaced when building controllers from settings.
use std::fmt;

/// Validation failures for movement and camera settings.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NonFinite {
        field: &'static str,
    },
    Negative {
        field: &'static str,
        value: f32,
    },
    NotPositive {
        field: &'static str,
        value: f32,
    },
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
    EmptyLayerMask,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite { field } => write!(f, "{} must be a finite number", field),
            Self::Negative { field, value } => {
                write!(f, "{} must not be negative (got {})", field, value)
            }
            Self::NotPositive { field, value } => {
                write!(f, "{} must be greater than zero (got {})", field, value)
            }
            Self::OutOfRange {
                field,
                value,
                min,
                max,
            } => write!(
                f,
                "{} must lie in ({}, {}] (got {})",
                field, min, max, value
            ),
            Self::EmptyLayerMask => write!(f, "ground layer mask selects no layers"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Rejects NaN and infinities.
pub fn check_finite(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NonFinite { field })
    }
}

/// Rejects non-finite and negative values.
pub fn check_non_negative(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    let value = check_finite(field, value)?;
    if value < 0.0 {
        Err(ConfigError::Negative { field, value })
    } else {
        Ok(value)
    }
}

/// Rejects non-finite values and anything not strictly above zero.
pub fn check_positive(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    let value = check_finite(field, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}
