use crate::utils::error::{Result, SchedulerError};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_finite(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(SchedulerError::NotFinite { field, value });
    }
    Ok(())
}

/// 片段長度不可小於最短限制（NaN 也視為過短）
pub fn validate_min_duration(operation: &'static str, duration: f64, min: f64) -> Result<()> {
    if duration.is_nan() || duration < min {
        return Err(SchedulerError::DurationTooSmall {
            operation,
            duration,
        });
    }
    Ok(())
}

pub fn validate_positive(field: &str, value: f64) -> Result<()> {
    if !(value.is_finite() && value > 0.0) {
        return Err(SchedulerError::config(format!(
            "{} must be a positive number, got {}",
            field, value
        )));
    }
    Ok(())
}

pub fn validate_non_empty_string(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SchedulerError::config(format!(
            "{} cannot be empty or whitespace-only",
            field
        )));
    }
    Ok(())
}
