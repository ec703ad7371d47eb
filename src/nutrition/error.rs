//! Nutrition calculation errors

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum NutritionError {
    #[error("Invalid profile: {field} {reason}")]
    InvalidProfile { field: &'static str, reason: String },
}

impl NutritionError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        NutritionError::InvalidProfile {
            field,
            reason: reason.into(),
        }
    }
}

/// Result type for nutrition calculations
pub type NutritionResult<T> = Result<T, NutritionError>;
