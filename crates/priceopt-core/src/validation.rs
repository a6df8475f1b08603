//! Validation utilities.

use crate::{FieldError, PricingError};
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns a `PricingError` on failure.
    fn validate_request(&self) -> Result<(), PricingError> {
        self.validate().map_err(validation_errors_to_pricing_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Flattens `validator::ValidationErrors` into field errors.
#[must_use]
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: (*field).to_string(),
                message: error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string),
                code: error.code.to_string(),
            })
        })
        .collect();
    fields.sort_by(|a, b| a.field.cmp(&b.field));
    fields
}

/// Converts `validator::ValidationErrors` to `PricingError`.
#[must_use]
pub fn validation_errors_to_pricing_error(errors: ValidationErrors) -> PricingError {
    let message = field_errors(&errors)
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ");

    PricingError::Validation(message)
}

/// Common validation functions.
pub mod rules {
    use validator::ValidationError;

    /// Maximum SKU length.
    pub const MAX_SKU_LENGTH: usize = 64;

    /// Validates that a string is not blank (not empty after trimming).
    pub fn not_blank(value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new("not_blank"));
        }
        Ok(())
    }

    /// Validates a SKU: non-blank, bounded, `[A-Za-z0-9._-]`.
    pub fn valid_sku(sku: &str) -> Result<(), ValidationError> {
        not_blank(sku)?;
        if sku.len() > MAX_SKU_LENGTH {
            return Err(ValidationError::new("sku_too_long"));
        }
        if !sku
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        {
            return Err(ValidationError::new("sku_invalid_characters"));
        }
        Ok(())
    }

    /// Validates that an amount is a finite, non-negative number.
    pub fn non_negative_amount(value: f64) -> Result<(), ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::new("amount_not_finite"));
        }
        if value < 0.0 {
            return Err(ValidationError::new("amount_negative"));
        }
        Ok(())
    }

    /// Validates that a value is a fraction in `[0, 1]`.
    pub fn fraction(value: f64) -> Result<(), ValidationError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(ValidationError::new("fraction_out_of_range"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::rules::*;
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(custom(function = "valid_sku"))]
        sku: String,
        #[validate(range(min = 0.0, message = "cost must be non-negative"))]
        cost: f64,
    }

    #[test]
    fn test_not_blank() {
        assert!(not_blank("SKU1").is_ok());
        assert!(not_blank("   ").is_err());
        assert!(not_blank("").is_err());
    }

    #[test]
    fn test_valid_sku() {
        assert!(valid_sku("SKU123").is_ok());
        assert!(valid_sku("shoe-42_blue.v2").is_ok());
        assert!(valid_sku("").is_err());
        assert!(valid_sku("has space").is_err());
        assert!(valid_sku("sku/1").is_err());
        assert!(valid_sku(&"x".repeat(MAX_SKU_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_non_negative_amount() {
        assert!(non_negative_amount(0.0).is_ok());
        assert!(non_negative_amount(109.5).is_ok());
        assert!(non_negative_amount(-0.01).is_err());
        assert!(non_negative_amount(f64::NAN).is_err());
        assert!(non_negative_amount(f64::INFINITY).is_err());
    }

    #[test]
    fn test_fraction() {
        assert!(fraction(0.0).is_ok());
        assert!(fraction(0.15).is_ok());
        assert!(fraction(1.0).is_ok());
        assert!(fraction(1.5).is_err());
        assert!(fraction(-0.1).is_err());
    }

    #[test]
    fn test_validate_request_collects_fields() {
        let sample = Sample {
            sku: "bad sku".to_string(),
            cost: -1.0,
        };
        let err = sample.validate_request().unwrap_err();
        match err {
            PricingError::Validation(msg) => {
                assert!(msg.contains("cost: cost must be non-negative"));
                assert!(msg.contains("sku: sku_invalid_characters"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
