//! # Validation Module
//!
//! Field validators for items.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      One Validator, Two Callers                         │
//! │                                                                         │
//! │  validate_price(v) ──► Ok(v) / Err(ValidationError)                     │
//! │        │                                                                │
//! │        ├──► Item::try_set_price(v)   → bool, state untouched on Err     │
//! │        │                                                                │
//! │        └──► ItemBuilder::build()     → Permissive: default on Err       │
//! │                                        Strict:     CoreError on Err     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every validator returns the normalized value it accepted (trimmed text,
//! the number unchanged) so callers commit exactly what was checked.

use crate::error::ValidationError;
use crate::{
    MAX_DESCRIPTION_LEN, MAX_DIMENSION_CM, MAX_DOWNLOAD_SIZE_MB, MAX_LICENSE_KEY_LEN, MAX_MARKDOWN_PERCENT,
    MAX_PRICE, MAX_QUANTITY, MAX_WEIGHT_KG, MIN_TEXT_LEN,
};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Helpers
// =============================================================================

/// Inclusive range check. NaN never passes.
fn check_range(field: &str, value: f64, min: f64, max: f64) -> ValidationResult<f64> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min,
            max,
        })
    }
}

fn check_min_text(field: &str, value: &str) -> ValidationResult<String> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if trimmed.chars().count() < MIN_TEXT_LEN {
        return Err(ValidationError::TooShort {
            field: field.to_string(),
            min: MIN_TEXT_LEN,
        });
    }

    Ok(trimmed.to_string())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates an item id.
///
/// ## Rules
/// - At least 2 characters after trimming
/// - The trimmed value is what gets stored
///
/// ## Example
/// ```rust
/// use vitrine_core::validation::validate_id;
///
/// assert_eq!(validate_id("  P-1 ").unwrap(), "P-1");
/// assert!(validate_id("X").is_err());
/// ```
pub fn validate_id(id: &str) -> ValidationResult<String> {
    check_min_text("id", id)
}

/// Validates an item name. Same rules as the id.
pub fn validate_name(name: &str) -> ValidationResult<String> {
    check_min_text("name", name)
}

/// Validates an optional description.
///
/// ## Rules
/// - `None` is allowed
/// - At most 200 characters once trimmed; the original text is kept
pub fn validate_description(description: Option<&str>) -> ValidationResult<Option<String>> {
    match description {
        None => Ok(None),
        Some(text) if text.trim().chars().count() <= MAX_DESCRIPTION_LEN => {
            Ok(Some(text.to_string()))
        }
        Some(_) => Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: MAX_DESCRIPTION_LEN,
        }),
    }
}

/// Validates an optional license key (at most 64 characters).
pub fn validate_license_key(key: Option<&str>) -> ValidationResult<Option<String>> {
    match key {
        None => Ok(None),
        Some(text) if text.chars().count() <= MAX_LICENSE_KEY_LEN => Ok(Some(text.to_string())),
        Some(_) => Err(ValidationError::TooLong {
            field: "license_key".to_string(),
            max: MAX_LICENSE_KEY_LEN,
        }),
    }
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price: `0 ≤ price ≤ 1,000,000`.
///
/// ## Example
/// ```rust
/// use vitrine_core::validation::validate_price;
///
/// assert!(validate_price(0.0).is_ok());
/// assert!(validate_price(1_000_000.0).is_ok());
/// assert!(validate_price(-0.01).is_err());
/// assert!(validate_price(f64::NAN).is_err());
/// ```
pub fn validate_price(price: f64) -> ValidationResult<f64> {
    check_range("price", price, 0.0, MAX_PRICE)
}

/// Validates a unit cost, same bounds as the price.
pub fn validate_cost_price(cost: f64) -> ValidationResult<f64> {
    check_range("cost_price", cost, 0.0, MAX_PRICE)
}

/// Validates a stock quantity: `0 ≤ qty ≤ 1,000,000`.
pub fn validate_quantity(qty: i64) -> ValidationResult<i64> {
    if (0..=MAX_QUANTITY).contains(&qty) {
        Ok(qty)
    } else {
        Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 0.0,
            max: MAX_QUANTITY as f64,
        })
    }
}

/// Validates a physical weight in kilograms (0-1000).
pub fn validate_weight_kg(weight: f64) -> ValidationResult<f64> {
    check_range("weight_kg", weight, 0.0, MAX_WEIGHT_KG)
}

/// Validates the three package dimensions (each 0-1000 cm) as a unit.
pub fn validate_dimensions(length: f64, width: f64, height: f64) -> ValidationResult<(f64, f64, f64)> {
    let length = check_range("length_cm", length, 0.0, MAX_DIMENSION_CM)?;
    let width = check_range("width_cm", width, 0.0, MAX_DIMENSION_CM)?;
    let height = check_range("height_cm", height, 0.0, MAX_DIMENSION_CM)?;
    Ok((length, width, height))
}

/// Validates a digital download size in megabytes (0-1,000,000).
pub fn validate_download_size_mb(size: f64) -> ValidationResult<f64> {
    check_range("download_size_mb", size, 0.0, MAX_DOWNLOAD_SIZE_MB)
}

/// Validates a permanent markdown percentage (0-90).
pub fn validate_markdown_percent(percent: f64) -> ValidationResult<f64> {
    check_range("markdown_percent", percent, 0.0, MAX_MARKDOWN_PERCENT)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_id_and_name() {
        assert_eq!(validate_id("AB").unwrap(), "AB");
        assert_eq!(validate_name("  Laptop  ").unwrap(), "Laptop");

        assert!(matches!(
            validate_id("   "),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_name(" a "),
            Err(ValidationError::TooShort { min: 2, .. })
        ));
    }

    #[test]
    fn test_validate_description() {
        assert_eq!(validate_description(None).unwrap(), None);
        assert_eq!(
            validate_description(Some("Flagship phone")).unwrap(),
            Some("Flagship phone".to_string())
        );
        assert!(validate_description(Some(&"x".repeat(200))).is_ok());
        assert!(validate_description(Some(&"x".repeat(201))).is_err());
    }

    #[test]
    fn test_validate_price_bounds() {
        assert!(validate_price(0.0).is_ok());
        assert!(validate_price(1_000_000.0).is_ok());
        assert!(validate_price(1_000_000.01).is_err());
        assert!(validate_price(-1.0).is_err());
        assert!(validate_price(f64::NAN).is_err());
        assert!(validate_price(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_quantity_bounds() {
        assert!(validate_quantity(0).is_ok());
        assert!(validate_quantity(1_000_000).is_ok());
        assert!(validate_quantity(1_000_001).is_err());
        assert!(validate_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_dimensions_all_or_nothing() {
        assert_eq!(validate_dimensions(35.0, 24.0, 2.0).unwrap(), (35.0, 24.0, 2.0));
        let err = validate_dimensions(35.0, 1001.0, 2.0).unwrap_err();
        assert_eq!(err.field(), "width_cm");
    }

    #[test]
    fn test_validate_license_key() {
        assert_eq!(validate_license_key(None).unwrap(), None);
        assert!(validate_license_key(Some(&"k".repeat(64))).is_ok());
        assert!(validate_license_key(Some(&"k".repeat(65))).is_err());
    }

    #[test]
    fn test_validate_markdown_percent() {
        assert!(validate_markdown_percent(90.0).is_ok());
        assert!(validate_markdown_percent(90.5).is_err());
    }
}
