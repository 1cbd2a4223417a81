//! # Error Types
//!
//! Domain-specific error types for vitrine-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  vitrine-core errors (this file)                                       │
//! │  ├── CoreError        - Construction / membership failures             │
//! │  └── ValidationError  - A single field failed its range check          │
//! │                                                                         │
//! │  vitrine-catalog errors (separate crate)                               │
//! │  └── CatalogError     - Lookup, duplicate and configuration failures   │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CatalogError → API layer          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Where Errors Do NOT Appear
//! `try_set_*` mutators never return these types. They run the same
//! validators and collapse the outcome into a `bool`, leaving the item
//! untouched on failure. Only strict construction surfaces a `CoreError`.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core pricing-domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Strict construction rejected one of the supplied fields.
    ///
    /// ## When This Occurs
    /// - `ConstructionMode::Strict` and the id is shorter than 2 characters
    /// - `ConstructionMode::Strict` and the name is missing or too short
    /// - `ConstructionMode::Strict` and any numeric field is out of range
    #[error("Invalid item: {0}")]
    InvalidConstruction(#[from] ValidationError),

    /// A kind-specific attribute was supplied for the wrong kind of item.
    ///
    /// e.g. a weight on a digital item, or a license key on a physical one.
    #[error("Attribute {attribute} does not apply to {kind} items")]
    AttributeKindMismatch {
        attribute: &'static str,
        kind: &'static str,
    },

    /// Item is already a member of the category.
    #[error("Item {item_id} is already in category '{category}'")]
    AlreadyInCategory { item_id: String, category: String },

    /// Item is not a member of the category.
    #[error("Item {item_id} is not in category '{category}'")]
    NotInCategory { item_id: String, category: String },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field validation errors.
///
/// Every bounded field on an item has a validator in
/// [`crate::validation`] that produces one of these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short (after trimming).
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range (NaN is always out of range).
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

impl ValidationError {
    /// Name of the field that failed.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooShort { field, .. }
            | ValidationError::TooLong { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::NotAllowed { field, .. } => field,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::TooShort {
            field: "id".to_string(),
            min: 2,
        };
        assert_eq!(err.to_string(), "id must be at least 2 characters");

        let err = ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0.0,
            max: 1_000_000.0,
        };
        assert_eq!(err.to_string(), "price must be between 0 and 1000000");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::InvalidConstruction(_)));
        assert_eq!(core_err.to_string(), "Invalid item: name is required");
    }

    #[test]
    fn test_field_accessor() {
        let err = ValidationError::TooLong {
            field: "license_key".to_string(),
            max: 64,
        };
        assert_eq!(err.field(), "license_key");
    }
}
