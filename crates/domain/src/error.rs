//! Domain error type
//!
//! Table parsing, lookups and aggregate type contracts all report through
//! `DomainError`; dice keep their own `DiceError` and convert into it.

use thiserror::Error;

use crate::value_objects::DiceError;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Entity not found
    #[error("Entity not found: {entity_type} {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Business rule violation
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    /// Creates a validation error for invariant violations.
    ///
    /// # Example
    /// ```ignore
    /// if faces <= 1 {
    ///     return Err(DomainError::validation("faces must exceed 1"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Create a constraint violation error
    pub fn constraint(msg: impl Into<String>) -> Self {
        Self::Constraint(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}

impl From<DiceError> for DomainError {
    fn from(err: DiceError) -> Self {
        Self::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = DomainError::validation("roll range is reversed");
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(err.to_string(), "Validation failed: roll range is reversed");
    }

    #[test]
    fn test_not_found_error() {
        let err = DomainError::not_found("Worksheet", "Magic Items 7");
        assert!(matches!(err, DomainError::NotFound { .. }));
        assert_eq!(err.to_string(), "Entity not found: Worksheet Magic Items 7");
    }

    #[test]
    fn test_constraint_error() {
        let err = DomainError::constraint("gems must be wrapped in other wealth");
        assert_eq!(
            err.to_string(),
            "Constraint violation: gems must be wrapped in other wealth"
        );
    }

    #[test]
    fn test_from_dice_error() {
        let dice_err = DiceError::MalformedExpression("missing 'd' separator in '20'".into());
        let domain_err: DomainError = dice_err.into();
        assert!(matches!(domain_err, DomainError::Parse(_)));
        assert!(domain_err.to_string().contains("Malformed dice expression"));
    }
}
