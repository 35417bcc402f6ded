//! Unified error types for the domain layer
//!
//! Provides a common error type that can be used across all domain operations,
//! enabling consistent error handling without forcing callers to use String.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone)]
pub enum DomainError {
    /// No resolvable source or candidate
    #[error("Not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Target is already owned by a different lock key
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Extra-data replacement with the wrong payload kind
    #[error("Type mismatch: expected {expected}")]
    TypeMismatch { expected: &'static str },

    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),
}

impl DomainError {
    /// Create a not found error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Create an invalid state error for lock/ownership conflicts
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a type mismatch error for extra-data payloads
    pub fn type_mismatch(expected: &'static str) -> Self {
        Self::TypeMismatch { expected }
    }

    /// Creates a validation error for business rule violations.
    ///
    /// Use this when domain invariants or constraints are violated:
    /// - Required fields are empty or missing
    /// - Values are outside allowed ranges
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let err = DomainError::not_found("Design", "123e4567-e89b-12d3-a456-426614174000");
        assert!(matches!(err, DomainError::NotFound { .. }));
        assert!(err.to_string().contains("Design"));
        assert!(err.to_string().contains("123e4567"));
    }

    #[test]
    fn test_invalid_state_error() {
        let err = DomainError::invalid_state("locked by another owner");
        assert!(matches!(err, DomainError::InvalidState(_)));
        assert_eq!(err.to_string(), "Invalid state: locked by another owner");
    }

    #[test]
    fn test_type_mismatch_error() {
        let err = DomainError::type_mismatch("restriction string");
        assert_eq!(err.to_string(), "Type mismatch: expected restriction string");
    }

    #[test]
    fn test_validation_error() {
        let err = DomainError::validation("design name cannot be empty");
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(
            err.to_string(),
            "Validation failed: design name cannot be empty"
        );
    }
}
