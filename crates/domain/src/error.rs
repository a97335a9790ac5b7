//! Unified error types for the domain layer
//!
//! Record construction, type-expression parsing and patch application all
//! report through [`DomainError`], so the factory layer can wrap a single
//! error type instead of juggling one per module.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Validation failed (e.g., a value does not match the declared type)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A required record field was not supplied
    #[error("Missing field: {record}.{field}")]
    MissingField { record: String, field: String },

    /// A keyword was supplied that the record does not declare
    #[error("Unexpected field: {record}.{field}")]
    UnexpectedField { record: String, field: String },

    /// Parse error (type expressions, timestamps, pointers)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Patch operation could not be applied to the document
    #[error("Patch error: {0}")]
    Patch(String),

    /// A type name in a type expression is not visible in the scope
    #[error("Unresolved type: {0}")]
    UnresolvedType(String),
}

impl DomainError {
    /// Creates a validation error for values that break a record's schema.
    ///
    /// # Example
    /// ```ignore
    /// if !shape.accepts(&value) {
    ///     return Err(DomainError::validation(format!("{name} expects {shape}")));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a missing field error
    pub fn missing_field(record: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MissingField {
            record: record.into(),
            field: field.into(),
        }
    }

    /// Create an unexpected field error
    pub fn unexpected_field(record: impl Into<String>, field: impl Into<String>) -> Self {
        Self::UnexpectedField {
            record: record.into(),
            field: field.into(),
        }
    }

    /// Creates a parse error for string-to-type conversion failures.
    ///
    /// Use this when the input string doesn't match the expected grammar:
    /// - Malformed type expressions (`list[str`)
    /// - Timestamps that are not ISO-8601
    /// - JSON pointers that do not start with `/`
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a patch application error
    pub fn patch(msg: impl Into<String>) -> Self {
        Self::Patch(msg.into())
    }

    /// Create an unresolved type error
    pub fn unresolved_type(name: impl Into<String>) -> Self {
        Self::UnresolvedType(name.into())
    }
}
