//! Error types for the conversion engine.
//!
//! Every factory returns the most specific [`FactoryError`] at the point of
//! failure. Errors from nested conversions are propagated unchanged.

use std::fmt;

use alpha_domain::{DomainError, TypeShape, Value};

/// Conversion failures, one variant per failure kind.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FactoryError {
    /// An annotation shape has no registered handling path.
    #[error("No factory handles {shape} for '{field}'")]
    TypingFactory { field: String, shape: String },

    /// Target type has no defined conversion semantics.
    #[error("Conversion to {target} is not supported")]
    ObjectConversionNotSupported { target: String },

    /// Implicit conversion to the target type is disallowed.
    #[error("Implicit conversion to {target} is not allowed")]
    ObjectConversionNotAllowed { target: String },

    /// A conversion was attempted and failed.
    #[error("Could not convert '{key}' to {target}: {message}")]
    ObjectConversion {
        key: String,
        target: String,
        message: String,
    },

    /// A union could not be narrowed to a single member.
    #[error("Mixed argument types for '{field}': {shape}")]
    MixedArgumentTypes { field: String, shape: String },

    /// No value supplied and no default available.
    #[error("Field '{field}' has no value and no default")]
    DefaultFactory { field: String },

    /// The top-level (object, class) pair is not convertible.
    #[error("Cannot build {target} from {object}")]
    ModelClassFactory { object: String, target: String },

    /// Supplied value shape conflicts with the declared shape.
    #[error("'{name}' expects {expected}, got {found}")]
    ClassMismatch {
        name: String,
        expected: String,
        found: String,
    },

    /// Source object lacks an attribute the wire model declares.
    #[error("{object} has no attribute '{attribute}'")]
    MissingAttribute { object: String, attribute: String },

    /// A type expression could not be resolved.
    #[error("Cannot resolve type {name}: {message}")]
    TypeResolution { name: String, message: String },

    /// The class handed to the field iterator is not a record.
    #[error("{0} is not a record type")]
    UnsupportedClassShape(String),

    /// Enum member or patch item lookup failed.
    #[error("Attribute error: {0}")]
    Attribute(String),

    /// A declared parameter was neither supplied nor defaulted.
    #[error("Missing argument '{0}'")]
    MissingArgument(String),

    /// Record construction failed.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Stable tag for each [`FactoryError`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    TypingFactory,
    ObjectConversionNotSupported,
    ObjectConversionNotAllowed,
    ObjectConversion,
    MixedArgumentTypes,
    DefaultFactory,
    ModelClassFactory,
    ClassMismatch,
    MissingAttribute,
    TypeResolution,
    UnsupportedClassShape,
    Attribute,
    MissingArgument,
    Domain,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl FactoryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::TypingFactory { .. } => ErrorKind::TypingFactory,
            Self::ObjectConversionNotSupported { .. } => ErrorKind::ObjectConversionNotSupported,
            Self::ObjectConversionNotAllowed { .. } => ErrorKind::ObjectConversionNotAllowed,
            Self::ObjectConversion { .. } => ErrorKind::ObjectConversion,
            Self::MixedArgumentTypes { .. } => ErrorKind::MixedArgumentTypes,
            Self::DefaultFactory { .. } => ErrorKind::DefaultFactory,
            Self::ModelClassFactory { .. } => ErrorKind::ModelClassFactory,
            Self::ClassMismatch { .. } => ErrorKind::ClassMismatch,
            Self::MissingAttribute { .. } => ErrorKind::MissingAttribute,
            Self::TypeResolution { .. } => ErrorKind::TypeResolution,
            Self::UnsupportedClassShape(_) => ErrorKind::UnsupportedClassShape,
            Self::Attribute(_) => ErrorKind::Attribute,
            Self::MissingArgument(_) => ErrorKind::MissingArgument,
            Self::Domain(_) => ErrorKind::Domain,
        }
    }

    pub fn typing_factory(field: impl ToString, shape: impl ToString) -> Self {
        Self::TypingFactory {
            field: field.to_string(),
            shape: shape.to_string(),
        }
    }

    pub fn not_supported(target: impl ToString) -> Self {
        Self::ObjectConversionNotSupported {
            target: target.to_string(),
        }
    }

    pub fn not_allowed(target: impl ToString) -> Self {
        Self::ObjectConversionNotAllowed {
            target: target.to_string(),
        }
    }

    pub fn conversion(key: impl ToString, target: impl ToString, message: impl ToString) -> Self {
        Self::ObjectConversion {
            key: key.to_string(),
            target: target.to_string(),
            message: message.to_string(),
        }
    }

    pub fn mixed_argument_types(field: impl ToString, shape: &TypeShape) -> Self {
        Self::MixedArgumentTypes {
            field: field.to_string(),
            shape: shape.to_string(),
        }
    }

    pub fn default_factory(field: impl ToString) -> Self {
        Self::DefaultFactory {
            field: field.to_string(),
        }
    }

    pub fn model_class_factory(object: &Value, target: &TypeShape) -> Self {
        Self::ModelClassFactory {
            object: object.type_name().to_string(),
            target: target.to_string(),
        }
    }

    pub fn class_mismatch(name: impl ToString, expected: &TypeShape, found: &Value) -> Self {
        Self::ClassMismatch {
            name: name.to_string(),
            expected: expected.to_string(),
            found: found.type_name().to_string(),
        }
    }

    pub fn missing_attribute(object: impl ToString, attribute: impl ToString) -> Self {
        Self::MissingAttribute {
            object: object.to_string(),
            attribute: attribute.to_string(),
        }
    }

    pub fn type_resolution(name: impl ToString, message: impl ToString) -> Self {
        Self::TypeResolution {
            name: name.to_string(),
            message: message.to_string(),
        }
    }

    pub fn unsupported_class_shape(shape: &TypeShape) -> Self {
        Self::UnsupportedClassShape(shape.to_string())
    }

    pub fn attribute(message: impl ToString) -> Self {
        Self::Attribute(message.to_string())
    }

    pub fn missing_argument(name: impl ToString) -> Self {
        Self::MissingArgument(name.to_string())
    }

    /// Whether the failure came from the caller's input rather than the
    /// declared types or the registry configuration.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::ObjectConversion
                | ErrorKind::ClassMismatch
                | ErrorKind::MissingAttribute
                | ErrorKind::MissingArgument
                | ErrorKind::Attribute
                | ErrorKind::Domain
        )
    }
}
