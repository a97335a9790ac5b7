//! Factory traits.
//!
//! The registry holds trait objects, so any factory can be replaced by a
//! fake or a mock without touching the rest of the pipeline.

use alpha_domain::{TypeShape, Value};

use crate::error::FactoryError;
use crate::field::Field;
use crate::registry::FactoryClasses;
use crate::settings::ConversionOptions;

/// Coerces one raw value into one concrete target type.
#[cfg_attr(test, mockall::automock)]
pub trait TypeFactory: Send + Sync {
    /// `key` names the value being converted and is only used in errors.
    fn process(
        &self,
        key: &str,
        value: &Value,
        target: &TypeShape,
        options: &ConversionOptions,
    ) -> Result<Value, FactoryError>;
}

/// Produces the value of one field from a source object, dispatched by the
/// shape of the field type.
#[cfg_attr(test, mockall::automock)]
pub trait ClassFactory: Send + Sync {
    fn process(
        &self,
        obj: &Value,
        field: &Field,
        factories: &FactoryClasses,
    ) -> Result<Value, FactoryError>;
}

/// Produces a field value when the source supplies none.
#[cfg_attr(test, mockall::automock)]
pub trait DefaultFactory: Send + Sync {
    fn process(&self, field: &Field) -> Result<Value, FactoryError>;
}

/// Builds a whole record from a source object; the recursion root for
/// nested records.
#[cfg_attr(test, mockall::automock)]
pub trait ModelFactory: Send + Sync {
    fn process(
        &self,
        obj: &Value,
        cls: &TypeShape,
        factories: &FactoryClasses,
    ) -> Result<Value, FactoryError>;
}
