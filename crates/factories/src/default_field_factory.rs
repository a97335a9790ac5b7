//! Default values for fields the source does not supply.

use alpha_domain::Value;

use crate::error::FactoryError;
use crate::field::Field;
use crate::ports::DefaultFactory;

/// Literal default first, then the default factory.
///
/// A literal default of `None` is a real default and is returned as is;
/// only a field with neither slot filled is an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFieldFactory;

impl DefaultFactory for DefaultFieldFactory {
    fn process(&self, field: &Field) -> Result<Value, FactoryError> {
        if let Some(default) = &field.default {
            return Ok(default.clone());
        }
        field
            .default_factory
            .as_ref()
            .map(|factory| factory.call())
            .ok_or_else(|| FactoryError::default_factory(&field.name))
    }
}
