use alpha_domain::Value;

use crate::error::FactoryError;
use crate::field::Field;
use crate::ports::ClassFactory;
use crate::registry::FactoryClasses;

use super::source_value;

/// Enum fields. An explicit `None` is handed to the enum type factory so
/// it can resolve a `NONE` member.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnumClassFactory;

impl ClassFactory for EnumClassFactory {
    fn process(
        &self,
        obj: &Value,
        field: &Field,
        factories: &FactoryClasses,
    ) -> Result<Value, FactoryError> {
        match obj.attribute(&field.name) {
            Some(value) => factories.convert(&field.name, &value, &field.ty),
            None => factories.default_for(field),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPatchClassFactory;

impl ClassFactory for JsonPatchClassFactory {
    fn process(
        &self,
        obj: &Value,
        field: &Field,
        factories: &FactoryClasses,
    ) -> Result<Value, FactoryError> {
        match source_value(obj, field) {
            Some(value) => factories.convert(&field.name, &value, &field.ty),
            None => factories.default_for(field),
        }
    }
}

/// Untyped fields: the source value as is.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyClassFactory;

impl ClassFactory for AnyClassFactory {
    fn process(
        &self,
        obj: &Value,
        field: &Field,
        factories: &FactoryClasses,
    ) -> Result<Value, FactoryError> {
        match source_value(obj, field) {
            Some(value) => Ok(value),
            None if field.is_required() => Ok(Value::None),
            None => factories.default_for(field),
        }
    }
}
