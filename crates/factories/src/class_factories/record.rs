use alpha_domain::Value;

use crate::error::FactoryError;
use crate::field::Field;
use crate::ports::ClassFactory;
use crate::registry::FactoryClasses;

/// Nested records.
///
/// When the source has the attribute, its value is the nested source.
/// When it does not, the source object itself is assumed to carry the
/// nested record's attributes (a flattened wire model).
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordClassFactory;

impl ClassFactory for RecordClassFactory {
    fn process(
        &self,
        obj: &Value,
        field: &Field,
        factories: &FactoryClasses,
    ) -> Result<Value, FactoryError> {
        match obj.attribute(&field.name) {
            Some(Value::None) => factories.default_for(field),
            Some(nested) => factories.build_model(&nested, &field.ty),
            None => factories.build_model(obj, &field.ty),
        }
    }
}
