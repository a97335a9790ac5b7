use alpha_domain::Value;

use crate::error::FactoryError;
use crate::field::Field;
use crate::ports::ClassFactory;
use crate::registry::FactoryClasses;

use super::source_value;

/// Mapping fields. Objects are turned into mappings by probing, in order,
/// `to_dict`, named-tuple conversion and the raw attribute dictionary.
#[derive(Debug, Clone, Copy, Default)]
pub struct DictClassFactory;

impl ClassFactory for DictClassFactory {
    fn process(
        &self,
        obj: &Value,
        field: &Field,
        factories: &FactoryClasses,
    ) -> Result<Value, FactoryError> {
        let Some(value) = source_value(obj, field) else {
            return factories.default_for(field);
        };

        if let Value::Map(_) = value {
            return Ok(value);
        }
        let mapping = match &value {
            Value::Record(record) => Some(record.to_dict()),
            Value::Object(object) => object
                .to_dict()
                .or_else(|| object.as_named_tuple())
                .or_else(|| object.attribute_dict()),
            _ => None,
        };

        mapping.map(Value::Map).ok_or_else(|| {
            FactoryError::conversion(
                &field.name,
                &field.ty,
                format!("{} cannot be converted to a mapping", value.type_name()),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::test_fixtures::{attrs, fakes, ApiObject};
    use alpha_domain::TypeShape;

    fn dict_field(name: &str) -> Field {
        Field::new(name, TypeShape::map(TypeShape::Str, TypeShape::Str)).unwrap()
    }

    fn source() -> Value {
        let name = || attrs([("name", Value::from("name"))]);
        Value::Map(attrs([
            ("obj", Value::Map(name())),
            ("string_param", Value::from("string")),
            (
                "to_dict_param",
                Value::object(ApiObject::new("ToDict").with_to_dict(name())),
            ),
            (
                "asdict_param",
                Value::object(ApiObject::new("NamedTuple").with_named_tuple(name())),
            ),
            (
                "dict_param",
                Value::object(ApiObject::new("Plain").with_attribute_dict(name())),
            ),
        ]))
    }

    fn process(name: &str) -> Result<Value, FactoryError> {
        DictClassFactory.process(&source(), &dict_field(name), &fakes::fake_factory_classes())
    }

    #[test]
    fn mappings_pass_through() {
        assert_eq!(
            process("obj").unwrap(),
            Value::Map(attrs([("name", Value::from("name"))]))
        );
    }

    #[test]
    fn objects_are_probed_in_order() {
        let expected = Value::Map(attrs([("name", Value::from("name"))]));
        assert_eq!(process("to_dict_param").unwrap(), expected);
        assert_eq!(process("asdict_param").unwrap(), expected);
        assert_eq!(process("dict_param").unwrap(), expected);
    }

    #[test]
    fn scalars_cannot_become_mappings() {
        assert_eq!(
            process("string_param").unwrap_err().kind(),
            ErrorKind::ObjectConversion
        );
    }

    #[test]
    fn missing_attribute_uses_default() {
        assert_eq!(process("absent").unwrap(), Value::from("absent"));
    }
}
