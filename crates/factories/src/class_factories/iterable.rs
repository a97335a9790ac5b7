use alpha_domain::{TypeShape, Value};

use crate::error::FactoryError;
use crate::field::Field;
use crate::ports::ClassFactory;
use crate::registry::FactoryClasses;

use super::source_value;

/// Lists, tuples and sets: element-wise conversion, same container kind out.
#[derive(Debug, Clone, Copy, Default)]
pub struct IterableClassFactory;

/// The sequence type of `field`, looking through `Optional[...]`.
fn container(field: &Field) -> Result<&TypeShape, FactoryError> {
    let members = field.ty.informative_members();
    match members.as_slice() {
        [shape] if shape.element().is_some() => Ok(*shape),
        _ => Err(FactoryError::typing_factory(&field.name, &field.ty)),
    }
}

fn convert_element(
    key: &str,
    item: &Value,
    element: &TypeShape,
    factories: &FactoryClasses,
) -> Result<Value, FactoryError> {
    if item.is_none() && (element.is_optional() || matches!(element, TypeShape::NoneType)) {
        return Ok(Value::None);
    }
    let element = element.informative_members()[0];
    match element {
        TypeShape::Record(_) => factories.build_model(item, element),
        TypeShape::Enum(_) | TypeShape::Date | TypeShape::DateTime | TypeShape::Patch => {
            factories.convert(key, item, element)
        }
        TypeShape::Any => Ok(item.clone()),
        _ if element.is_instance(item) && !element.is_container() => Ok(item.clone()),
        _ => factories.convert(key, item, element),
    }
}

impl ClassFactory for IterableClassFactory {
    fn process(
        &self,
        obj: &Value,
        field: &Field,
        factories: &FactoryClasses,
    ) -> Result<Value, FactoryError> {
        let shape = container(field)?;
        let element = shape
            .element()
            .ok_or_else(|| FactoryError::typing_factory(&field.name, &field.ty))?;
        if element.informative_members().len() != 1 {
            return Err(FactoryError::typing_factory(&field.name, &field.ty));
        }

        let Some(value) = source_value(obj, field) else {
            return factories.default_for(field);
        };

        let single;
        let items: &[Value] = match value.as_sequence() {
            Some(items) => items,
            None if value.is_attribute_bearing() => {
                single = [value.clone()];
                &single
            }
            None => return Err(FactoryError::class_mismatch(&field.name, shape, &value)),
        };

        let converted = items
            .iter()
            .map(|item| convert_element(&field.name, item, element, factories))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(match shape {
            TypeShape::Tuple(_) => Value::Tuple(converted),
            TypeShape::Set(_) => Value::set(converted),
            _ => Value::List(converted),
        })
    }
}
