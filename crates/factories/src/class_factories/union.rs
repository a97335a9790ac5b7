use alpha_domain::{TypeShape, Value};

use crate::error::FactoryError;
use crate::field::Field;
use crate::ports::ClassFactory;
use crate::registry::{FactoryClasses, ShapeKind};

use super::is_instance;

/// Unions, including `Optional[T]`.
///
/// `None` short-circuits for optional unions. A union with one informative
/// member is handled as that member; otherwise members are tried in
/// declaration order and the first successful conversion wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnionClassFactory;

impl UnionClassFactory {
    fn try_member(
        obj: &Value,
        value: &Value,
        field: &Field,
        member: &TypeShape,
        factories: &FactoryClasses,
    ) -> Result<Value, FactoryError> {
        match member {
            TypeShape::Record(_) if value.is_attribute_bearing() => {
                factories.build_model(value, member)
            }
            TypeShape::Record(_) => Err(FactoryError::class_mismatch(&field.name, member, value)),
            _ if member.is_container() => factories.dispatch(obj, &field.narrowed(member)),
            _ => factories.convert(&field.name, value, member),
        }
    }
}

impl ClassFactory for UnionClassFactory {
    fn process(
        &self,
        obj: &Value,
        field: &Field,
        factories: &FactoryClasses,
    ) -> Result<Value, FactoryError> {
        let value = match obj.attribute(&field.name) {
            None => return factories.default_for(field),
            Some(Value::None) if field.ty.is_optional() => return Ok(Value::None),
            Some(Value::None) => return factories.default_for(field),
            Some(value) => value,
        };

        let members = field.ty.informative_members();
        if let [member] = members.as_slice() {
            let narrowed = field.narrowed(member);
            return match member {
                TypeShape::Record(_) => factories.delegate(ShapeKind::Record, obj, &narrowed),
                _ => factories.dispatch(obj, &narrowed),
            };
        }

        if is_instance(&field.ty, &value) {
            return Ok(value);
        }

        for member in &members {
            match Self::try_member(obj, &value, field, member, factories) {
                Ok(converted) => return Ok(converted),
                Err(e) => {
                    tracing::trace!(field = %field.name, member = %member, error = %e, "Union member rejected value");
                }
            }
        }
        Err(FactoryError::mixed_argument_types(&field.name, &field.ty))
    }
}
