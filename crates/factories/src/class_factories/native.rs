use alpha_domain::{TypeShape, Value};

use crate::error::FactoryError;
use crate::field::Field;
use crate::ports::ClassFactory;
use crate::registry::{FactoryClasses, ShapeKind};

use super::{is_instance, source_value};

/// Builtin scalars, plus everything that reaches it with a more specific
/// shape through older registrations.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeClassFactory;

impl ClassFactory for NativeClassFactory {
    fn process(
        &self,
        obj: &Value,
        field: &Field,
        factories: &FactoryClasses,
    ) -> Result<Value, FactoryError> {
        if field.ty.is_container() {
            return factories.delegate(ShapeKind::GenericAlias, obj, field);
        }
        if field.ty.is_union() {
            return factories.delegate(ShapeKind::Union, obj, field);
        }

        let Some(value) = source_value(obj, field) else {
            return factories.default_for(field);
        };

        match &field.ty {
            TypeShape::Record(_) if is_instance(&field.ty, &value) => Ok(value),
            TypeShape::Record(_) => factories.build_model(&value, &field.ty),
            TypeShape::Patch | TypeShape::Enum(_) | TypeShape::Date | TypeShape::DateTime => {
                factories.convert(&field.name, &value, &field.ty)
            }
            TypeShape::Any => Ok(value),
            ty if is_instance(ty, &value) => Ok(value),
            ty => factories.convert(&field.name, &value, ty),
        }
    }
}
