use alpha_domain::{TypeShape, Value};

use crate::error::FactoryError;
use crate::field::Field;
use crate::ports::ClassFactory;
use crate::registry::{FactoryClasses, ShapeKind};

/// Parameterised containers: sequences go to the iterable factory,
/// mappings to the dict factory.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericAliasClassFactory;

impl ClassFactory for GenericAliasClassFactory {
    fn process(
        &self,
        obj: &Value,
        field: &Field,
        factories: &FactoryClasses,
    ) -> Result<Value, FactoryError> {
        match &field.ty {
            TypeShape::List(element) | TypeShape::Tuple(element) | TypeShape::Set(element) => {
                if element.informative_members().len() > 1 {
                    return Err(FactoryError::mixed_argument_types(&field.name, &field.ty));
                }
                factories.delegate(ShapeKind::Iterable, obj, field)
            }
            TypeShape::Map(_, _) => factories.delegate(ShapeKind::Dict, obj, field),
            other => Err(FactoryError::typing_factory(&field.name, other)),
        }
    }
}
