//! Class factories: one per shape category of a field type.
//!
//! Each factory reads the same-named attribute from the source object and
//! produces the field value, delegating to the registry for nested records,
//! scalar conversion and defaults.

mod dict;
mod generic_alias;
mod iterable;
mod native;
mod record;
mod simple;
mod union;

pub use dict::DictClassFactory;
pub use generic_alias::GenericAliasClassFactory;
pub use iterable::IterableClassFactory;
pub use native::NativeClassFactory;
pub use record::RecordClassFactory;
pub use simple::{AnyClassFactory, EnumClassFactory, JsonPatchClassFactory};
pub use union::UnionClassFactory;

use alpha_domain::{TypeShape, Value};

use crate::field::Field;

/// The field's attribute on `obj`, with an explicit `None` treated as absent.
pub(crate) fn source_value(obj: &Value, field: &Field) -> Option<Value> {
    obj.attribute(&field.name).filter(|value| !value.is_none())
}

/// Whether `value` is already an instance of `shape`, without widening.
pub(crate) fn is_instance(shape: &TypeShape, value: &Value) -> bool {
    match (shape, value) {
        (TypeShape::Any, _) => true,
        (TypeShape::NoneType, Value::None)
        | (TypeShape::Str, Value::Str(_))
        | (TypeShape::Int, Value::Int(_))
        | (TypeShape::Float, Value::Float(_))
        | (TypeShape::Bool, Value::Bool(_))
        | (TypeShape::Complex, Value::Complex(_))
        | (TypeShape::Date, Value::Date(_))
        | (TypeShape::DateTime, Value::DateTime(_))
        | (TypeShape::Uuid, Value::Uuid(_))
        | (TypeShape::Object, Value::Object(_))
        | (TypeShape::Patch, Value::Patch(_)) => true,
        (TypeShape::Enum(enum_type), Value::Enum(member)) => member.type_name == enum_type.name(),
        (TypeShape::Record(record), Value::Record(instance)) => {
            instance.type_name() == record.name()
        }
        (TypeShape::List(inner), Value::List(items))
        | (TypeShape::Tuple(inner), Value::Tuple(items))
        | (TypeShape::Set(inner), Value::Set(items)) => {
            items.iter().all(|item| is_instance(inner, item))
        }
        (TypeShape::Map(_, inner), Value::Map(map)) => {
            map.values().all(|item| is_instance(inner, item))
        }
        (TypeShape::Union(members), value) => members.iter().any(|m| is_instance(m, value)),
        _ => false,
    }
}
