use alpha_domain::{EnumLiteral, TypeShape, Value};

use crate::error::FactoryError;
use crate::ports::TypeFactory;
use crate::settings::ConversionOptions;

/// Resolves enum members by member, name or literal, in that order.
///
/// `None` maps to the enum's `NONE` member when it declares one.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnumTypeFactory;

impl TypeFactory for EnumTypeFactory {
    fn process(
        &self,
        key: &str,
        value: &Value,
        target: &TypeShape,
        _options: &ConversionOptions,
    ) -> Result<Value, FactoryError> {
        let enum_type = target
            .as_enum()
            .ok_or_else(|| FactoryError::attribute(format!("{target} is not an enum")))?;

        let member = match value {
            Value::None => return Ok(enum_type.none_member().map_or(Value::None, Value::Enum)),
            Value::Enum(member) if member.type_name == enum_type.name() => Some(member.clone()),
            Value::Enum(member) => enum_type.by_name(&member.name),
            Value::Str(text) => enum_type
                .by_name(text)
                .or_else(|| enum_type.by_literal(&EnumLiteral::Str(text.clone()))),
            Value::Int(i) => enum_type.by_literal(&EnumLiteral::Int(*i)),
            _ => None,
        };

        member.map(Value::Enum).ok_or_else(|| {
            FactoryError::attribute(format!(
                "'{key}': {} has no member {value}",
                enum_type.name()
            ))
        })
    }
}
