use alpha_domain::{Complex, EnumLiteral, TypeShape, Value};
use uuid::Uuid;

use crate::error::FactoryError;
use crate::ports::TypeFactory;
use crate::settings::ConversionOptions;

/// Scalar casts and pass-through for values that already fit.
///
/// Mappings are never converted blindly, opaque objects and records have no
/// conversion rule at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericTypeFactory;

/// Integral floats keep one decimal so `1.0` does not read as an int.
fn float_text(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 {
        format!("{f:.1}")
    } else {
        f.to_string()
    }
}

impl TypeFactory for GenericTypeFactory {
    fn process(
        &self,
        key: &str,
        value: &Value,
        target: &TypeShape,
        options: &ConversionOptions,
    ) -> Result<Value, FactoryError> {
        let fail = |message: String| FactoryError::conversion(key, target, message);
        let cannot = || fail(format!("cannot convert {}", value.type_name()));

        match target {
            TypeShape::Map(_, _) => Err(FactoryError::not_allowed(target)),
            TypeShape::Object | TypeShape::Record(_) | TypeShape::NoneType => {
                Err(FactoryError::not_supported(target))
            }
            TypeShape::Any | TypeShape::Named(_) => Ok(value.clone()),
            TypeShape::Str => match value {
                Value::Str(_) => Ok(value.clone()),
                Value::Enum(member) => Ok(Value::Str(member.name.clone())),
                Value::Float(f) => Ok(Value::Str(float_text(*f))),
                Value::DateTime(dt) => Ok(Value::Str(dt.to_iso_string().replacen('T', " ", 1))),
                Value::Int(_) | Value::Bool(_) | Value::Uuid(_) | Value::Date(_) | Value::Complex(_) => {
                    Ok(Value::Str(value.to_string()))
                }
                _ => Err(cannot()),
            },
            TypeShape::Int => match value {
                Value::Int(_) => Ok(value.clone()),
                Value::Bool(b) => Ok(Value::Int(i64::from(*b))),
                Value::Float(f) if f.is_finite() => {
                    let whole = f.trunc();
                    if whole >= i64::MIN as f64 && whole < i64::MAX as f64 {
                        Ok(Value::Int(whole as i64))
                    } else {
                        Err(fail(format!("{f} is out of range for int")))
                    }
                }
                Value::Str(s) => s
                    .trim()
                    .parse::<i64>()
                    .map(Value::Int)
                    .map_err(|e| fail(e.to_string())),
                Value::Enum(member) => match member.literal {
                    EnumLiteral::Int(i) => Ok(Value::Int(i)),
                    EnumLiteral::Str(_) => Err(cannot()),
                },
                _ => Err(cannot()),
            },
            TypeShape::Float => match value {
                Value::Float(_) => Ok(value.clone()),
                Value::Int(i) => Ok(Value::Float(*i as f64)),
                Value::Bool(b) => Ok(Value::Float(if *b { 1.0 } else { 0.0 })),
                Value::Str(s) => s
                    .trim()
                    .parse::<f64>()
                    .map(Value::Float)
                    .map_err(|e| fail(e.to_string())),
                _ => Err(cannot()),
            },
            TypeShape::Bool => match value {
                Value::Bool(_) => Ok(value.clone()),
                Value::Int(i) => Ok(Value::Bool(*i != 0)),
                Value::Str(s) => match s.trim().to_ascii_lowercase().as_str() {
                    "true" | "1" | "yes" => Ok(Value::Bool(true)),
                    "false" | "0" | "no" => Ok(Value::Bool(false)),
                    other => Err(fail(format!("'{other}' is not a boolean"))),
                },
                _ => Err(cannot()),
            },
            TypeShape::Complex => match value {
                Value::Complex(_) => Ok(value.clone()),
                Value::Int(i) => Ok(Value::Complex(Complex::new(*i as f64, 0.0))),
                Value::Float(f) => Ok(Value::Complex(Complex::new(*f, 0.0))),
                Value::Str(s) => s
                    .trim()
                    .parse::<f64>()
                    .map(|re| Value::Complex(Complex::new(re, 0.0)))
                    .map_err(|e| fail(e.to_string())),
                _ => Err(cannot()),
            },
            TypeShape::Uuid => match value {
                Value::Uuid(_) => Ok(value.clone()),
                Value::Str(s) => Uuid::parse_str(s.trim())
                    .map(Value::Uuid)
                    .map_err(|e| fail(e.to_string())),
                _ => Err(cannot()),
            },
            TypeShape::List(inner) | TypeShape::Tuple(inner) | TypeShape::Set(inner) => {
                let items = value.as_sequence().ok_or_else(cannot)?;
                let converted = items
                    .iter()
                    .map(|item| self.process(key, item, inner, options))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(match target {
                    TypeShape::Tuple(_) => Value::Tuple(converted),
                    TypeShape::Set(_) => Value::set(converted),
                    _ => Value::List(converted),
                })
            }
            TypeShape::Union(_) => {
                if value.is_none() && target.is_optional() {
                    return Ok(Value::None);
                }
                target
                    .informative_members()
                    .into_iter()
                    .find_map(|member| self.process(key, value, member, options).ok())
                    .ok_or_else(|| FactoryError::mixed_argument_types(key, target))
            }
            TypeShape::Date
            | TypeShape::DateTime
            | TypeShape::Enum(_)
            | TypeShape::Patch => {
                if target.accepts(value) {
                    Ok(value.clone())
                } else {
                    Err(cannot())
                }
            }
        }
    }
}
