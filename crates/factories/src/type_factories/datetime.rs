use alpha_domain::{parse_iso8601, DateTimeValue, TypeShape, Value};

use crate::error::FactoryError;
use crate::ports::TypeFactory;
use crate::settings::ConversionOptions;

/// Dates and timestamps from ISO-8601 text or from each other.
///
/// With `day_first` set, the parsed day and month are swapped whenever the
/// swap still forms a valid date.
#[derive(Debug, Clone, Copy, Default)]
pub struct DatetimeTypeFactory;

impl DatetimeTypeFactory {
    fn parse(
        key: &str,
        text: &str,
        target: &TypeShape,
        options: &ConversionOptions,
    ) -> Result<DateTimeValue, FactoryError> {
        let parsed = parse_iso8601(text.trim())
            .map_err(|e| FactoryError::conversion(key, target, format!("'{text}': {e}")))?;
        if options.day_first {
            return Ok(parsed.swap_day_month().unwrap_or(parsed));
        }
        Ok(parsed)
    }
}

impl TypeFactory for DatetimeTypeFactory {
    fn process(
        &self,
        key: &str,
        value: &Value,
        target: &TypeShape,
        options: &ConversionOptions,
    ) -> Result<Value, FactoryError> {
        let as_date = match target {
            TypeShape::Date => true,
            TypeShape::DateTime => false,
            _ => return Ok(value.clone()),
        };

        let timestamp = match value {
            Value::DateTime(dt) => *dt,
            Value::Date(date) => DateTimeValue::from_date(*date),
            Value::Str(text) => Self::parse(key, text, target, options)?,
            other => {
                return Err(FactoryError::conversion(
                    key,
                    target,
                    format!("cannot convert {}", other.type_name()),
                ))
            }
        };

        Ok(if as_date {
            Value::Date(timestamp.date())
        } else {
            Value::DateTime(timestamp)
        })
    }
}
