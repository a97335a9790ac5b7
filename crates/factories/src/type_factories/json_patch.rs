use alpha_domain::{JsonPatch, PatchOp, PatchOperation, TypeShape, Value};

use crate::error::FactoryError;
use crate::ports::TypeFactory;
use crate::settings::ConversionOptions;

/// Builds a [`JsonPatch`] from a sequence of operation-like objects.
///
/// Every item needs `op` and `path` attributes; `value` is read for the ops
/// that carry one and `from` is taken when present.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonPatchTypeFactory;

fn operation(key: &str, item: &Value) -> Result<PatchOperation, FactoryError> {
    if !item.is_attribute_bearing() {
        return Err(FactoryError::attribute(format!(
            "'{key}': {} is not a patch operation",
            item.type_name()
        )));
    }
    let text = |name: &str| -> Result<String, FactoryError> {
        match item.attribute(name) {
            Some(Value::Str(s)) => Ok(s),
            _ => Err(FactoryError::attribute(format!(
                "'{key}': operation has no '{name}' attribute"
            ))),
        }
    };

    let op_name = text("op")?;
    let op: PatchOp = op_name.parse().map_err(|_| {
        FactoryError::attribute(format!("'{key}': unknown patch operation '{op_name}'"))
    })?;
    let path = text("path")?;
    let value = if op.requires_value() {
        item.attribute("value").ok_or_else(|| {
            FactoryError::attribute(format!(
                "'{key}': '{op_name}' operation has no 'value' attribute"
            ))
        })?
    } else {
        Value::None
    };

    let operation = PatchOperation::new(op, path, value);
    Ok(match item.attribute("from") {
        Some(Value::Str(from)) => operation.with_from(from),
        _ => operation,
    })
}

impl TypeFactory for JsonPatchTypeFactory {
    fn process(
        &self,
        key: &str,
        value: &Value,
        _target: &TypeShape,
        options: &ConversionOptions,
    ) -> Result<Value, FactoryError> {
        let mut patch = match value {
            Value::Patch(patch) => patch.clone(),
            _ => {
                let items = value.as_sequence().ok_or_else(|| {
                    FactoryError::attribute(format!(
                        "'{key}': {} is not iterable",
                        value.type_name()
                    ))
                })?;
                if items.is_empty() {
                    return Err(FactoryError::attribute(format!(
                        "'{key}': a patch needs at least one operation"
                    )));
                }
                let operations = items
                    .iter()
                    .map(|item| operation(key, item))
                    .collect::<Result<Vec<_>, _>>()?;
                JsonPatch::new(operations)
            }
        };

        if options.normalize_patch_dates {
            patch.normalize_dates();
        }
        Ok(Value::Patch(patch))
    }
}
