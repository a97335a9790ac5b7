//! JSON-patch style mutation documents.
//!
//! A [`JsonPatch`] is an ordered list of operations addressed by JSON
//! pointers. Documents are [`Value`] trees made of maps, lists and records.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::try_parse_iso8601;
use crate::error::DomainError;
use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchOp {
    Add,
    Remove,
    Replace,
    Move,
    Copy,
    Test,
}

impl PatchOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
            Self::Replace => "replace",
            Self::Move => "move",
            Self::Copy => "copy",
            Self::Test => "test",
        }
    }

    /// Operations that carry a `value` member.
    pub fn requires_value(&self) -> bool {
        matches!(self, Self::Add | Self::Replace | Self::Test)
    }

    /// Operations that carry a `from` member.
    pub fn requires_from(&self) -> bool {
        matches!(self, Self::Move | Self::Copy)
    }
}

impl fmt::Display for PatchOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PatchOp {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(Self::Add),
            "remove" => Ok(Self::Remove),
            "replace" => Ok(Self::Replace),
            "move" => Ok(Self::Move),
            "copy" => Ok(Self::Copy),
            "test" => Ok(Self::Test),
            other => Err(DomainError::parse(format!("Unknown patch op: {other}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PatchOperation {
    pub op: PatchOp,
    pub path: String,
    pub from: Option<String>,
    pub value: Value,
}

impl PatchOperation {
    pub fn new(op: PatchOp, path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            op,
            path: path.into(),
            from: None,
            value: value.into(),
        }
    }

    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    pub fn to_json(&self) -> serde_json::Value {
        let mut out = serde_json::Map::new();
        out.insert("op".into(), self.op.as_str().into());
        out.insert("path".into(), self.path.clone().into());
        if let Some(from) = &self.from {
            out.insert("from".into(), from.clone().into());
        }
        if self.op.requires_value() {
            out.insert("value".into(), self.value.to_json());
        }
        serde_json::Value::Object(out)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct JsonPatch {
    operations: Vec<PatchOperation>,
}

impl JsonPatch {
    pub fn new(operations: Vec<PatchOperation>) -> Self {
        Self { operations }
    }

    pub fn operations(&self) -> &[PatchOperation] {
        &self.operations
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PatchOperation> {
        self.operations.iter()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Replaces string values that parse as ISO-8601 with datetimes.
    /// Strings that do not parse are left untouched.
    pub fn normalize_dates(&mut self) {
        for operation in &mut self.operations {
            if let Value::Str(s) = &operation.value {
                if let Some(dt) = try_parse_iso8601(s) {
                    operation.value = Value::DateTime(dt);
                }
            }
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(self.operations.iter().map(PatchOperation::to_json).collect())
    }

    /// Reads a patch from its JSON array form.
    pub fn from_json(json: &serde_json::Value) -> Result<Self, DomainError> {
        let items = json
            .as_array()
            .ok_or_else(|| DomainError::parse("A patch must be a JSON array"))?;
        let mut operations = Vec::with_capacity(items.len());
        for item in items {
            let field = |name: &str| item.get(name).and_then(serde_json::Value::as_str);
            let op: PatchOp = field("op")
                .ok_or_else(|| DomainError::parse("Patch operation without 'op'"))?
                .parse()?;
            let path = field("path")
                .ok_or_else(|| DomainError::parse("Patch operation without 'path'"))?;
            let mut operation = PatchOperation::new(
                op,
                path,
                item.get("value").cloned().map(Value::from_json).unwrap_or_default(),
            );
            operation.from = field("from").map(str::to_string);
            operations.push(operation);
        }
        Ok(Self::new(operations))
    }

    /// Applies every operation in order to a copy of `document`.
    pub fn apply(&self, document: &Value) -> Result<Value, DomainError> {
        let mut doc = document.clone();
        for operation in &self.operations {
            let path = parse_pointer(&operation.path)?;
            match operation.op {
                PatchOp::Add => add(&mut doc, &path, operation.value.clone())?,
                PatchOp::Remove => {
                    remove(&mut doc, &path)?;
                }
                PatchOp::Replace => {
                    let target = resolve_mut(&mut doc, &path)?;
                    *target = operation.value.clone();
                }
                PatchOp::Move | PatchOp::Copy => {
                    let from = operation.from.as_deref().ok_or_else(|| {
                        DomainError::patch(format!("'{}' needs a 'from' pointer", operation.op))
                    })?;
                    let from = parse_pointer(from)?;
                    let value = if operation.op == PatchOp::Move {
                        remove(&mut doc, &from)?
                    } else {
                        resolve_mut(&mut doc, &from)?.clone()
                    };
                    add(&mut doc, &path, value)?;
                }
                PatchOp::Test => {
                    let current = resolve_mut(&mut doc, &path)?;
                    if *current != operation.value {
                        return Err(DomainError::patch(format!(
                            "Test failed at '{}'",
                            operation.path
                        )));
                    }
                }
            }
        }
        Ok(doc)
    }
}

impl<'a> IntoIterator for &'a JsonPatch {
    type Item = &'a PatchOperation;
    type IntoIter = std::slice::Iter<'a, PatchOperation>;

    fn into_iter(self) -> Self::IntoIter {
        self.operations.iter()
    }
}

fn parse_pointer(pointer: &str) -> Result<Vec<String>, DomainError> {
    if pointer.is_empty() {
        return Ok(Vec::new());
    }
    let rest = pointer
        .strip_prefix('/')
        .ok_or_else(|| DomainError::parse(format!("Pointer '{pointer}' must start with '/'")))?;
    Ok(rest
        .split('/')
        .map(|token| token.replace("~1", "/").replace("~0", "~"))
        .collect())
}

fn list_index(token: &str, len: usize, allow_end: bool) -> Result<usize, DomainError> {
    let index = if token == "-" && allow_end {
        len
    } else {
        token
            .parse::<usize>()
            .map_err(|_| DomainError::patch(format!("'{token}' is not a list index")))?
    };
    let bound = if allow_end { len } else { len.saturating_sub(1) };
    if index > bound || (!allow_end && len == 0) {
        return Err(DomainError::patch(format!("Index {index} out of range")));
    }
    Ok(index)
}

fn child_mut<'a>(node: &'a mut Value, token: &str) -> Result<&'a mut Value, DomainError> {
    let missing = || DomainError::patch(format!("Path segment '{token}' does not exist"));
    match node {
        Value::Map(map) => map.get_mut(token).ok_or_else(missing),
        Value::Record(record) => record.field_mut(token).ok_or_else(missing),
        Value::List(items) | Value::Tuple(items) => {
            let index = list_index(token, items.len(), false)?;
            Ok(&mut items[index])
        }
        other => Err(DomainError::patch(format!(
            "Cannot descend into {} at '{token}'",
            other.type_name()
        ))),
    }
}

fn resolve_mut<'a>(doc: &'a mut Value, path: &[String]) -> Result<&'a mut Value, DomainError> {
    path.iter()
        .try_fold(doc, |node, token| child_mut(node, token))
}

fn split_last(path: &[String]) -> Result<(&[String], &str), DomainError> {
    match path.split_last() {
        Some((last, parent)) => Ok((parent, last.as_str())),
        None => Err(DomainError::patch("Operation needs a non-root path")),
    }
}

fn add(doc: &mut Value, path: &[String], value: Value) -> Result<(), DomainError> {
    if path.is_empty() {
        *doc = value;
        return Ok(());
    }
    let (parent, last) = split_last(path)?;
    match resolve_mut(doc, parent)? {
        Value::Map(map) => {
            map.insert(last.to_string(), value);
        }
        Value::Record(record) => {
            let slot = record.field_mut(last).ok_or_else(|| {
                DomainError::patch(format!("Record has no field '{last}'"))
            })?;
            *slot = value;
        }
        Value::List(items) => {
            let index = list_index(last, items.len(), true)?;
            items.insert(index, value);
        }
        other => {
            return Err(DomainError::patch(format!(
                "Cannot add to {} at '{last}'",
                other.type_name()
            )))
        }
    }
    Ok(())
}

fn remove(doc: &mut Value, path: &[String]) -> Result<Value, DomainError> {
    let (parent, last) = split_last(path)?;
    match resolve_mut(doc, parent)? {
        Value::Map(map) => map
            .remove(last)
            .ok_or_else(|| DomainError::patch(format!("Key '{last}' does not exist"))),
        Value::List(items) => {
            let index = list_index(last, items.len(), false)?;
            Ok(items.remove(index))
        }
        other => Err(DomainError::patch(format!(
            "Cannot remove from {} at '{last}'",
            other.type_name()
        ))),
    }
}
