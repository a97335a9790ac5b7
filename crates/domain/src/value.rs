//! Dynamic values exchanged between wire models and domain records.
//!
//! A [`Value`] is what the conversion engine reads from a source object and
//! what it hands to a record constructor. Source objects that are not plain
//! data (generated API models, ORM rows, anything with computed members)
//! enter as [`Value::Object`] behind the [`Object`] trait.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

use crate::common::DateTimeValue;
use crate::patch::JsonPatch;
use crate::records::Record;

/// Keyword values keyed by attribute name.
pub type Attributes = BTreeMap<String, Value>;

/// Complex number, kept only so `complex` annotations have a value to land in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.im < 0.0 {
            write!(f, "({}-{}j)", self.re, -self.im)
        } else {
            write!(f, "({}+{}j)", self.re, self.im)
        }
    }
}

/// The underlying value of an enum member.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnumLiteral {
    Int(i64),
    Str(String),
}

impl fmt::Display for EnumLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

/// A resolved member of a specific enum type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumValue {
    pub type_name: String,
    pub name: String,
    pub literal: EnumLiteral,
}

/// Duck-typed source object.
///
/// Only [`Object::attribute`] is mandatory. The remaining methods are
/// optional capabilities that the dict conversion probes in order.
pub trait Object: fmt::Debug + Send + Sync {
    fn type_name(&self) -> &str;

    /// Reads an attribute; `None` means the object does not have it.
    fn attribute(&self, name: &str) -> Option<Value>;

    /// Explicit mapping conversion (`to_dict` on generated API models).
    fn to_dict(&self) -> Option<Attributes> {
        None
    }

    /// Tuple-style conversion (`_asdict` on named tuples).
    fn as_named_tuple(&self) -> Option<Attributes> {
        None
    }

    /// Raw attribute dictionary of the instance.
    fn attribute_dict(&self) -> Option<Attributes> {
        None
    }
}

#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Complex(Complex),
    Str(String),
    Date(NaiveDate),
    DateTime(DateTimeValue),
    Uuid(Uuid),
    Enum(EnumValue),
    List(Vec<Value>),
    Tuple(Vec<Value>),
    /// Insertion ordered, deduplicated on construction through [`Value::set`].
    Set(Vec<Value>),
    Map(Attributes),
    Record(Record),
    Patch(JsonPatch),
    Object(Arc<dyn Object>),
}

impl Value {
    /// Builds a set, dropping duplicates while keeping first-seen order.
    pub fn set(items: impl IntoIterator<Item = Value>) -> Self {
        let mut unique: Vec<Value> = Vec::new();
        for item in items {
            if !unique.contains(&item) {
                unique.push(item);
            }
        }
        Self::Set(unique)
    }

    pub fn object(object: impl Object + 'static) -> Self {
        Self::Object(Arc::new(object))
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Short name of the runtime shape, used in error messages.
    pub fn type_name(&self) -> &str {
        match self {
            Self::None => "None",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Complex(_) => "complex",
            Self::Str(_) => "str",
            Self::Date(_) => "date",
            Self::DateTime(_) => "datetime",
            Self::Uuid(_) => "uuid",
            Self::Enum(e) => &e.type_name,
            Self::List(_) => "list",
            Self::Tuple(_) => "tuple",
            Self::Set(_) => "set",
            Self::Map(_) => "dict",
            Self::Record(r) => r.type_name(),
            Self::Patch(_) => "JsonPatch",
            Self::Object(o) => o.type_name(),
        }
    }

    /// Whether attribute lookup is meaningful for this value.
    pub fn is_attribute_bearing(&self) -> bool {
        matches!(self, Self::Record(_) | Self::Object(_) | Self::Map(_))
    }

    /// Reads a same-named attribute from a record, object or mapping.
    pub fn attribute(&self, name: &str) -> Option<Value> {
        match self {
            Self::Record(record) => record.get(name),
            Self::Object(object) => object.attribute(name),
            Self::Map(map) => map.get(name).cloned(),
            _ => None,
        }
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        match self {
            Self::Record(record) => record.has(name),
            Self::Map(map) => map.contains_key(name),
            Self::Object(object) => object.attribute(name).is_some(),
            _ => false,
        }
    }

    /// Elements of a list, tuple or set.
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) | Self::Tuple(items) | Self::Set(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    /// JSON rendering. Enums render as their member name, records as
    /// their fields (computed properties are left out).
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;

        match self {
            Self::None => Json::Null,
            Self::Bool(b) => Json::Bool(*b),
            Self::Int(i) => Json::from(*i),
            Self::Float(f) => serde_json::Number::from_f64(*f)
                .map(Json::Number)
                .unwrap_or(Json::Null),
            Self::Complex(c) => serde_json::json!({ "real": c.re, "imag": c.im }),
            Self::Str(s) => Json::String(s.clone()),
            Self::Date(d) => Json::String(d.format("%Y-%m-%d").to_string()),
            Self::DateTime(dt) => Json::String(dt.to_iso_string()),
            Self::Uuid(u) => Json::String(u.to_string()),
            Self::Enum(e) => Json::String(e.name.clone()),
            Self::List(items) | Self::Tuple(items) | Self::Set(items) => {
                Json::Array(items.iter().map(Value::to_json).collect())
            }
            Self::Map(map) => map_to_json(map),
            Self::Record(record) => record.to_json(),
            Self::Patch(patch) => patch.to_json(),
            Self::Object(object) => object
                .to_dict()
                .or_else(|| object.attribute_dict())
                .map(|map| map_to_json(&map))
                .unwrap_or(Json::Null),
        }
    }

    /// Lifts JSON into the value model. Objects become [`Value::Map`].
    pub fn from_json(json: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match json {
            Json::Null => Self::None,
            Json::Bool(b) => Self::Bool(b),
            Json::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Json::String(s) => Self::Str(s),
            Json::Array(items) => Self::List(items.into_iter().map(Self::from_json).collect()),
            Json::Object(map) => Self::Map(
                map.into_iter()
                    .map(|(k, v)| (k, Self::from_json(v)))
                    .collect(),
            ),
        }
    }
}

fn map_to_json(map: &Attributes) -> serde_json::Value {
    serde_json::Value::Object(
        map.iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect(),
    )
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::None, Self::None) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Complex(a), Self::Complex(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Date(a), Self::Date(b)) => a == b,
            (Self::DateTime(a), Self::DateTime(b)) => a == b,
            (Self::Uuid(a), Self::Uuid(b)) => a == b,
            (Self::Enum(a), Self::Enum(b)) => a == b,
            (Self::List(a), Self::List(b)) | (Self::Tuple(a), Self::Tuple(b)) => a == b,
            (Self::Set(a), Self::Set(b)) => {
                a.len() == b.len() && a.iter().all(|item| b.contains(item))
            }
            (Self::Map(a), Self::Map(b)) => a == b,
            (Self::Record(a), Self::Record(b)) => a == b,
            (Self::Patch(a), Self::Patch(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Self::from_json)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Complex(c) => write!(f, "{c}"),
            Self::Str(s) => write!(f, "{s:?}"),
            Self::Date(d) => write!(f, "{d}"),
            Self::DateTime(dt) => write!(f, "{dt}"),
            Self::Uuid(u) => write!(f, "{u}"),
            Self::Enum(e) => write!(f, "{}.{}", e.type_name, e.name),
            Self::Record(r) => write!(f, "{}(..)", r.type_name()),
            Self::Object(o) => write!(f, "<{}>", o.type_name()),
            other => write!(f, "{}", other.to_json()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Self::Date(d)
    }
}

impl From<DateTimeValue> for Value {
    fn from(dt: DateTimeValue) -> Self {
        Self::DateTime(dt)
    }
}

impl From<Uuid> for Value {
    fn from(u: Uuid) -> Self {
        Self::Uuid(u)
    }
}

impl From<EnumValue> for Value {
    fn from(e: EnumValue) -> Self {
        Self::Enum(e)
    }
}

impl From<Record> for Value {
    fn from(r: Record) -> Self {
        Self::Record(r)
    }
}

impl From<JsonPatch> for Value {
    fn from(p: JsonPatch) -> Self {
        Self::Patch(p)
    }
}

impl From<Attributes> for Value {
    fn from(map: Attributes) -> Self {
        Self::Map(map)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Self::None)
    }
}
