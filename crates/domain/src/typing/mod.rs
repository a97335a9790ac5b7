//! Type descriptors for conversion targets.
//!
//! A [`TypeShape`] is the explicit, tagged form of an annotation. Shapes are
//! built once (by hand or by parsing a type expression through a
//! [`TypeScope`]) and then only read.

mod scope;

use std::fmt;
use std::sync::Arc;

use crate::records::RecordType;
use crate::value::{EnumLiteral, EnumValue, Value};

pub use scope::TypeScope;

#[derive(Debug, Clone, PartialEq)]
pub enum TypeShape {
    Any,
    NoneType,
    Str,
    Int,
    Float,
    Bool,
    Complex,
    Date,
    DateTime,
    Uuid,
    /// Opaque object type with no conversion rule.
    Object,
    Enum(Arc<EnumType>),
    Patch,
    Record(Arc<RecordType>),
    List(Box<TypeShape>),
    Tuple(Box<TypeShape>),
    Set(Box<TypeShape>),
    Map(Box<TypeShape>, Box<TypeShape>),
    Union(Vec<TypeShape>),
    /// Forward reference, a type expression still to be resolved.
    Named(String),
}

impl TypeShape {
    pub fn list(element: TypeShape) -> Self {
        Self::List(Box::new(element))
    }

    pub fn tuple(element: TypeShape) -> Self {
        Self::Tuple(Box::new(element))
    }

    pub fn set(element: TypeShape) -> Self {
        Self::Set(Box::new(element))
    }

    pub fn map(key: TypeShape, value: TypeShape) -> Self {
        Self::Map(Box::new(key), Box::new(value))
    }

    /// `Optional[T]`, i.e. `T | None`.
    pub fn optional(inner: TypeShape) -> Self {
        Self::Union(vec![inner, Self::NoneType])
    }

    pub fn union(members: impl IntoIterator<Item = TypeShape>) -> Self {
        Self::Union(members.into_iter().collect())
    }

    pub fn named(expression: impl Into<String>) -> Self {
        Self::Named(expression.into())
    }

    /// Element type of a list, tuple or set.
    pub fn element(&self) -> Option<&TypeShape> {
        match self {
            Self::List(inner) | Self::Tuple(inner) | Self::Set(inner) => Some(inner),
            _ => None,
        }
    }

    /// Lists, tuples, sets and mappings: what a generic alias can wrap.
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            Self::List(_) | Self::Tuple(_) | Self::Set(_) | Self::Map(_, _)
        )
    }

    pub fn is_union(&self) -> bool {
        matches!(self, Self::Union(_))
    }

    /// A union that admits `None`.
    pub fn is_optional(&self) -> bool {
        match self {
            Self::Union(members) => members.iter().any(|m| matches!(m, Self::NoneType)),
            _ => false,
        }
    }

    /// Union members other than `None`; a non-union shape is its own only member.
    pub fn informative_members(&self) -> Vec<&TypeShape> {
        match self {
            Self::Union(members) => members
                .iter()
                .filter(|m| !matches!(m, Self::NoneType))
                .collect(),
            other => vec![other],
        }
    }

    pub fn as_record(&self) -> Option<&Arc<RecordType>> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&Arc<EnumType>> {
        match self {
            Self::Enum(enum_type) => Some(enum_type),
            _ => None,
        }
    }

    /// True when no forward reference remains anywhere in the shape.
    pub fn is_resolved(&self) -> bool {
        match self {
            Self::Named(_) => false,
            Self::List(inner) | Self::Tuple(inner) | Self::Set(inner) => inner.is_resolved(),
            Self::Map(key, value) => key.is_resolved() && value.is_resolved(),
            Self::Union(members) => members.iter().all(TypeShape::is_resolved),
            _ => true,
        }
    }

    /// First forward reference found in the shape, if any.
    pub fn first_unresolved(&self) -> Option<&str> {
        match self {
            Self::Named(expression) => Some(expression),
            Self::List(inner) | Self::Tuple(inner) | Self::Set(inner) => inner.first_unresolved(),
            Self::Map(key, value) => key.first_unresolved().or_else(|| value.first_unresolved()),
            Self::Union(members) => members.iter().find_map(TypeShape::first_unresolved),
            _ => None,
        }
    }

    /// Whether `value` already has this shape.
    ///
    /// Numeric widening is allowed (`int` fits `float` and `complex`) and
    /// records accept any attribute-bearing value. Forward references accept
    /// everything because they cannot be checked before resolution.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::Any, _) | (Self::Named(_), _) => true,
            (Self::NoneType, Value::None) => true,
            (Self::Str, Value::Str(_)) => true,
            (Self::Int, Value::Int(_)) => true,
            (Self::Float, Value::Float(_) | Value::Int(_)) => true,
            (Self::Bool, Value::Bool(_)) => true,
            (Self::Complex, Value::Complex(_) | Value::Float(_) | Value::Int(_)) => true,
            (Self::Date, Value::Date(_)) => true,
            (Self::DateTime, Value::DateTime(_)) => true,
            (Self::Uuid, Value::Uuid(_)) => true,
            (Self::Object, Value::Object(_)) => true,
            (Self::Enum(enum_type), Value::Enum(member)) => member.type_name == enum_type.name(),
            (Self::Patch, Value::Patch(_)) => true,
            (Self::Record(_), value) => value.is_attribute_bearing(),
            (Self::List(inner), Value::List(items))
            | (Self::Tuple(inner), Value::Tuple(items))
            | (Self::Set(inner), Value::Set(items)) => items.iter().all(|i| inner.accepts(i)),
            (Self::Map(_, inner), Value::Map(map)) => map.values().all(|v| inner.accepts(v)),
            (Self::Union(members), value) => members.iter().any(|m| m.accepts(value)),
            _ => false,
        }
    }

    /// Like [`accepts`](Self::accepts) without numeric widening.
    pub fn is_instance(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::Float, Value::Int(_)) => false,
            (Self::Complex, Value::Int(_) | Value::Float(_)) => false,
            (Self::List(inner), Value::List(items))
            | (Self::Tuple(inner), Value::Tuple(items))
            | (Self::Set(inner), Value::Set(items)) => items.iter().all(|i| inner.is_instance(i)),
            (Self::Map(_, inner), Value::Map(map)) => map.values().all(|v| inner.is_instance(v)),
            (Self::Union(members), value) => members.iter().any(|m| m.is_instance(value)),
            _ => self.accepts(value),
        }
    }
}

impl From<&str> for TypeShape {
    fn from(expression: &str) -> Self {
        Self::Named(expression.to_string())
    }
}

impl From<Arc<RecordType>> for TypeShape {
    fn from(record: Arc<RecordType>) -> Self {
        Self::Record(record)
    }
}

impl From<Arc<EnumType>> for TypeShape {
    fn from(enum_type: Arc<EnumType>) -> Self {
        Self::Enum(enum_type)
    }
}

impl fmt::Display for TypeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("Any"),
            Self::NoneType => f.write_str("None"),
            Self::Str => f.write_str("str"),
            Self::Int => f.write_str("int"),
            Self::Float => f.write_str("float"),
            Self::Bool => f.write_str("bool"),
            Self::Complex => f.write_str("complex"),
            Self::Date => f.write_str("date"),
            Self::DateTime => f.write_str("datetime"),
            Self::Uuid => f.write_str("uuid"),
            Self::Object => f.write_str("object"),
            Self::Enum(enum_type) => f.write_str(enum_type.name()),
            Self::Patch => f.write_str("JsonPatch"),
            Self::Record(record) => f.write_str(record.name()),
            Self::List(inner) => write!(f, "list[{inner}]"),
            Self::Tuple(inner) => write!(f, "tuple[{inner}, ...]"),
            Self::Set(inner) => write!(f, "set[{inner}]"),
            Self::Map(key, value) => write!(f, "dict[{key}, {value}]"),
            Self::Union(members) => {
                let rendered: Vec<String> = members.iter().map(ToString::to_string).collect();
                f.write_str(&rendered.join(" | "))
            }
            Self::Named(expression) => write!(f, "'{expression}'"),
        }
    }
}

/// One member of an [`EnumType`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumMember {
    pub name: String,
    pub literal: EnumLiteral,
}

/// Enum declaration: a name and its members in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumType {
    name: String,
    members: Vec<EnumMember>,
}

/// Member name reserved for the "no value" sentinel.
pub const NONE_MEMBER: &str = "NONE";

impl EnumType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    /// Adds a member with an explicit literal.
    pub fn member(mut self, name: impl Into<String>, literal: impl Into<EnumLiteral>) -> Self {
        self.members.push(EnumMember {
            name: name.into(),
            literal: literal.into(),
        });
        self
    }

    /// Adds a member numbered one past the last integer literal (first is 1).
    pub fn auto(self, name: impl Into<String>) -> Self {
        let next = self
            .members
            .iter()
            .rev()
            .find_map(|m| match m.literal {
                EnumLiteral::Int(i) => Some(i + 1),
                EnumLiteral::Str(_) => None,
            })
            .unwrap_or(1);
        self.member(name, next)
    }

    pub fn build(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> &[EnumMember] {
        &self.members
    }

    fn value_of(&self, member: &EnumMember) -> EnumValue {
        EnumValue {
            type_name: self.name.clone(),
            name: member.name.clone(),
            literal: member.literal.clone(),
        }
    }

    pub fn by_name(&self, name: &str) -> Option<EnumValue> {
        self.members
            .iter()
            .find(|m| m.name == name)
            .map(|m| self.value_of(m))
    }

    pub fn by_literal(&self, literal: &EnumLiteral) -> Option<EnumValue> {
        self.members
            .iter()
            .find(|m| &m.literal == literal)
            .map(|m| self.value_of(m))
    }

    /// The `NONE` sentinel member, when the enum declares one.
    pub fn none_member(&self) -> Option<EnumValue> {
        self.by_name(NONE_MEMBER)
    }
}

impl From<i64> for EnumLiteral {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for EnumLiteral {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<&str> for EnumLiteral {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}
