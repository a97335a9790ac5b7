//! Schema-validated record convention.
//!
//! Properties are keyed by name and usually declare their type as an
//! expression string (`"list[Address] | None"`). Requiredness lives in a
//! separate set; an optional property without an explicit default defaults
//! to `None`. Supplied values are checked against the property type when
//! the type can be resolved.

use std::collections::BTreeSet;
use std::sync::Arc;

use super::{reject_leftovers, DefaultFn, Property, RecordLayout, RecordType};
use crate::error::DomainError;
use crate::typing::{TypeScope, TypeShape};
use crate::value::{Attributes, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct SchemaProperty {
    pub ty: TypeShape,
    pub default: Option<Value>,
    pub default_factory: Option<DefaultFn>,
}

#[derive(Debug, Clone, Default)]
pub struct SchemaLayout {
    properties: Vec<(String, SchemaProperty)>,
    required: BTreeSet<String>,
    scope: Option<TypeScope>,
}

impl SchemaLayout {
    pub fn properties(&self) -> impl Iterator<Item = (&str, &SchemaProperty)> {
        self.properties
            .iter()
            .map(|(name, property)| (name.as_str(), property))
    }

    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(|(name, _)| name.as_str())
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.contains(name)
    }

    /// Scope the property type expressions resolve against, if one was set.
    pub fn scope(&self) -> Option<&TypeScope> {
        self.scope.as_ref()
    }

    fn check(
        &self,
        record: &str,
        name: &str,
        ty: &TypeShape,
        value: &Value,
    ) -> Result<(), DomainError> {
        let resolved = if ty.is_resolved() {
            Some(ty.clone())
        } else {
            self.scope.clone().unwrap_or_default().resolve(ty).ok()
        };
        match resolved {
            Some(shape) if !shape.accepts(value) => Err(DomainError::validation(format!(
                "{record}.{name} expects {shape}, got {}",
                value.type_name()
            ))),
            _ => Ok(()),
        }
    }

    pub(crate) fn construct(
        &self,
        record: &str,
        mut values: Attributes,
    ) -> Result<Vec<(String, Value)>, DomainError> {
        let mut out = Vec::with_capacity(self.properties.len());
        for (name, property) in &self.properties {
            let value = match values.remove(name) {
                Some(value) => {
                    self.check(record, name, &property.ty, &value)?;
                    value
                }
                None if self.is_required(name) => {
                    return Err(DomainError::missing_field(record, name));
                }
                None => property
                    .default
                    .clone()
                    .or_else(|| property.default_factory.as_ref().map(DefaultFn::call))
                    .unwrap_or(Value::None),
            };
            out.push((name.clone(), value));
        }
        reject_leftovers(record, values)?;
        Ok(out)
    }
}

#[derive(Debug)]
pub struct SchemaRecordBuilder {
    name: String,
    layout: SchemaLayout,
    properties: Vec<Property>,
}

impl SchemaRecordBuilder {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            layout: SchemaLayout::default(),
            properties: Vec::new(),
        }
    }

    fn push(mut self, name: impl Into<String>, property: SchemaProperty, required: bool) -> Self {
        let name = name.into();
        if required {
            self.layout.required.insert(name.clone());
        }
        self.layout.properties.push((name, property));
        self
    }

    pub fn required(self, name: impl Into<String>, ty: impl Into<TypeShape>) -> Self {
        let property = SchemaProperty {
            ty: ty.into(),
            default: None,
            default_factory: None,
        };
        self.push(name, property, true)
    }

    /// Optional property defaulting to `None`.
    pub fn optional(self, name: impl Into<String>, ty: impl Into<TypeShape>) -> Self {
        let property = SchemaProperty {
            ty: ty.into(),
            default: Some(Value::None),
            default_factory: None,
        };
        self.push(name, property, false)
    }

    pub fn with_default(
        self,
        name: impl Into<String>,
        ty: impl Into<TypeShape>,
        value: impl Into<Value>,
    ) -> Self {
        let property = SchemaProperty {
            ty: ty.into(),
            default: Some(value.into()),
            default_factory: None,
        };
        self.push(name, property, false)
    }

    pub fn with_factory(
        self,
        name: impl Into<String>,
        ty: impl Into<TypeShape>,
        f: impl Fn() -> Value + Send + Sync + 'static,
    ) -> Self {
        let property = SchemaProperty {
            ty: ty.into(),
            default: None,
            default_factory: Some(DefaultFn::new(f)),
        };
        self.push(name, property, false)
    }

    /// Scope used to resolve property types for validation.
    pub fn scope(mut self, scope: TypeScope) -> Self {
        self.layout.scope = Some(scope);
        self
    }

    pub fn property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    pub fn build(self) -> Arc<RecordType> {
        RecordType::from_parts(self.name, RecordLayout::Schema(self.layout), self.properties)
    }
}
