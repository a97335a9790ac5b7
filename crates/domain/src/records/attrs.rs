//! Builder-pattern (attrs-like) record convention.
//!
//! Attributes carry a single default slot. Private attributes (leading
//! underscore) are stored under their own name but initialised through a
//! public alias with the underscore stripped.

use std::sync::Arc;

use super::{reject_leftovers, DefaultFn, Property, RecordLayout, RecordType};
use crate::error::DomainError;
use crate::typing::TypeShape;
use crate::value::{Attributes, Value};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum AttrsDefault {
    #[default]
    Nothing,
    Value(Value),
    Factory(DefaultFn),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub ty: TypeShape,
    pub default: AttrsDefault,
    pub init: bool,
    pub alias: Option<String>,
}

impl Attribute {
    pub fn new(name: impl Into<String>, ty: impl Into<TypeShape>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            default: AttrsDefault::Nothing,
            init: true,
            alias: None,
        }
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = AttrsDefault::Value(value.into());
        self
    }

    pub fn with_factory(mut self, f: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        self.default = AttrsDefault::Factory(DefaultFn::new(f));
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn no_init(mut self) -> Self {
        self.init = false;
        self
    }

    /// Keyword used at construction time.
    pub fn init_name(&self) -> &str {
        self.alias
            .as_deref()
            .unwrap_or_else(|| self.name.trim_start_matches('_'))
    }

    fn produce_default(&self) -> Option<Value> {
        match &self.default {
            AttrsDefault::Nothing => None,
            AttrsDefault::Value(value) => Some(value.clone()),
            AttrsDefault::Factory(factory) => Some(factory.call()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AttrsLayout {
    attributes: Vec<Attribute>,
}

impl AttrsLayout {
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub(crate) fn construct(
        &self,
        record: &str,
        mut values: Attributes,
    ) -> Result<Vec<(String, Value)>, DomainError> {
        let mut out = Vec::with_capacity(self.attributes.len());
        for attribute in &self.attributes {
            let supplied = if attribute.init {
                values.remove(attribute.init_name())
            } else {
                None
            };
            let value = match supplied.or_else(|| attribute.produce_default()) {
                Some(value) => value,
                None if attribute.init => {
                    return Err(DomainError::missing_field(record, attribute.init_name()));
                }
                None => Value::None,
            };
            out.push((attribute.name.clone(), value));
        }
        reject_leftovers(record, values)?;
        Ok(out)
    }
}

#[derive(Debug)]
pub struct AttrsRecordBuilder {
    name: String,
    layout: AttrsLayout,
    properties: Vec<Property>,
}

impl AttrsRecordBuilder {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            layout: AttrsLayout::default(),
            properties: Vec::new(),
        }
    }

    pub fn attribute(mut self, attribute: Attribute) -> Self {
        self.layout.attributes.push(attribute);
        self
    }

    pub fn property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    pub fn build(self) -> Arc<RecordType> {
        RecordType::from_parts(self.name, RecordLayout::Attrs(self.layout), self.properties)
    }
}
