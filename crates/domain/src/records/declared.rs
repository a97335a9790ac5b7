//! Declared (dataclass-like) record convention.

use std::sync::Arc;

use super::{reject_leftovers, DefaultFn, Property, RecordLayout, RecordType};
use crate::error::DomainError;
use crate::typing::TypeShape;
use crate::value::{Attributes, Value};

/// One declared field.
///
/// `default` and `default_factory` are independent slots; a field with
/// neither is required. A field with `init == false` is never passed to
/// the constructor and is filled from its default.
#[derive(Debug, Clone, PartialEq)]
pub struct DeclaredField {
    pub name: String,
    pub ty: TypeShape,
    pub default: Option<Value>,
    pub default_factory: Option<DefaultFn>,
    pub init: bool,
}

impl DeclaredField {
    pub fn new(name: impl Into<String>, ty: impl Into<TypeShape>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            default: None,
            default_factory: None,
            init: true,
        }
    }

    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn default_factory(mut self, f: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        self.default_factory = Some(DefaultFn::new(f));
        self
    }

    /// Marks the field as computed: not accepted by the constructor.
    pub fn no_init(mut self) -> Self {
        self.init = false;
        self
    }

    fn produce_default(&self) -> Option<Value> {
        self.default
            .clone()
            .or_else(|| self.default_factory.as_ref().map(DefaultFn::call))
    }
}

#[derive(Debug, Clone, Default)]
pub struct DeclaredLayout {
    fields: Vec<DeclaredField>,
}

impl DeclaredLayout {
    pub fn fields(&self) -> &[DeclaredField] {
        &self.fields
    }

    pub(crate) fn construct(
        &self,
        record: &str,
        mut values: Attributes,
    ) -> Result<Vec<(String, Value)>, DomainError> {
        let mut out = Vec::with_capacity(self.fields.len());
        for field in &self.fields {
            let supplied = if field.init {
                values.remove(&field.name)
            } else {
                None
            };
            let value = match supplied.or_else(|| field.produce_default()) {
                Some(value) => value,
                None if field.init => {
                    return Err(DomainError::missing_field(record, &field.name));
                }
                None => Value::None,
            };
            out.push((field.name.clone(), value));
        }
        reject_leftovers(record, values)?;
        Ok(out)
    }
}

/// Builder for declared record types.
#[derive(Debug)]
pub struct DeclaredRecordBuilder {
    name: String,
    layout: DeclaredLayout,
    properties: Vec<Property>,
}

impl DeclaredRecordBuilder {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            layout: DeclaredLayout::default(),
            properties: Vec::new(),
        }
    }

    pub fn field(mut self, field: DeclaredField) -> Self {
        self.layout.fields.push(field);
        self
    }

    /// Appends the fields of a parent record (dataclass inheritance).
    pub fn extends(mut self, parent: &RecordType) -> Self {
        if let RecordLayout::Declared(layout) = parent.layout() {
            self.layout.fields.extend(layout.fields.iter().cloned());
        }
        self.properties.extend(parent.properties().iter().cloned());
        self
    }

    pub fn property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    pub fn build(self) -> Arc<RecordType> {
        RecordType::from_parts(
            self.name,
            RecordLayout::Declared(self.layout),
            self.properties,
        )
    }
}
