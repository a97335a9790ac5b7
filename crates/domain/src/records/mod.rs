//! Record types and record instances.
//!
//! Three record conventions are supported, each structurally different:
//!
//! - [`declared`]: dataclass-like ordered fields with `default`,
//!   `default_factory` and `init` flags
//! - [`attrs`]: attributes added through a builder, with a single
//!   default slot that holds nothing, a literal or a factory, and private
//!   attributes initialised through a public alias
//! - [`schema`]: validated records whose properties carry type
//!   expressions and a separate `required` set
//!
//! Whatever the convention, an instance is a [`Record`]: the type plus
//! its values in declaration order.

pub mod attrs;
pub mod declared;
pub mod schema;

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::error::DomainError;
use crate::value::{Attributes, Value};

pub use attrs::{Attribute, AttrsDefault, AttrsLayout, AttrsRecordBuilder};
pub use declared::{DeclaredField, DeclaredLayout, DeclaredRecordBuilder};
pub use schema::{SchemaLayout, SchemaProperty, SchemaRecordBuilder};

/// Zero-argument producer of a default value.
#[derive(Clone)]
pub struct DefaultFn(Arc<dyn Fn() -> Value + Send + Sync>);

impl DefaultFn {
    pub fn new(f: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn call(&self) -> Value {
        (self.0)()
    }
}

impl fmt::Debug for DefaultFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DefaultFn(..)")
    }
}

impl PartialEq for DefaultFn {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Read-only computed attribute, evaluated against the record on access.
#[derive(Clone)]
pub struct Property {
    name: String,
    getter: Arc<dyn Fn(&Record) -> Value + Send + Sync>,
}

impl Property {
    pub fn new(
        name: impl Into<String>,
        getter: impl Fn(&Record) -> Value + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            getter: Arc::new(getter),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Property").field(&self.name).finish()
    }
}

/// Which convention declared a record type, together with its fields.
#[derive(Debug, Clone)]
pub enum RecordLayout {
    Declared(DeclaredLayout),
    Attrs(AttrsLayout),
    Schema(SchemaLayout),
}

#[derive(Debug)]
pub struct RecordType {
    name: String,
    layout: RecordLayout,
    properties: Vec<Property>,
}

impl RecordType {
    pub fn declared(name: impl Into<String>) -> DeclaredRecordBuilder {
        DeclaredRecordBuilder::new(name)
    }

    pub fn attrs(name: impl Into<String>) -> AttrsRecordBuilder {
        AttrsRecordBuilder::new(name)
    }

    pub fn schema(name: impl Into<String>) -> SchemaRecordBuilder {
        SchemaRecordBuilder::new(name)
    }

    pub(crate) fn from_parts(
        name: String,
        layout: RecordLayout,
        properties: Vec<Property>,
    ) -> Arc<Self> {
        Arc::new(Self {
            name,
            layout,
            properties,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn layout(&self) -> &RecordLayout {
        &self.layout
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Keyword names accepted by [`RecordType::construct`], in declaration order.
    pub fn init_names(&self) -> Vec<&str> {
        match &self.layout {
            RecordLayout::Declared(layout) => layout
                .fields()
                .iter()
                .filter(|f| f.init)
                .map(|f| f.name.as_str())
                .collect(),
            RecordLayout::Attrs(layout) => layout
                .attributes()
                .iter()
                .filter(|a| a.init)
                .map(Attribute::init_name)
                .collect(),
            RecordLayout::Schema(layout) => layout.property_names().collect(),
        }
    }

    /// Builds an instance from keyword values.
    ///
    /// Absent keywords take their default; unknown keywords and absent
    /// required keywords are rejected.
    pub fn construct(self: &Arc<Self>, values: Attributes) -> Result<Record, DomainError> {
        let values = match &self.layout {
            RecordLayout::Declared(layout) => layout.construct(&self.name, values)?,
            RecordLayout::Attrs(layout) => layout.construct(&self.name, values)?,
            RecordLayout::Schema(layout) => layout.construct(&self.name, values)?,
        };
        Ok(Record {
            record_type: Arc::clone(self),
            values,
        })
    }
}

impl PartialEq for RecordType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

/// Rejects keywords that no field consumed.
pub(crate) fn reject_leftovers(record: &str, leftovers: Attributes) -> Result<(), DomainError> {
    match leftovers.into_keys().next() {
        Some(field) => Err(DomainError::unexpected_field(record, field)),
        None => Ok(()),
    }
}

/// An instance of a [`RecordType`].
#[derive(Clone)]
pub struct Record {
    record_type: Arc<RecordType>,
    values: Vec<(String, Value)>,
}

impl Record {
    pub fn record_type(&self) -> &Arc<RecordType> {
        &self.record_type
    }

    pub fn type_name(&self) -> &str {
        self.record_type.name()
    }

    /// Stored field value, without consulting computed properties.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.values
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.values
            .iter_mut()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Attribute lookup: stored fields first, then computed properties.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.field(name).cloned().or_else(|| {
            self.record_type
                .property(name)
                .map(|property| (property.getter)(self))
        })
    }

    pub fn has(&self, name: &str) -> bool {
        self.field(name).is_some() || self.record_type.property(name).is_some()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn to_dict(&self) -> Attributes {
        self.values.iter().cloned().collect()
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.values
                .iter()
                .map(|(name, value)| (name.clone(), value.to_json()))
                .collect(),
        )
    }

    /// Deserialises the record into a strongly typed struct.
    pub fn deserialize_into<T: DeserializeOwned>(&self) -> Result<T, DomainError> {
        serde_json::from_value(self.to_json()).map_err(|e| {
            DomainError::validation(format!("{} does not fit target: {e}", self.type_name()))
        })
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.type_name() == other.type_name() && self.values == other.values
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct(self.type_name());
        for (name, value) in &self.values {
            out.field(name, value);
        }
        out.finish()
    }
}
