//! Shared record types, enums and fake factories for unit and e2e tests.
//!
//! The fixtures mirror the shapes the engine meets in practice: wire
//! models generated from an API schema, domain records in all three
//! conventions, and source objects with optional dict capabilities.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_fixtures::{attrs, fakes, records};
//!
//! #[test]
//! fn test_address_is_built() {
//!     let factories = fakes::fake_factory_classes();
//!     let source = Value::Map(attrs([("street", Value::from("Main"))]));
//!     // ... test logic
//! }
//! ```

pub mod enums;
pub mod fakes;
pub mod records;

use alpha_domain::{Attributes, Object, TypeScope, Value};

// =============================================================================
// Helpers
// =============================================================================

/// Builds keyword values from `(name, value)` pairs.
pub fn attrs<'a>(pairs: impl IntoIterator<Item = (&'a str, Value)>) -> Attributes {
    pairs
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

/// Scope that knows every fixture record and enum by name.
pub fn scope() -> TypeScope {
    TypeScope::new()
        .with_record(records::address())
        .with_record(records::user())
        .with_record(records::car())
        .with_record(records::fake_dataclass())
        .with_record(records::track_point())
        .with_record(records::api_track())
        .with_record(records::api_track_model())
        .with_record(records::airplane())
        .with_record(records::flight())
        .with_record(records::api_airplane())
        .with_record(records::api_flight())
        .with_enum(enums::gender())
        .with_enum(enums::car_type())
        .with_enum(enums::ac_type())
}

// =============================================================================
// Source objects
// =============================================================================

/// Source object standing in for a generated API model.
///
/// Attributes are always readable; the dict capabilities are only present
/// when configured.
#[derive(Debug, Clone, Default)]
pub struct ApiObject {
    name: String,
    attributes: Attributes,
    to_dict: Option<Attributes>,
    named_tuple: Option<Attributes>,
    attribute_dict: Option<Attributes>,
}

impl ApiObject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_attribute(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.to_string(), value.into());
        self
    }

    pub fn with_to_dict(mut self, values: Attributes) -> Self {
        self.to_dict = Some(values);
        self
    }

    pub fn with_named_tuple(mut self, values: Attributes) -> Self {
        self.named_tuple = Some(values);
        self
    }

    pub fn with_attribute_dict(mut self, values: Attributes) -> Self {
        self.attribute_dict = Some(values);
        self
    }
}

impl Object for ApiObject {
    fn type_name(&self) -> &str {
        &self.name
    }

    fn attribute(&self, name: &str) -> Option<Value> {
        self.attributes.get(name).cloned()
    }

    fn to_dict(&self) -> Option<Attributes> {
        self.to_dict.clone()
    }

    fn as_named_tuple(&self) -> Option<Attributes> {
        self.named_tuple.clone()
    }

    fn attribute_dict(&self) -> Option<Attributes> {
        self.attribute_dict.clone()
    }
}
