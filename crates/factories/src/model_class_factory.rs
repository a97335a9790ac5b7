//! Model Class Factory - builds one record from one source object.
//!
//! This is the recursion root: nested records found by the class factories
//! come back here through [`FactoryClasses::build_model`].

use std::sync::Arc;

use alpha_domain::{Attributes, RecordType, TypeShape, Value};
use serde::de::DeserializeOwned;

use crate::error::FactoryError;
use crate::field_iterator::FieldIterator;
use crate::ports::ModelFactory;
use crate::registry::FactoryClasses;

#[derive(Debug, Clone, Copy, Default)]
pub struct ModelClassFactory;

impl ModelClassFactory {
    /// Builds `cls` from `obj` and deserialises the result into `T`.
    pub fn build<T: DeserializeOwned>(
        obj: &Value,
        cls: &TypeShape,
        factories: &FactoryClasses,
    ) -> Result<T, FactoryError> {
        match factories.build_model(obj, cls)? {
            Value::Record(record) => Ok(record.deserialize_into()?),
            other => Err(FactoryError::model_class_factory(&other, cls)),
        }
    }
}

/// The record type behind `cls`, resolving forward references.
pub(crate) fn record_type(cls: &TypeShape, factories: &FactoryClasses) -> Option<Arc<RecordType>> {
    match cls {
        TypeShape::Record(record) => Some(Arc::clone(record)),
        TypeShape::Named(_) => factories
            .scope()
            .resolve(cls)
            .ok()
            .and_then(|resolved| resolved.as_record().cloned()),
        _ => None,
    }
}

impl ModelFactory for ModelClassFactory {
    fn process(
        &self,
        obj: &Value,
        cls: &TypeShape,
        factories: &FactoryClasses,
    ) -> Result<Value, FactoryError> {
        let record = record_type(cls, factories)
            .filter(|_| obj.is_attribute_bearing())
            .ok_or_else(|| FactoryError::model_class_factory(obj, cls))?;

        let span = tracing::debug_span!(
            "model_class_factory",
            record = %record.name(),
            source = %obj.type_name(),
        );
        let _guard = span.enter();

        let mut values = Attributes::new();
        for field in FieldIterator::for_record(&record, factories.scope())?.filter(|f| f.init) {
            let value = if obj.has_attribute(&field.name) {
                factories.dispatch(obj, &field)?
            } else {
                factories.default_for(&field)?
            };
            values.insert(field.name, value);
        }

        Ok(Value::Record(record.construct(values)?))
    }
}
