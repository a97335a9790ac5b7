//! Response Factory - projects an internal object onto a wire model.
//!
//! Every wire field is read from the response by name (computed properties
//! included); fields the wire model does not declare are dropped.

use std::sync::Arc;

use alpha_domain::{Attributes, RecordType, TypeShape, Value};

use crate::error::FactoryError;
use crate::field_iterator::FieldIterator;
use crate::registry::FactoryClasses;

#[derive(Debug, Clone)]
pub struct ResponseFactory {
    factories: Arc<FactoryClasses>,
}

impl ResponseFactory {
    pub fn new(factories: Arc<FactoryClasses>) -> Self {
        Self { factories }
    }

    /// Converts `response` into an instance of `cls`, or a list of them.
    ///
    /// # Errors
    ///
    /// - [`FactoryError::MissingAttribute`] when the response lacks a wire field
    /// - [`FactoryError::ClassMismatch`] when the response shape cannot fill `cls`
    pub fn process(&self, response: &Value, cls: &TypeShape) -> Result<Value, FactoryError> {
        let cls = self.resolve(cls)?;
        match &cls {
            TypeShape::List(_) | TypeShape::Tuple(_) | TypeShape::Set(_) => {
                if response.as_sequence().is_none() {
                    return Err(FactoryError::class_mismatch("response", &cls, response));
                }
                self.project("response", response, &cls)
            }
            TypeShape::Record(record) => self.build_wire(response, record),
            _ => self.project("response", response, &cls),
        }
    }

    fn resolve(&self, cls: &TypeShape) -> Result<TypeShape, FactoryError> {
        if cls.is_resolved() {
            return Ok(cls.clone());
        }
        self.factories
            .scope()
            .resolve(cls)
            .map_err(|e| FactoryError::type_resolution(cls, e))
    }

    fn build_wire(&self, response: &Value, record: &Arc<RecordType>) -> Result<Value, FactoryError> {
        if !response.is_attribute_bearing() {
            return Err(FactoryError::class_mismatch(
                "response",
                &TypeShape::Record(Arc::clone(record)),
                response,
            ));
        }

        let span = tracing::debug_span!(
            "response_factory",
            wire = %record.name(),
            source = %response.type_name(),
        );
        let _guard = span.enter();

        let mut values = Attributes::new();
        for field in FieldIterator::for_record(record, self.factories.scope())?.filter(|f| f.init) {
            let value = response
                .attribute(&field.name)
                .ok_or_else(|| FactoryError::missing_attribute(response.type_name(), &field.name))?;
            let projected = self.project(&field.name, &value, &field.ty)?;
            values.insert(field.name, projected);
        }
        Ok(Value::Record(record.construct(values)?))
    }

    fn project(&self, name: &str, value: &Value, ty: &TypeShape) -> Result<Value, FactoryError> {
        if value.is_none() {
            return Ok(Value::None);
        }
        match ty {
            TypeShape::Record(record) => self.build_wire(value, record),
            TypeShape::List(element) | TypeShape::Tuple(element) | TypeShape::Set(element) => {
                let Some(items) = value.as_sequence() else {
                    return Ok(value.clone());
                };
                let projected = items
                    .iter()
                    .map(|item| self.project(name, item, element))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(match ty {
                    TypeShape::Tuple(_) => Value::Tuple(projected),
                    TypeShape::Set(_) => Value::set(projected),
                    _ => Value::List(projected),
                })
            }
            TypeShape::Union(_) => {
                let members = ty.informative_members();
                let mut last_error = None;
                for member in members {
                    match self.project(name, value, member) {
                        Ok(projected) => return Ok(projected),
                        Err(e) => last_error = Some(e),
                    }
                }
                Err(last_error.unwrap_or_else(|| FactoryError::mixed_argument_types(name, ty)))
            }
            TypeShape::Str => match value {
                Value::Enum(member) => Ok(Value::Str(member.name.clone())),
                _ => Ok(value.clone()),
            },
            _ => Ok(value.clone()),
        }
    }
}
