//! Field iteration over record types.
//!
//! Each record convention gets its own [`RecordIntrospector`]; the iterator
//! picks one from the record layout and from then on hands out plain
//! [`Field`] values. Nothing downstream knows which convention declared a
//! record.

use std::sync::Arc;

use alpha_domain::{
    AttrsDefault, AttrsLayout, DeclaredLayout, DomainError, RecordLayout, RecordType,
    SchemaLayout, TypeScope, TypeShape,
};

use crate::error::FactoryError;
use crate::field::Field;

mod sealed {
    pub trait Sealed {}
}

/// Reads the fields of one record convention.
pub trait RecordIntrospector: sealed::Sealed {
    /// Fields in declaration order, with every type resolved against `scope`.
    fn fields(&self, scope: &TypeScope) -> Result<Vec<Field>, FactoryError>;
}

struct DeclaredIntrospector<'a>(&'a DeclaredLayout);
struct AttrsIntrospector<'a>(&'a AttrsLayout);
struct SchemaIntrospector<'a>(&'a SchemaLayout);

impl sealed::Sealed for DeclaredIntrospector<'_> {}
impl sealed::Sealed for AttrsIntrospector<'_> {}
impl sealed::Sealed for SchemaIntrospector<'_> {}

impl RecordIntrospector for DeclaredIntrospector<'_> {
    fn fields(&self, scope: &TypeScope) -> Result<Vec<Field>, FactoryError> {
        self.0
            .fields()
            .iter()
            .map(|declared| {
                Ok(Field {
                    name: declared.name.clone(),
                    ty: resolve(&declared.name, &declared.ty, scope)?,
                    default: declared.default.clone(),
                    default_factory: declared.default_factory.clone(),
                    init: declared.init,
                })
            })
            .collect()
    }
}

impl RecordIntrospector for AttrsIntrospector<'_> {
    fn fields(&self, scope: &TypeScope) -> Result<Vec<Field>, FactoryError> {
        self.0
            .attributes()
            .iter()
            .map(|attribute| {
                let (default, default_factory) = match &attribute.default {
                    AttrsDefault::Nothing => (None, None),
                    AttrsDefault::Value(value) => (Some(value.clone()), None),
                    AttrsDefault::Factory(factory) => (None, Some(factory.clone())),
                };
                Ok(Field {
                    name: attribute.init_name().to_string(),
                    ty: resolve(&attribute.name, &attribute.ty, scope)?,
                    default,
                    default_factory,
                    init: attribute.init,
                })
            })
            .collect()
    }
}

impl RecordIntrospector for SchemaIntrospector<'_> {
    fn fields(&self, scope: &TypeScope) -> Result<Vec<Field>, FactoryError> {
        let scope = self.0.scope().unwrap_or(scope);
        self.0
            .properties()
            .map(|(name, property)| {
                let required = self.0.is_required(name);
                Ok(Field {
                    name: name.to_string(),
                    ty: resolve(name, &property.ty, scope)?,
                    default: if required {
                        None
                    } else {
                        property.default.clone()
                    },
                    default_factory: if required {
                        None
                    } else {
                        property.default_factory.clone()
                    },
                    init: true,
                })
            })
            .collect()
    }
}

fn introspector(layout: &RecordLayout) -> Box<dyn RecordIntrospector + '_> {
    match layout {
        RecordLayout::Declared(layout) => Box::new(DeclaredIntrospector(layout)),
        RecordLayout::Attrs(layout) => Box::new(AttrsIntrospector(layout)),
        RecordLayout::Schema(layout) => Box::new(SchemaIntrospector(layout)),
    }
}

fn resolve(field: &str, ty: &TypeShape, scope: &TypeScope) -> Result<TypeShape, FactoryError> {
    if ty.is_resolved() {
        return Ok(ty.clone());
    }
    scope.resolve(ty).map_err(|e| match e {
        DomainError::UnresolvedType(name) => FactoryError::type_resolution(
            name,
            format!("field '{field}' refers to a type that is not in scope"),
        ),
        other => FactoryError::type_resolution(ty, other),
    })
}

/// Restartable iterator over the fields of a record type.
///
/// Types are resolved once at construction; iteration only clones the
/// resolved fields. Cloning the iterator (or calling [`restart`]) yields an
/// independent sequence over the same fields.
///
/// [`restart`]: FieldIterator::restart
#[derive(Debug, Clone)]
pub struct FieldIterator {
    record: Arc<RecordType>,
    fields: Arc<[Field]>,
    position: usize,
}

impl FieldIterator {
    pub fn new(cls: &TypeShape) -> Result<Self, FactoryError> {
        Self::with_scope(cls, &TypeScope::default())
    }

    /// Iterates `cls`, resolving forward references through `scope`.
    ///
    /// # Errors
    ///
    /// - [`FactoryError::UnsupportedClassShape`] when `cls` is not a record
    /// - [`FactoryError::TypeResolution`] when a field type cannot be resolved
    pub fn with_scope(cls: &TypeShape, scope: &TypeScope) -> Result<Self, FactoryError> {
        let resolved = resolve("<class>", cls, scope)?;
        match resolved.as_record() {
            Some(record) => Self::for_record(record, scope),
            None => Err(FactoryError::unsupported_class_shape(cls)),
        }
    }

    pub fn for_record(record: &Arc<RecordType>, scope: &TypeScope) -> Result<Self, FactoryError> {
        let fields = introspector(record.layout()).fields(scope)?;
        Ok(Self {
            record: Arc::clone(record),
            fields: fields.into(),
            position: 0,
        })
    }

    pub fn record(&self) -> &Arc<RecordType> {
        &self.record
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// A fresh iterator over the same fields, starting at the first one.
    pub fn restart(&self) -> Self {
        Self {
            record: Arc::clone(&self.record),
            fields: Arc::clone(&self.fields),
            position: 0,
        }
    }
}

impl Iterator for FieldIterator {
    type Item = Field;

    fn next(&mut self) -> Option<Self::Item> {
        let field = self.fields.get(self.position)?.clone();
        self.position += 1;
        Some(field)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.fields.len() - self.position;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for FieldIterator {}
