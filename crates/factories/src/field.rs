//! Normalised field descriptor.

use std::fmt;

use alpha_domain::{DefaultFn, TypeShape, Value};

use crate::error::FactoryError;

/// One attribute slot of a target record, independent of the record
/// convention that declared it.
///
/// `ty` never contains a forward reference. `default` and
/// `default_factory` are separate slots: `Some(Value::None)` is a real
/// default of `None`, while `default == None` means there is no default.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub ty: TypeShape,
    pub default: Option<Value>,
    pub default_factory: Option<DefaultFn>,
    pub init: bool,
}

impl Field {
    /// Creates a required, initialiser-eligible field.
    ///
    /// # Errors
    ///
    /// Returns [`FactoryError::TypeResolution`] when `ty` still holds a
    /// forward reference.
    pub fn new(name: impl Into<String>, ty: impl Into<TypeShape>) -> Result<Self, FactoryError> {
        let name = name.into();
        let ty = ty.into();
        if let Some(unresolved) = ty.first_unresolved() {
            return Err(FactoryError::type_resolution(
                unresolved,
                format!("field '{name}' holds an unresolved forward reference"),
            ));
        }
        Ok(Self {
            name,
            ty,
            default: None,
            default_factory: None,
            init: true,
        })
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn with_default_factory(mut self, factory: DefaultFn) -> Self {
        self.default_factory = Some(factory);
        self
    }

    pub fn no_init(mut self) -> Self {
        self.init = false;
        self
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    pub fn has_default_factory(&self) -> bool {
        self.default_factory.is_some()
    }

    pub fn is_required(&self) -> bool {
        !self.has_default() && !self.has_default_factory()
    }

    /// Same slot, narrowed to another (already resolved) type.
    pub(crate) fn narrowed(&self, ty: &TypeShape) -> Self {
        Self {
            ty: ty.clone(),
            ..self.clone()
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Field(name='{}', type={}", self.name, self.ty)?;
        if let Some(default) = &self.default {
            write!(f, ", default={default}")?;
        }
        if self.has_default_factory() {
            f.write_str(", default_factory=..")?;
        }
        write!(f, ", init={})", self.init)
    }
}
