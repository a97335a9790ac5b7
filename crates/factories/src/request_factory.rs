//! Request Factory - adapts inbound call arguments to a callable's
//! declared parameter types.
//!
//! Record-shaped arguments are rebuilt through the model class factory,
//! enums and patches always go through their type factories, and scalars
//! are cast when `cast_args` is on.

use std::sync::Arc;

use alpha_domain::{Attributes, TypeShape, Value};

use crate::class_factories::is_instance;
use crate::error::FactoryError;
use crate::registry::FactoryClasses;
use crate::settings::FactorySettings;

/// One declared parameter of a wrapped callable.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub ty: TypeShape,
    pub default: Option<Value>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: impl Into<TypeShape>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            default: None,
        }
    }

    /// Value used when the caller omits the argument. Defaults are passed
    /// as declared, without conversion.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }
}

/// Keyword arguments of one call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments(Attributes);

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.0.remove(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_attributes(self) -> Attributes {
        self.0
    }
}

impl From<Attributes> for Arguments {
    fn from(attributes: Attributes) -> Self {
        Self(attributes)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Arguments {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}

/// Wraps a callable so every call first converts its arguments.
pub struct RequestFactory<F> {
    func: F,
    parameters: Vec<Parameter>,
    factories: Arc<FactoryClasses>,
    cast_args: bool,
    use_model_class_factory: bool,
}

impl<F> RequestFactory<F> {
    pub fn new(func: F, parameters: Vec<Parameter>, factories: Arc<FactoryClasses>) -> Self {
        let defaults = FactorySettings::default();
        Self {
            func,
            parameters,
            factories,
            cast_args: defaults.cast_args,
            use_model_class_factory: defaults.use_model_class_factory,
        }
    }

    pub fn from_settings(
        func: F,
        parameters: Vec<Parameter>,
        factories: Arc<FactoryClasses>,
        settings: &FactorySettings,
    ) -> Self {
        Self::new(func, parameters, factories)
            .cast_args(settings.cast_args)
            .use_model_class_factory(settings.use_model_class_factory)
    }

    pub fn cast_args(mut self, cast_args: bool) -> Self {
        self.cast_args = cast_args;
        self
    }

    pub fn use_model_class_factory(mut self, enabled: bool) -> Self {
        self.use_model_class_factory = enabled;
        self
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Converts `args` and invokes the wrapped callable.
    ///
    /// Arguments that match no declared parameter are passed through
    /// untouched.
    ///
    /// # Errors
    ///
    /// - [`FactoryError::MissingArgument`] for an omitted parameter without default
    /// - [`FactoryError::ClassMismatch`] when a value cannot take the declared shape
    /// - any conversion error raised while preparing an argument
    pub fn call<R>(&self, mut args: Arguments) -> Result<R, FactoryError>
    where
        F: Fn(Arguments) -> R,
    {
        tracing::debug!(parameters = self.parameters.len(), "Preparing request arguments");
        let mut prepared = Arguments::new();
        for parameter in &self.parameters {
            let value = match args.remove(&parameter.name) {
                Some(value) => {
                    let ty = self.resolve(parameter)?;
                    self.prepare(&parameter.name, &value, &ty)?
                }
                None => parameter
                    .default
                    .clone()
                    .ok_or_else(|| FactoryError::missing_argument(&parameter.name))?,
            };
            prepared.insert(parameter.name.clone(), value);
        }
        for (name, value) in args.into_attributes() {
            prepared.insert(name, value);
        }
        Ok((self.func)(prepared))
    }

    fn resolve(&self, parameter: &Parameter) -> Result<TypeShape, FactoryError> {
        if parameter.ty.is_resolved() {
            return Ok(parameter.ty.clone());
        }
        self.factories
            .scope()
            .resolve(&parameter.ty)
            .map_err(|e| FactoryError::type_resolution(&parameter.ty, e))
    }

    fn prepare(&self, name: &str, value: &Value, ty: &TypeShape) -> Result<Value, FactoryError> {
        let factories = &self.factories;
        match ty {
            TypeShape::Any | TypeShape::Object | TypeShape::Named(_) => Ok(value.clone()),
            TypeShape::Union(_) => {
                if value.is_none() {
                    return if ty.is_optional() {
                        Ok(Value::None)
                    } else {
                        Err(FactoryError::class_mismatch(name, ty, value))
                    };
                }
                let members = ty.informative_members();
                if let [member] = members.as_slice() {
                    return self.prepare(name, value, member);
                }
                if let Some(member) = members.iter().find(|m| is_instance(m, value)) {
                    return self.prepare(name, value, member);
                }
                members
                    .iter()
                    .find_map(|member| self.prepare(name, value, member).ok())
                    .ok_or_else(|| FactoryError::mixed_argument_types(name, ty))
            }
            TypeShape::List(element) | TypeShape::Tuple(element) | TypeShape::Set(element) => {
                let items = value
                    .as_sequence()
                    .ok_or_else(|| FactoryError::class_mismatch(name, ty, value))?;
                let converted = items
                    .iter()
                    .map(|item| self.prepare(name, item, element))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(match ty {
                    TypeShape::Tuple(_) => Value::Tuple(converted),
                    TypeShape::Set(_) => Value::set(converted),
                    _ => Value::List(converted),
                })
            }
            TypeShape::Map(_, inner) => match value {
                Value::Map(map) => map
                    .iter()
                    .map(|(key, item)| Ok((key.clone(), self.prepare(name, item, inner)?)))
                    .collect::<Result<Attributes, FactoryError>>()
                    .map(Value::Map),
                _ => Err(FactoryError::class_mismatch(name, ty, value)),
            },
            TypeShape::Record(_) if !self.use_model_class_factory => Ok(value.clone()),
            TypeShape::Record(_) if value.is_attribute_bearing() => {
                factories.build_model(value, ty)
            }
            TypeShape::Record(_) => Err(FactoryError::class_mismatch(name, ty, value)),
            TypeShape::Enum(_) | TypeShape::Patch => factories.convert(name, value, ty),
            _ if self.cast_args => factories.convert(name, value, ty),
            _ => Ok(value.clone()),
        }
    }
}

impl<F> std::fmt::Debug for RequestFactory<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestFactory")
            .field("parameters", &self.parameters)
            .field("cast_args", &self.cast_args)
            .field("use_model_class_factory", &self.use_model_class_factory)
            .finish_non_exhaustive()
    }
}
