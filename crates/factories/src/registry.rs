//! Factory registry.
//!
//! [`FactoryClasses`] is built once, then shared read-only by every
//! conversion. It maps shape categories to class factories and target
//! types to type factories, and holds the default and model factories.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use alpha_domain::{TypeScope, TypeShape, Value};

use crate::class_factories::{
    AnyClassFactory, DictClassFactory, EnumClassFactory, GenericAliasClassFactory,
    IterableClassFactory, JsonPatchClassFactory, NativeClassFactory, RecordClassFactory,
    UnionClassFactory,
};
use crate::default_field_factory::DefaultFieldFactory;
use crate::error::FactoryError;
use crate::field::Field;
use crate::model_class_factory::ModelClassFactory;
use crate::ports::{ClassFactory, DefaultFactory, ModelFactory, TypeFactory};
use crate::settings::{ConversionOptions, FactorySettings};
use crate::type_factories::{
    DatetimeTypeFactory, EnumTypeFactory, GenericTypeFactory, JsonPatchTypeFactory,
};

/// Structural category of a field type, in dispatch precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ShapeKind {
    Enum,
    Patch,
    Record,
    GenericAlias,
    Union,
    Native,
    Iterable,
    Dict,
    Any,
}

impl ShapeKind {
    /// Most specific first; `Any` matches everything.
    pub const PRECEDENCE: [ShapeKind; 9] = [
        Self::Enum,
        Self::Patch,
        Self::Record,
        Self::GenericAlias,
        Self::Union,
        Self::Native,
        Self::Iterable,
        Self::Dict,
        Self::Any,
    ];

    pub fn matches(&self, shape: &TypeShape) -> bool {
        match self {
            Self::Enum => matches!(shape, TypeShape::Enum(_)),
            Self::Patch => matches!(shape, TypeShape::Patch),
            Self::Record => matches!(shape, TypeShape::Record(_)),
            Self::GenericAlias => shape.is_container(),
            Self::Union => shape.is_union(),
            Self::Native => matches!(
                shape,
                TypeShape::Str
                    | TypeShape::Int
                    | TypeShape::Float
                    | TypeShape::Bool
                    | TypeShape::Complex
                    | TypeShape::Date
                    | TypeShape::DateTime
                    | TypeShape::Uuid
                    | TypeShape::NoneType
                    | TypeShape::Object
            ),
            Self::Iterable => matches!(
                shape,
                TypeShape::List(_) | TypeShape::Tuple(_) | TypeShape::Set(_)
            ),
            Self::Dict => matches!(shape, TypeShape::Map(_, _)),
            Self::Any => true,
        }
    }

    /// The first category in [`ShapeKind::PRECEDENCE`] matching `shape`.
    pub fn of(shape: &TypeShape) -> Self {
        Self::PRECEDENCE
            .into_iter()
            .find(|kind| kind.matches(shape))
            .unwrap_or(Self::Any)
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::Enum => "enum",
            Self::Patch => "json_patch",
            Self::Record => "dataclass",
            Self::GenericAlias => "generic_alias",
            Self::Union => "union",
            Self::Native => "native",
            Self::Iterable => "iterable",
            Self::Dict => "dict",
            Self::Any => "any",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Target-type category selecting a type factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TypeKind {
    Generic,
    Datetime,
    Enum,
    JsonPatch,
}

impl TypeKind {
    pub fn for_shape(shape: &TypeShape) -> Self {
        match shape {
            TypeShape::Date | TypeShape::DateTime => Self::Datetime,
            TypeShape::Enum(_) => Self::Enum,
            TypeShape::Patch => Self::JsonPatch,
            _ => Self::Generic,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::Datetime => "datetime",
            Self::Enum => "enum",
            Self::JsonPatch => "json_patch",
        }
    }
}

#[derive(Clone)]
pub struct FactoryClasses {
    class_factories: BTreeMap<ShapeKind, Arc<dyn ClassFactory>>,
    type_factories: BTreeMap<TypeKind, Arc<dyn TypeFactory>>,
    default_factory: Option<Arc<dyn DefaultFactory>>,
    model_class_factory: Option<Arc<dyn ModelFactory>>,
    scope: TypeScope,
    options: ConversionOptions,
}

impl FactoryClasses {
    /// Registry with every standard factory and default settings.
    pub fn standard() -> Self {
        Self::from_settings(&FactorySettings::default())
    }

    pub fn from_settings(settings: &FactorySettings) -> Self {
        Self::builder()
            .standard_factories()
            .options(settings.conversion_options())
            .build()
    }

    /// Empty builder; nothing is registered until asked for.
    pub fn builder() -> FactoryClassesBuilder {
        FactoryClassesBuilder {
            inner: Self {
                class_factories: BTreeMap::new(),
                type_factories: BTreeMap::new(),
                default_factory: None,
                model_class_factory: None,
                scope: TypeScope::default(),
                options: ConversionOptions::default(),
            },
        }
    }

    pub fn scope(&self) -> &TypeScope {
        &self.scope
    }

    pub fn options(&self) -> &ConversionOptions {
        &self.options
    }

    pub fn class_factory(&self, kind: ShapeKind) -> Option<&Arc<dyn ClassFactory>> {
        self.class_factories.get(&kind)
    }

    pub fn type_factory(&self, kind: TypeKind) -> Option<&Arc<dyn TypeFactory>> {
        self.type_factories.get(&kind)
    }

    /// Runs the class factory registered for `kind`.
    pub fn delegate(
        &self,
        kind: ShapeKind,
        obj: &Value,
        field: &Field,
    ) -> Result<Value, FactoryError> {
        let factory = self
            .class_factory(kind)
            .ok_or_else(|| FactoryError::typing_factory(&field.name, &field.ty))?;
        factory.process(obj, field, self)
    }

    /// Dispatches one field through the class factory for its shape.
    pub fn dispatch(&self, obj: &Value, field: &Field) -> Result<Value, FactoryError> {
        let kind = ShapeKind::of(&field.ty);
        tracing::trace!(field = %field.name, shape = %kind, ty = %field.ty, "Dispatching field");
        self.delegate(kind, obj, field)
    }

    /// Converts a raw value through the type factory for `target`.
    pub fn convert(
        &self,
        key: &str,
        value: &Value,
        target: &TypeShape,
    ) -> Result<Value, FactoryError> {
        let kind = TypeKind::for_shape(target);
        let factory = self
            .type_factory(kind)
            .ok_or_else(|| FactoryError::typing_factory(key, target))?;
        factory.process(key, value, target, &self.options)
    }

    /// Produces the default value of `field`.
    pub fn default_for(&self, field: &Field) -> Result<Value, FactoryError> {
        let factory = self
            .default_factory
            .as_ref()
            .ok_or_else(|| FactoryError::typing_factory(&field.name, "default factory"))?;
        tracing::debug!(field = %field.name, "No source value, falling back to default");
        factory.process(field)
    }

    /// Builds a nested record through the model class factory.
    pub fn build_model(&self, obj: &Value, cls: &TypeShape) -> Result<Value, FactoryError> {
        let factory = self
            .model_class_factory
            .as_ref()
            .ok_or_else(|| FactoryError::typing_factory(cls, "model class factory"))?;
        factory.process(obj, cls, self)
    }
}

impl fmt::Debug for FactoryClasses {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactoryClasses")
            .field(
                "class_factories",
                &self.class_factories.keys().map(ShapeKind::key).collect::<Vec<_>>(),
            )
            .field(
                "type_factories",
                &self.type_factories.keys().map(TypeKind::key).collect::<Vec<_>>(),
            )
            .field("default_factory", &self.default_factory.is_some())
            .field("model_class_factory", &self.model_class_factory.is_some())
            .field("scope", &self.scope.names().collect::<Vec<_>>())
            .field("options", &self.options)
            .finish()
    }
}

/// Builder for [`FactoryClasses`]. Later registrations replace earlier ones.
pub struct FactoryClassesBuilder {
    inner: FactoryClasses,
}

impl FactoryClassesBuilder {
    /// Registers every standard class, type, default and model factory.
    pub fn standard_factories(self) -> Self {
        self.class_factory(ShapeKind::Enum, EnumClassFactory)
            .class_factory(ShapeKind::Patch, JsonPatchClassFactory)
            .class_factory(ShapeKind::Record, RecordClassFactory)
            .class_factory(ShapeKind::GenericAlias, GenericAliasClassFactory)
            .class_factory(ShapeKind::Union, UnionClassFactory)
            .class_factory(ShapeKind::Native, NativeClassFactory)
            .class_factory(ShapeKind::Iterable, IterableClassFactory)
            .class_factory(ShapeKind::Dict, DictClassFactory)
            .class_factory(ShapeKind::Any, AnyClassFactory)
            .type_factory(TypeKind::Generic, GenericTypeFactory)
            .type_factory(TypeKind::Datetime, DatetimeTypeFactory)
            .type_factory(TypeKind::Enum, EnumTypeFactory)
            .type_factory(TypeKind::JsonPatch, JsonPatchTypeFactory)
            .default_factory(DefaultFieldFactory)
            .model_class_factory(ModelClassFactory)
    }

    pub fn class_factory(mut self, kind: ShapeKind, factory: impl ClassFactory + 'static) -> Self {
        self.inner.class_factories.insert(kind, Arc::new(factory));
        self
    }

    pub fn type_factory(mut self, kind: TypeKind, factory: impl TypeFactory + 'static) -> Self {
        self.inner.type_factories.insert(kind, Arc::new(factory));
        self
    }

    pub fn default_factory(mut self, factory: impl DefaultFactory + 'static) -> Self {
        self.inner.default_factory = Some(Arc::new(factory));
        self
    }

    pub fn model_class_factory(mut self, factory: impl ModelFactory + 'static) -> Self {
        self.inner.model_class_factory = Some(Arc::new(factory));
        self
    }

    /// Scope used to resolve forward references in record field types.
    pub fn scope(mut self, scope: TypeScope) -> Self {
        self.inner.scope = scope;
        self
    }

    pub fn options(mut self, options: ConversionOptions) -> Self {
        self.inner.options = options;
        self
    }

    pub fn build(self) -> FactoryClasses {
        self.inner
    }
}

impl Default for FactoryClasses {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::ports::MockClassFactory;
    use crate::test_fixtures::{enums, records};

    #[test]
    fn precedence_picks_most_specific_kind() {
        assert_eq!(ShapeKind::of(&enums::car_type().into()), ShapeKind::Enum);
        assert_eq!(ShapeKind::of(&TypeShape::Patch), ShapeKind::Patch);
        assert_eq!(ShapeKind::of(&records::address().into()), ShapeKind::Record);
        assert_eq!(
            ShapeKind::of(&TypeShape::list(TypeShape::Str)),
            ShapeKind::GenericAlias
        );
        assert_eq!(
            ShapeKind::of(&TypeShape::map(TypeShape::Str, TypeShape::Str)),
            ShapeKind::GenericAlias
        );
        assert_eq!(
            ShapeKind::of(&TypeShape::optional(records::address().into())),
            ShapeKind::Union
        );
        assert_eq!(ShapeKind::of(&TypeShape::DateTime), ShapeKind::Native);
        assert_eq!(ShapeKind::of(&TypeShape::Any), ShapeKind::Any);
    }

    #[test]
    fn iterable_and_dict_match_below_generic_alias() {
        let list = TypeShape::set(TypeShape::Int);
        assert!(ShapeKind::Iterable.matches(&list));
        assert!(ShapeKind::GenericAlias < ShapeKind::Iterable);
        assert!(ShapeKind::Dict.matches(&TypeShape::map(TypeShape::Str, TypeShape::Any)));
    }

    #[test]
    fn type_kinds() {
        assert_eq!(TypeKind::for_shape(&TypeShape::Date), TypeKind::Datetime);
        assert_eq!(TypeKind::for_shape(&TypeShape::Patch), TypeKind::JsonPatch);
        assert_eq!(TypeKind::for_shape(&TypeShape::Str), TypeKind::Generic);
    }

    #[test]
    fn missing_registration_is_a_typing_error() {
        let factories = FactoryClasses::builder().build();
        let field = Field::new("name", TypeShape::Str).unwrap();
        let err = factories.dispatch(&Value::None, &field).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypingFactory);
        assert_eq!(
            factories.default_for(&field).unwrap_err().kind(),
            ErrorKind::TypingFactory
        );
        assert_eq!(
            factories
                .convert("name", &Value::from("x"), &TypeShape::Str)
                .unwrap_err()
                .kind(),
            ErrorKind::TypingFactory
        );
    }

    #[test]
    fn dispatch_uses_registered_factory_once() {
        let mut native = MockClassFactory::new();
        native
            .expect_process()
            .withf(|_, field, _| field.name == "name")
            .times(1)
            .returning(|_, _, _| Ok(Value::from("mocked")));
        let factories = FactoryClasses::builder()
            .class_factory(ShapeKind::Native, native)
            .build();

        let field = Field::new("name", TypeShape::Str).unwrap();
        let result = factories.dispatch(&Value::None, &field).unwrap();
        assert_eq!(result, Value::from("mocked"));
    }

    #[test]
    fn settings_flow_into_options() {
        let settings = FactorySettings {
            day_first: true,
            ..FactorySettings::default()
        };
        let factories = FactoryClasses::from_settings(&settings);
        assert!(factories.options().day_first);
        assert!(factories.class_factory(ShapeKind::Any).is_some());
        assert!(format!("{factories:?}").contains("generic_alias"));
    }
}
