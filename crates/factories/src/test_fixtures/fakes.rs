//! Fake factories that answer with a fixed marker.
//!
//! A fake registry lets a test see which factory a dispatch reached
//! without building real values: every class and type factory returns its
//! registry key, the default factory returns the field name and the model
//! class factory returns `"model"`.

use alpha_domain::{TypeShape, Value};

use crate::error::FactoryError;
use crate::field::Field;
use crate::ports::{ClassFactory, DefaultFactory, ModelFactory, TypeFactory};
use crate::registry::{FactoryClasses, ShapeKind, TypeKind};
use crate::settings::ConversionOptions;

#[derive(Debug, Clone, Copy)]
pub struct FakeClassFactory {
    marker: &'static str,
}

impl FakeClassFactory {
    pub fn new(marker: &'static str) -> Self {
        Self { marker }
    }
}

impl ClassFactory for FakeClassFactory {
    fn process(&self, _: &Value, _: &Field, _: &FactoryClasses) -> Result<Value, FactoryError> {
        Ok(Value::from(self.marker))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FakeTypeFactory {
    marker: &'static str,
}

impl FakeTypeFactory {
    pub fn new(marker: &'static str) -> Self {
        Self { marker }
    }
}

impl TypeFactory for FakeTypeFactory {
    fn process(
        &self,
        _: &str,
        _: &Value,
        _: &TypeShape,
        _: &ConversionOptions,
    ) -> Result<Value, FactoryError> {
        Ok(Value::from(self.marker))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FakeDefaultFactory;

impl DefaultFactory for FakeDefaultFactory {
    fn process(&self, field: &Field) -> Result<Value, FactoryError> {
        Ok(Value::from(field.name.clone()))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FakeModelClassFactory {
    marker: &'static str,
}

impl FakeModelClassFactory {
    pub fn new(marker: &'static str) -> Self {
        Self { marker }
    }
}

impl ModelFactory for FakeModelClassFactory {
    fn process(&self, _: &Value, _: &TypeShape, _: &FactoryClasses) -> Result<Value, FactoryError> {
        Ok(Value::from(self.marker))
    }
}

/// Registry where every slot is a fake.
pub fn fake_factory_classes() -> FactoryClasses {
    let builder = ShapeKind::PRECEDENCE
        .into_iter()
        .fold(FactoryClasses::builder(), |builder, kind| {
            builder.class_factory(kind, FakeClassFactory::new(kind.key()))
        });
    [
        TypeKind::Generic,
        TypeKind::Datetime,
        TypeKind::Enum,
        TypeKind::JsonPatch,
    ]
    .into_iter()
    .fold(builder, |builder, kind| {
        builder.type_factory(kind, FakeTypeFactory::new(kind.key()))
    })
    .default_factory(FakeDefaultFactory)
    .model_class_factory(FakeModelClassFactory::new("model"))
    .build()
}
