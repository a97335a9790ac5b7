//! Alpha Factories library.
//!
//! Type-driven conversion between wire models and domain records. A record
//! type declares its fields; the factories read the same-named attributes
//! from any source object and coerce each value to the declared type.
//!
//! ## Structure
//!
//! - `field`, `field_iterator` - Uniform field descriptors over every record convention
//! - `class_factories/` - Per-field producers, dispatched by the shape of the field type
//! - `type_factories/` - Scalar, datetime, enum and JSON patch coercers
//! - `registry` - [`FactoryClasses`], the shared dispatch table
//! - `model_class_factory` - Builds one record from one source object
//! - `request_factory`, `response_factory` - Inbound and outbound adapters
//! - `settings`, `telemetry` - Environment configuration and tracing setup

pub mod class_factories;
pub mod default_field_factory;
pub mod error;
pub mod field;
pub mod field_iterator;
pub mod model_class_factory;
pub mod ports;
pub mod registry;
pub mod request_factory;
pub mod response_factory;
pub mod settings;
pub mod telemetry;
pub mod type_factories;

/// Shared record types, enums and fake factories.
#[cfg(test)]
pub mod test_fixtures;

/// End-to-end conversion scenarios over the standard registry.
#[cfg(test)]
mod e2e_tests;

pub use default_field_factory::DefaultFieldFactory;
pub use error::{ErrorKind, FactoryError};
pub use field::Field;
pub use field_iterator::FieldIterator;
pub use model_class_factory::ModelClassFactory;
pub use ports::{ClassFactory, DefaultFactory, ModelFactory, TypeFactory};
pub use registry::{FactoryClasses, FactoryClassesBuilder, ShapeKind, TypeKind};
pub use request_factory::{Arguments, Parameter, RequestFactory};
pub use response_factory::ResponseFactory;
pub use settings::{ConversionOptions, FactorySettings};
pub use telemetry::init_tracing;
