//! Registry construction shared by the e2e scenarios.

use std::sync::Arc;

use alpha_domain::Value;

use crate::registry::FactoryClasses;
use crate::request_factory::{Arguments, Parameter, RequestFactory};
use crate::settings::FactorySettings;
use crate::telemetry::init_tracing;
use crate::test_fixtures;

/// Standard registry that knows every fixture type by name.
pub fn standard_factories() -> Arc<FactoryClasses> {
    factories_with(&FactorySettings::default())
}

pub fn factories_with(settings: &FactorySettings) -> Arc<FactoryClasses> {
    init_tracing("alpha_factories=debug");
    Arc::new(
        FactoryClasses::builder()
            .standard_factories()
            .options(settings.conversion_options())
            .scope(test_fixtures::scope())
            .build(),
    )
}

/// Request factory around a callable that returns its `obj` argument.
pub fn echo_request(
    parameter: Parameter,
    factories: Arc<FactoryClasses>,
) -> RequestFactory<impl Fn(Arguments) -> Value> {
    let name = parameter.name.clone();
    RequestFactory::new(
        move |args: Arguments| args.get(&name).cloned().unwrap_or_default(),
        vec![parameter],
        factories,
    )
}
