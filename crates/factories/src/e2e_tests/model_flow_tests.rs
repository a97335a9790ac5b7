//! Wire data rebuilt into domain records.

use alpha_domain::{Attributes, TypeShape, Value};

use super::standard_factories;
use crate::error::ErrorKind;
use crate::field::Field;
use crate::field_iterator::FieldIterator;
use crate::ports::MockClassFactory;
use crate::registry::{FactoryClasses, ShapeKind};
use crate::response_factory::ResponseFactory;
use crate::test_fixtures::{self, attrs, enums, records};

fn build(source: &Value, cls: TypeShape) -> Result<Value, crate::FactoryError> {
    standard_factories().build_model(source, &cls)
}

#[test]
fn test_track_point_round_trip() {
    let point = records::track_point_instance(4);
    let wire = ResponseFactory::new(standard_factories())
        .process(&point, &records::api_track().into())
        .unwrap();
    assert_eq!(wire.type_name(), "ApiTrack");

    let rebuilt = build(&wire, records::track_point().into()).unwrap();
    assert_eq!(rebuilt, point);
}

#[test]
fn test_flight_round_trip() {
    let flight = records::flight_instance(records::airplane_instance());
    let wire = ResponseFactory::new(standard_factories())
        .process(&flight, &records::api_flight().into())
        .unwrap();
    assert_eq!(
        wire.attribute("airplane").and_then(|a| a.attribute("ac_type")),
        Some(Value::from("HELICOPTER"))
    );

    let rebuilt = build(&wire, records::flight().into()).unwrap();
    assert_eq!(rebuilt, flight);
}

#[test]
fn test_wire_mapping_without_airplane() {
    let source = Value::Map(attrs([
        ("id", Value::from("11")),
        ("airplane", Value::None),
        (
            "tracks",
            Value::List(vec![Value::Map(attrs([
                ("id", Value::Int(1)),
                ("latitude", Value::from("1.5")),
                ("longitude", Value::Float(1.5)),
                ("altitude", Value::Int(100)),
            ]))]),
        ),
    ]));
    let flight = build(&source, "Flight".into()).unwrap();
    assert_eq!(flight.attribute("id"), Some(Value::Int(11)));
    assert_eq!(flight.attribute("airplane"), Some(Value::None));

    let tracks = flight.attribute("tracks").unwrap();
    let point = &tracks.as_sequence().unwrap()[0];
    assert_eq!(point.type_name(), "TrackPoint");
    assert_eq!(point.attribute("latitude"), Some(Value::Float(1.5)));
    assert_eq!(point.attribute("altitude"), Some(Value::Float(100.0)));
}

#[test]
fn test_enum_none_sentinel() {
    let car = build(
        &Value::Map(attrs([
            ("brand", Value::from("Volvo")),
            ("car_type", Value::None),
        ])),
        records::car().into(),
    )
    .unwrap();
    assert_eq!(
        car.attribute("car_type"),
        Some(Value::Enum(enums::car_type().by_name("NONE").unwrap()))
    );

    let user = build(
        &Value::Map(attrs([
            ("username", Value::from("jdoe")),
            (
                "address",
                Value::Map(attrs([
                    ("street", Value::from("Main Street")),
                    ("house_number", Value::Int(1)),
                    ("city", Value::from("Monaco")),
                ])),
            ),
            ("birthday", Value::from("2000-01-01")),
            ("gender", Value::None),
        ])),
        records::user().into(),
    )
    .unwrap();
    assert_eq!(user.attribute("gender"), Some(Value::None));
}

#[test]
fn test_none_default_versus_missing_default() {
    let cls: TypeShape = records::default_factory_class().into();
    let err = build(&Value::Map(Attributes::new()), cls.clone()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DefaultFactory);

    let result = build(&Value::Map(attrs([("no_default", Value::from("set"))])), cls).unwrap();
    assert_eq!(result.attribute("none_default"), Some(Value::None));
    assert_eq!(result.attribute("string_default"), Some(Value::from("string")));
    assert_eq!(result.attribute("list_factory"), Some(Value::List(vec![])));
}

#[test]
fn test_optional_record_goes_through_union_before_record() {
    let airplane: Field = FieldIterator::with_scope(&records::flight().into(), &test_fixtures::scope())
        .unwrap()
        .find(|f| f.name == "airplane")
        .unwrap();
    assert_eq!(ShapeKind::of(&airplane.ty), ShapeKind::Union);

    let mut union = MockClassFactory::new();
    union
        .expect_process()
        .times(1)
        .returning(|obj, field, factories| {
            let narrowed = field.narrowed(field.ty.informative_members()[0]);
            factories.delegate(ShapeKind::Record, obj, &narrowed)
        });
    let mut record = MockClassFactory::new();
    record
        .expect_process()
        .withf(|_, field, _| matches!(field.ty, TypeShape::Record(_)))
        .times(1)
        .returning(|_, _, _| Ok(Value::from("record")));

    let factories = FactoryClasses::builder()
        .standard_factories()
        .class_factory(ShapeKind::Union, union)
        .class_factory(ShapeKind::Record, record)
        .build();
    let source = Value::Map(attrs([("airplane", Value::Map(Attributes::new()))]));
    assert_eq!(
        factories.dispatch(&source, &airplane).unwrap(),
        Value::from("record")
    );
}

#[test]
fn test_field_iteration_is_restartable() {
    let cls: TypeShape = records::flight().into();
    let scope = test_fixtures::scope();
    let first: Vec<Field> = FieldIterator::with_scope(&cls, &scope).unwrap().collect();
    let second: Vec<Field> = FieldIterator::with_scope(&cls, &scope).unwrap().collect();
    assert_eq!(first, second);

    let mut iterator = FieldIterator::with_scope(&cls, &scope).unwrap();
    let drained: Vec<Field> = iterator.by_ref().collect();
    assert_eq!(iterator.next(), None);
    assert_eq!(iterator.restart().collect::<Vec<_>>(), drained);
}
