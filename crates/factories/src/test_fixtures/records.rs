//! Record types and instances.
//!
//! Domain records use the declared convention unless a test is about a
//! specific convention. Wire models (`Api*`) carry enums as plain strings.

use std::collections::BTreeMap;
use std::sync::Arc;

use alpha_domain::{
    Attribute, Attributes, Complex, DateTimeValue, DeclaredField, Property, RecordType, TypeShape,
    Value,
};
use chrono::NaiveDate;

use super::{attrs, enums};
use crate::field::Field;
use crate::field_iterator::FieldIterator;

fn instance(record: Arc<RecordType>, values: Attributes) -> Value {
    Value::Record(record.construct(values).unwrap())
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// =============================================================================
// Addresses and users
// =============================================================================

pub fn address() -> Arc<RecordType> {
    RecordType::declared("Address")
        .field(DeclaredField::new("street", TypeShape::Str))
        .field(DeclaredField::new("house_number", TypeShape::Int))
        .field(DeclaredField::new("city", TypeShape::Str))
        .build()
}

pub fn attrs_address() -> Arc<RecordType> {
    RecordType::attrs("AttrsAddress")
        .attribute(Attribute::new("street", TypeShape::Str))
        .attribute(Attribute::new("house_number", TypeShape::Int))
        .attribute(Attribute::new("city", TypeShape::Str))
        .build()
}

pub fn schema_address() -> Arc<RecordType> {
    RecordType::schema("SchemaAddress")
        .required("street", "str")
        .required("house_number", "int")
        .required("city", "str")
        .build()
}

/// `country` names a type no scope knows.
pub fn attrs_address_incorrect_type() -> Arc<RecordType> {
    RecordType::attrs("AttrsAddressIncorrectType")
        .attribute(Attribute::new("street", TypeShape::Str))
        .attribute(Attribute::new("country", TypeShape::named("Type")))
        .build()
}

pub fn schema_contact() -> Arc<RecordType> {
    RecordType::schema("SchemaContact")
        .required("name", "str")
        .optional("country", "str | None")
        .build()
}

/// Private `_token` is initialised as `token`.
pub fn attrs_session() -> Arc<RecordType> {
    RecordType::attrs("Session")
        .attribute(Attribute::new("user", TypeShape::Str))
        .attribute(Attribute::new("_token", TypeShape::Str))
        .attribute(
            Attribute::new("scopes", TypeShape::list(TypeShape::Str))
                .with_factory(|| Value::List(Vec::new())),
        )
        .build()
}

pub fn car() -> Arc<RecordType> {
    let none = enums::car_type().none_member().unwrap();
    RecordType::declared("Car")
        .field(DeclaredField::new("brand", TypeShape::Str))
        .field(DeclaredField::new("car_type", enums::car_type()).default(none))
        .build()
}

pub fn user() -> Arc<RecordType> {
    let unknown = enums::gender().by_name("UNKNOWN").unwrap();
    RecordType::declared("User")
        .field(DeclaredField::new("username", TypeShape::Str))
        .field(DeclaredField::new("address", address()))
        .field(DeclaredField::new("birthday", TypeShape::Date))
        .field(DeclaredField::new("email", TypeShape::Str).default(""))
        .field(DeclaredField::new("gender", enums::gender()).default(unknown))
        .field(
            DeclaredField::new("cars", TypeShape::list(car().into()))
                .default_factory(|| Value::List(Vec::new())),
        )
        .build()
}

/// Internal user with an `age` computed property.
pub fn response_user() -> Arc<RecordType> {
    RecordType::declared("ResponseUser")
        .field(DeclaredField::new("username", TypeShape::Str))
        .field(DeclaredField::new("email", TypeShape::Str))
        .field(DeclaredField::new("birthday", TypeShape::Date))
        .field(DeclaredField::new("street", TypeShape::Str))
        .field(DeclaredField::new("city", TypeShape::Str))
        .field(DeclaredField::new("gender", enums::gender()))
        .field(DeclaredField::new("workdays", TypeShape::list(TypeShape::Int)))
        .property(Property::new("age", |_| Value::Int(1)))
        .build()
}

pub fn response_user_instance() -> Value {
    instance(
        response_user(),
        attrs([
            ("username", Value::from("jdoe")),
            ("email", Value::from("jdoe@example.com")),
            ("birthday", Value::from(date(2000, 1, 1))),
            ("street", Value::from("Main Street")),
            ("city", Value::from("Monaco")),
            ("gender", Value::from(enums::gender().by_name("MALE").unwrap())),
            ("workdays", Value::from(vec![0, 1, 2, 3, 4])),
        ]),
    )
}

pub fn fake_user_model() -> Arc<RecordType> {
    RecordType::declared("FakeUserModel")
        .field(DeclaredField::new("username", TypeShape::Str))
        .field(DeclaredField::new("email", TypeShape::Str))
        .field(DeclaredField::new("birthday", TypeShape::Date))
        .field(DeclaredField::new("street", TypeShape::Str))
        .field(DeclaredField::new("city", TypeShape::Str))
        .field(DeclaredField::new("gender", TypeShape::Str))
        .build()
}

pub fn api_lesser_user_model() -> Arc<RecordType> {
    RecordType::declared("ApiLesserUserModel")
        .field(DeclaredField::new("username", TypeShape::Str))
        .field(DeclaredField::new("email", TypeShape::Str))
        .build()
}

pub fn api_user_model() -> Arc<RecordType> {
    RecordType::declared("ApiUserModel")
        .field(DeclaredField::new("username", TypeShape::Str))
        .field(DeclaredField::new("email", TypeShape::Str))
        .field(DeclaredField::new("age", TypeShape::Int))
        .field(DeclaredField::new("workdays", TypeShape::list(TypeShape::Int)))
        .build()
}

pub fn default_factory_class() -> Arc<RecordType> {
    RecordType::declared("FakeDefaultFactoryClass")
        .field(DeclaredField::new("no_default", TypeShape::Str))
        .field(DeclaredField::new("none_default", TypeShape::optional(TypeShape::Str)).default(Value::None))
        .field(DeclaredField::new("string_default", TypeShape::Str).default("string"))
        .field(
            DeclaredField::new("date_time", TypeShape::DateTime)
                .default_factory(|| Value::DateTime(DateTimeValue::Naive(chrono::Utc::now().naive_utc()))),
        )
        .field(
            DeclaredField::new("list_factory", TypeShape::list(TypeShape::Str))
                .default_factory(|| Value::List(Vec::new())),
        )
        .build()
}

// =============================================================================
// All supported annotations
// =============================================================================

pub fn fake_dataclass() -> Arc<RecordType> {
    RecordType::declared("FakeDataclass")
        .field(DeclaredField::new("field", TypeShape::Str).default("field"))
        .build()
}

/// One field per annotation form the dispatcher distinguishes.
pub fn all_types() -> Arc<RecordType> {
    let str_list = || TypeShape::list(TypeShape::Str);
    let str_or_int = || TypeShape::union([TypeShape::Str, TypeShape::Int]);
    let dataclass = || TypeShape::from(fake_dataclass());
    let fields = [
        DeclaredField::new("types_list", str_list()),
        DeclaredField::new("typing_list", str_list()),
        DeclaredField::new("types_tuple", TypeShape::tuple(TypeShape::Str)),
        DeclaredField::new("typing_tuple", TypeShape::tuple(TypeShape::Str)),
        DeclaredField::new("types_set", TypeShape::set(TypeShape::Str)),
        DeclaredField::new("typing_set", TypeShape::set(TypeShape::Str)),
        DeclaredField::new("types_dict", TypeShape::map(TypeShape::Str, TypeShape::Str)),
        DeclaredField::new("typing_dict", TypeShape::map(TypeShape::Str, TypeShape::Str)),
        DeclaredField::new("types_list_union", TypeShape::list(str_or_int())),
        DeclaredField::new("typing_list_union", TypeShape::list(str_or_int())),
        DeclaredField::new("enum_list", TypeShape::list(enums::car_type().into())),
        DeclaredField::new("str_list", str_list()),
        DeclaredField::new("optional_list", TypeShape::optional(str_list())).default(Value::None),
        DeclaredField::new("types_union", TypeShape::union([TypeShape::Int, TypeShape::Float])),
        DeclaredField::new("types_union2", TypeShape::union([TypeShape::Int, TypeShape::Float])),
        DeclaredField::new("typing_union", TypeShape::union([TypeShape::Int, TypeShape::Float])),
        DeclaredField::new("optional_dataclass", TypeShape::optional(dataclass())),
        DeclaredField::new("no_str", TypeShape::Str),
        DeclaredField::new("str_", TypeShape::Str),
        DeclaredField::new("int_", TypeShape::Int),
        DeclaredField::new("float_", TypeShape::Float),
        DeclaredField::new("complex_", TypeShape::Complex),
        DeclaredField::new("bool_", TypeShape::Bool),
        DeclaredField::new("date_", TypeShape::Date),
        DeclaredField::new("datetime_", TypeShape::DateTime),
        DeclaredField::new("dataclass_", dataclass()),
        DeclaredField::new("list_dataclass", TypeShape::list(dataclass())),
        DeclaredField::new("no_list_dataclass", TypeShape::list(dataclass())),
        DeclaredField::new("json_patch", TypeShape::Patch),
    ];
    fields
        .into_iter()
        .fold(RecordType::declared("FakeAllTypeClass"), |builder, field| {
            builder.field(field)
        })
        .build()
}

/// An instance whose values deliberately disagree with some annotations,
/// with the fields keyed by name.
pub fn all_types_instance() -> (Value, BTreeMap<String, Field>) {
    let record = all_types();
    let dataclass = || instance(fake_dataclass(), Attributes::new());
    let abc = || Value::from("abc");
    let obj = instance(
        Arc::clone(&record),
        attrs([
            ("types_list", Value::List(vec![abc()])),
            ("typing_list", Value::List(vec![abc()])),
            ("types_tuple", Value::Tuple(vec![abc()])),
            ("typing_tuple", Value::Tuple(vec![abc()])),
            ("types_set", Value::set([abc()])),
            ("typing_set", Value::set([abc()])),
            ("types_dict", Value::Map(attrs([("abc", abc())]))),
            ("typing_dict", Value::Map(attrs([("abc", abc())]))),
            ("types_list_union", Value::List(vec![abc()])),
            ("typing_list_union", Value::List(vec![abc()])),
            (
                "enum_list",
                Value::List(vec![Value::from(
                    enums::car_type().by_name("STATION").unwrap(),
                )]),
            ),
            ("str_list", abc()),
            ("optional_list", Value::None),
            ("types_union", Value::Int(1)),
            ("types_union2", Value::from("1")),
            ("typing_union", Value::Int(1)),
            ("optional_dataclass", dataclass()),
            ("no_str", Value::None),
            ("str_", abc()),
            ("int_", Value::from("1")),
            ("float_", Value::Float(0.1)),
            ("complex_", Value::Complex(Complex::new(1.0, 0.0))),
            ("bool_", Value::Bool(true)),
            ("date_", Value::from(date(1, 1, 1))),
            (
                "datetime_",
                Value::from(DateTimeValue::from_date(date(2024, 1, 1))),
            ),
            ("dataclass_", dataclass()),
            ("list_dataclass", Value::List(vec![dataclass()])),
            ("no_list_dataclass", dataclass()),
            ("json_patch", Value::from("json_patch")),
        ]),
    );
    let fields = FieldIterator::new(&record.into())
        .unwrap()
        .map(|field| (field.name.clone(), field))
        .collect();
    (obj, fields)
}

// =============================================================================
// Tracks
// =============================================================================

pub fn track_point() -> Arc<RecordType> {
    RecordType::declared("TrackPoint")
        .field(DeclaredField::new("id", TypeShape::Int))
        .field(DeclaredField::new("latitude", TypeShape::Float))
        .field(DeclaredField::new("longitude", TypeShape::Float))
        .field(DeclaredField::new("altitude", TypeShape::Float))
        .build()
}

pub fn incomplete_track_point() -> Arc<RecordType> {
    RecordType::declared("IncompleteTrackPoint")
        .field(DeclaredField::new("id", TypeShape::Int))
        .field(DeclaredField::new("latitude", TypeShape::Float))
        .field(DeclaredField::new("longitude", TypeShape::Float))
        .build()
}

pub fn flat_track() -> Arc<RecordType> {
    RecordType::declared("FlatTrack")
        .extends(&track_point())
        .field(DeclaredField::new("name", TypeShape::Str))
        .build()
}

pub fn nested_track() -> Arc<RecordType> {
    RecordType::declared("NestedTrack")
        .field(DeclaredField::new("id", TypeShape::Int))
        .field(DeclaredField::new("name", TypeShape::Str))
        .field(DeclaredField::new("track", track_point()))
        .build()
}

pub fn track() -> Arc<RecordType> {
    RecordType::declared("Track")
        .field(DeclaredField::new("id", TypeShape::Int))
        .field(DeclaredField::new("name", TypeShape::Str))
        .field(DeclaredField::new("tracks", TypeShape::list(track_point().into())))
        .build()
}

pub fn api_track() -> Arc<RecordType> {
    RecordType::declared("ApiTrack")
        .field(DeclaredField::new("id", TypeShape::Int))
        .field(DeclaredField::new("latitude", TypeShape::Float))
        .field(DeclaredField::new("longitude", TypeShape::Float))
        .field(DeclaredField::new("altitude", TypeShape::Float))
        .build()
}

/// Wire model of a flat track without its name.
pub fn api_track_model() -> Arc<RecordType> {
    RecordType::declared("ApiTrackModel")
        .field(DeclaredField::new("id", TypeShape::Int))
        .field(DeclaredField::new("latitude", TypeShape::Float))
        .field(DeclaredField::new("longitude", TypeShape::Float))
        .field(DeclaredField::new("altitude", TypeShape::Float))
        .build()
}

pub fn api_track_object_model() -> Arc<RecordType> {
    RecordType::declared("ApiTrackObjectModel")
        .field(DeclaredField::new("id", TypeShape::Int))
        .field(DeclaredField::new("name", TypeShape::Str))
        .field(DeclaredField::new("track", api_track()))
        .build()
}

pub fn api_track_list_model() -> Arc<RecordType> {
    RecordType::declared("ApiTrackListModel")
        .field(DeclaredField::new("id", TypeShape::Int))
        .field(DeclaredField::new("name", TypeShape::Str))
        .field(DeclaredField::new("tracks", TypeShape::list(api_track().into())))
        .build()
}

fn point_values(id: i64) -> Attributes {
    let coordinate = id as f64 * 1.5;
    attrs([
        ("id", Value::Int(id)),
        ("latitude", Value::Float(coordinate)),
        ("longitude", Value::Float(coordinate)),
        ("altitude", Value::Float(100.0)),
    ])
}

pub fn track_point_instance(id: i64) -> Value {
    instance(track_point(), point_values(id))
}

pub fn api_track_instance(id: i64) -> Value {
    instance(api_track(), point_values(id))
}

pub fn incomplete_track_point_instance() -> Value {
    let mut values = point_values(1);
    values.remove("altitude");
    instance(incomplete_track_point(), values)
}

pub fn flat_track_instance() -> Value {
    let mut values = point_values(2);
    values.insert("name".to_string(), Value::from("flat"));
    instance(flat_track(), values)
}

pub fn nested_track_instance() -> Value {
    instance(
        nested_track(),
        attrs([
            ("id", Value::Int(3)),
            ("name", Value::from("nested")),
            ("track", track_point_instance(1)),
        ]),
    )
}

pub fn track_instance() -> Value {
    instance(
        track(),
        attrs([
            ("id", Value::Int(4)),
            ("name", Value::from("track")),
            (
                "tracks",
                Value::List((1..=3).map(track_point_instance).collect()),
            ),
        ]),
    )
}

// =============================================================================
// Flights
// =============================================================================

pub fn airplane() -> Arc<RecordType> {
    RecordType::declared("Airplane")
        .field(DeclaredField::new("id", TypeShape::Int))
        .field(DeclaredField::new("name", TypeShape::Str))
        .field(DeclaredField::new("ac_type", enums::ac_type()))
        .build()
}

pub fn flight() -> Arc<RecordType> {
    RecordType::declared("Flight")
        .field(DeclaredField::new("id", TypeShape::Int))
        .field(DeclaredField::new("airplane", TypeShape::optional(airplane().into())))
        .field(DeclaredField::new("tracks", TypeShape::list(track_point().into())))
        .build()
}

pub fn api_airplane() -> Arc<RecordType> {
    RecordType::declared("ApiAirplane")
        .field(DeclaredField::new("id", TypeShape::Int))
        .field(DeclaredField::new("name", TypeShape::Str))
        .field(DeclaredField::new("ac_type", TypeShape::Str))
        .build()
}

pub fn api_flight() -> Arc<RecordType> {
    RecordType::declared("ApiFlight")
        .field(DeclaredField::new("id", TypeShape::Int))
        .field(DeclaredField::new("airplane", TypeShape::optional(api_airplane().into())))
        .field(DeclaredField::new("tracks", TypeShape::list(api_track().into())))
        .build()
}

pub fn airplane_instance() -> Value {
    instance(
        airplane(),
        attrs([
            ("id", Value::Int(7)),
            ("name", Value::from("Rescue 1")),
            (
                "ac_type",
                Value::from(enums::ac_type().by_name("HELICOPTER").unwrap()),
            ),
        ]),
    )
}

pub fn flight_instance(airplane: Value) -> Value {
    instance(
        flight(),
        attrs([
            ("id", Value::Int(11)),
            ("airplane", airplane),
            (
                "tracks",
                Value::List((1..=3).map(track_point_instance).collect()),
            ),
        ]),
    )
}
