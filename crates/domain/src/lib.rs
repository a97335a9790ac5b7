extern crate self as alpha_domain;

// Datetime helpers
pub mod common;

pub mod error;
pub mod identity;
pub mod patch;
pub mod records;
pub mod typing;
pub mod value;

pub use common::{parse_iso8601, try_parse_iso8601, DateTimeValue};
pub use error::DomainError;
pub use identity::{Identity, PasswordCredentials, Token};
pub use patch::{JsonPatch, PatchOp, PatchOperation};
pub use records::{
    Attribute, AttrsDefault, AttrsLayout, DeclaredField, DeclaredLayout, DefaultFn, Property,
    Record, RecordLayout, RecordType, SchemaLayout, SchemaProperty,
};
pub use typing::{EnumMember, EnumType, TypeScope, TypeShape, NONE_MEMBER};
pub use value::{Attributes, Complex, EnumLiteral, EnumValue, Object, Value};
