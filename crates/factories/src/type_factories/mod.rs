//! Type factories: value coercers for one concrete target type each.

mod datetime;
mod enumeration;
mod generic;
mod json_patch;

pub use datetime::DatetimeTypeFactory;
pub use enumeration::EnumTypeFactory;
pub use generic::GenericTypeFactory;
pub use json_patch::JsonPatchTypeFactory;
