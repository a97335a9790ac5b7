//! Common utility functions shared by the value model and the factories.
//!
//! Pure functions only: no side effects, no I/O.

pub mod datetime;

pub use datetime::{parse_iso8601, try_parse_iso8601, DateTimeValue};
