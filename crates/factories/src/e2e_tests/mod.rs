//! End-to-end conversion tests.
//!
//! These tests run whole conversions through the standard registry:
//! - inbound arguments through the request factory
//! - internal objects onto wire models through the response factory
//! - wire data back into domain records through the model class factory
//!
//! # Running E2E Tests
//!
//! ```bash
//! cargo test -p alpha-factories --lib e2e_tests
//!
//! # With conversion traces
//! RUST_LOG=alpha_factories=trace cargo test -p alpha-factories --lib e2e_tests -- --nocapture
//! ```

mod e2e_helpers;
mod model_flow_tests;

pub use e2e_helpers::*;
