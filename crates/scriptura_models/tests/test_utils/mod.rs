//! Test utilities for provider tests.

pub mod http_stub;

#[allow(unused_imports)]
pub use http_stub::{CapturedRequest, StubServer};
