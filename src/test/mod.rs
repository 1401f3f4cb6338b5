//! Shared fixtures and instrumentation for the unit tests.

mod reflectors;

pub use reflectors::{counting_reflector, CountingReflector};
