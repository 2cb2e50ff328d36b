//! API middleware.

pub mod tracing;
