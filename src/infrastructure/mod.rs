//! Infrastructure layer: concrete store backends.

pub mod persistence;
