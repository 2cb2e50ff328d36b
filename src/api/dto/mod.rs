//! Request/response DTOs for the REST API.

pub mod city;
pub mod import;
pub mod status;
