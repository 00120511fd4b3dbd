//! Interface layer between HTTP clients and the domain services.
//!
//! Handlers deserialize requests, call the matching domain service and map
//! errors onto status codes; no business logic lives here.

pub mod rest;
