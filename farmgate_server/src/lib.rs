//! # Farmgate server
//! This module hosts the HTTP frontend for the Farmgate marketplace engine. It is responsible for:
//! * Authenticating requests via Bearer JWTs and extracting the caller's identity and role.
//! * Routing catalog, cart, checkout and order-lifecycle requests to the engine APIs.
//! * Mapping engine errors onto stable HTTP status codes.
//!
//! ## Configuration
//! The server is configured via `FGM_*` environment variables. See [config](config/index.html)
//! for more information.

pub mod auth;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
