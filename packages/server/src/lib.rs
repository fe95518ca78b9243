// Section CSS Purge - API Core
//
// This crate exposes the purge pipeline over HTTP: a form-encoded trigger
// endpoint, a health check, and static serving of the generated files.

pub mod config;
pub mod server;

pub use config::*;
