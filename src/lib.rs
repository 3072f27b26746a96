//! WebShell: native shell hosting a single embedded web surface.
//!
//! This library crate exposes all modules for use by the binary and integration tests.

pub mod app;
pub mod managers;
pub mod platform;
pub mod services;
pub mod surface;
pub mod types;

#[cfg(feature = "gui")]
pub mod ui;
