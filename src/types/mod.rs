// WebShell shared type definitions
// Each submodule defines types used across the application.

pub mod config;
pub mod download;
pub mod errors;
pub mod navigation;
pub mod picker;
pub mod popup;
