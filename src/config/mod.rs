//! Main configuration module.
//!
//! Compile-time gameplay constants and the demo driver's runtime settings.
pub mod game;
pub mod settings;
