//! Compiler configuration.
//!
//! Settings are plain serde structs with per-field defaults, so a partial
//! TOML document (or none at all) yields a usable configuration.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{CollisionPolicy, CompilerConfig};
