//! Configuration merge system
//!
//! Implements the 4-layer configuration merge:
//! 1. Built-in defaults
//! 2. Optional TOML file (`--config` or `PLUGIN_CONFIG`)
//! 3. Environment variables (`PLUGIN_*`, `DRONE_OUTPUT`)
//! 4. CLI flags

mod defaults;
mod effective;
pub mod env;
mod merge;
mod settings;

pub use defaults::{BuiltinDefaults, DEFAULT_OUTPUT_PATH, DEFAULT_PATTERN};
pub use effective::{ConfigError, ConfigOrigin, ConfigSource, EffectiveConfig};
pub use env::EnvVars;
pub use merge::{deep_merge, merge_layers};
pub use settings::{ExportConfig, GateConfig};
