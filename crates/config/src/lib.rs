//! Configuration loading, validation, and env substitution.
//!
//! Config files: `offduty.toml`, `offduty.yaml`, or `offduty.json`
//! Searched in `./` then `~/.config/offduty/`.
//!
//! Supports `${ENV_VAR}` substitution in all string values.

pub mod env_subst;
pub mod loader;
pub mod schema;
pub mod validate;

pub use {
    loader::{LoadError, config_dir, discover_and_load, load_config},
    schema::{
        CommandsConfig, EnforcementConfig, EnforcementMode, OffdutyConfig, RepliesConfig,
    },
    validate::{Diagnostic, Severity, ValidationResult, check_unknown_keys, validate},
};
