//! Configuration loading for augur-skills.
//!
//! Config files: `augur-skills.toml`, `augur-skills.yaml`, or `augur-skills.json`,
//! searched in `./` then `~/.config/augur-skills/`. `AUGUR_SKILLS_DIR` and
//! `AUGUR_SCOPE` override whatever the file says.

pub mod error;
pub mod loader;
pub mod schema;

pub use {
    error::{Error, Result},
    loader::{
        apply_env_overrides, config_dir, discover_and_load, expand_home, find_config_file,
        load_config,
    },
    schema::{AugurConfig, ParseScopeError, Scope},
};
