//! Skill bundles: discovery, selection, installation, and removal.
//!
//! Bundled skills live under `<root>/<plugin>/<skill>/SKILL.md`. Installing a
//! skill copies its directory into a scope's `.claude/skills/<skill>`.

pub mod bundle;
pub mod discover;
pub mod error;
pub mod install;
pub mod manifest;
pub mod parse;
pub mod paths;
pub mod registry;
pub mod select;
pub mod types;
pub mod validate;

pub use {
    error::{Error, Result},
    types::{InstallResult, SkillEntry},
};
