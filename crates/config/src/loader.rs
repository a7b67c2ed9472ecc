use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::{
    error::{Context, Error, Result},
    schema::{AugurConfig, Scope},
};

/// Standard config file names, checked in order.
const CONFIG_FILENAMES: &[&str] = &[
    "augur-skills.toml",
    "augur-skills.yaml",
    "augur-skills.yml",
    "augur-skills.json",
];

/// Overrides `skills_dir`.
pub const ENV_SKILLS_DIR: &str = "AUGUR_SKILLS_DIR";
/// Overrides `default_scope`.
pub const ENV_SCOPE: &str = "AUGUR_SCOPE";

/// Load config from the given path (any supported format).
pub fn load_config(path: &Path) -> Result<AugurConfig> {
    let raw = std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&raw, path)
}

/// Discover and load config from standard locations, then apply env overrides.
///
/// Search order:
/// 1. `./augur-skills.{toml,yaml,yml,json}` (project-local)
/// 2. `~/.config/augur-skills/augur-skills.{toml,yaml,yml,json}` (user-global)
///
/// A broken config file is logged and replaced by defaults.
pub fn discover_and_load() -> AugurConfig {
    let mut config = match find_config_file() {
        Some(path) => {
            debug!(path = %path.display(), "loading config");
            load_config(&path).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "failed to load config, using defaults");
                AugurConfig::default()
            })
        },
        None => {
            debug!("no config file found, using defaults");
            AugurConfig::default()
        },
    };
    apply_env_overrides(&mut config, |name| std::env::var(name).ok());
    config
}

/// Find the first config file in standard locations.
pub fn find_config_file() -> Option<PathBuf> {
    let local = CONFIG_FILENAMES.iter().map(PathBuf::from);
    let global = config_dir()
        .into_iter()
        .flat_map(|dir| CONFIG_FILENAMES.iter().map(move |name| dir.join(name)));
    local.chain(global).find(|p| p.is_file())
}

/// Returns the user-global config directory (`~/.config/augur-skills/`).
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "augur-skills").map(|d| d.config_dir().to_path_buf())
}

/// Apply `AUGUR_SKILLS_DIR` / `AUGUR_SCOPE` using a custom lookup function.
///
/// An unparsable scope is ignored with a warning rather than failing the
/// whole command.
pub fn apply_env_overrides(config: &mut AugurConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(dir) = lookup(ENV_SKILLS_DIR).filter(|v| !v.is_empty()) {
        config.skills_dir = Some(PathBuf::from(dir));
    }
    if let Some(raw) = lookup(ENV_SCOPE).filter(|v| !v.is_empty()) {
        match raw.parse::<Scope>() {
            Ok(scope) => config.default_scope = scope,
            Err(e) => warn!(var = ENV_SCOPE, error = %e, "ignoring env override"),
        }
    }
    if let Some(dir) = config.skills_dir.take() {
        config.skills_dir = Some(expand_home(&dir));
    }
}

/// Expand a leading `~/` to the current user's home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match directories::BaseDirs::new() {
        Some(base) => base.home_dir().join(rest),
        None => path.to_path_buf(),
    }
}

fn parse_config(raw: &str, path: &Path) -> Result<AugurConfig> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    let invalid = || format!("invalid config {}", path.display());
    match ext {
        "toml" => toml::from_str(raw).with_context(invalid),
        "yaml" | "yml" => serde_yaml::from_str(raw).with_context(invalid),
        "json" => serde_json::from_str(raw).with_context(invalid),
        other => Err(Error::UnsupportedFormat {
            extension: other.to_string(),
        }),
    }
}
