//! Config schema: where bundled skills live and which scope installs target.

use std::{fmt, path::PathBuf, str::FromStr};

use serde::{Deserialize, Serialize};

/// Where installed skills are written.
///
/// `User` resolves under the home directory, `Project` under the current
/// working directory. Both use the same `.claude/skills` suffix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    #[default]
    User,
    Project,
}

impl Scope {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Project => "project",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a scope string is neither `user` nor `project`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid scope '{0}': expected \"user\" or \"project\"")]
pub struct ParseScopeError(pub String);

impl FromStr for Scope {
    type Err = ParseScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "project" => Ok(Self::Project),
            other => Err(ParseScopeError(other.to_string())),
        }
    }
}

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AugurConfig {
    /// Bundled skills root (`<root>/<plugin>/<skill>/SKILL.md`). When unset the
    /// directory shipped next to the executable is used.
    pub skills_dir: Option<PathBuf>,
    /// Scope used by `install`/`uninstall` when `--scope` is not given.
    pub default_scope: Scope,
}
