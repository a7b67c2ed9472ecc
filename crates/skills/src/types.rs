use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Separator between plugin and skill in a qualified name.
pub const QUALIFIER: char = ':';

/// Descriptor file every skill directory must contain.
pub const SKILL_MD: &str = "SKILL.md";

// ── Registry entries ─────────────────────────────────────────────────────────

/// One installable skill found in the bundled tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillEntry {
    /// Owning plugin (first directory level under the bundled root).
    pub plugin: String,
    /// Skill directory name (second level).
    pub skill: String,
    /// `plugin:skill`, unique within one registry snapshot.
    pub qualified_name: String,
    /// Absolute path of the skill source directory.
    pub source_path: PathBuf,
}

impl SkillEntry {
    pub fn new(plugin: impl Into<String>, skill: impl Into<String>, source_path: PathBuf) -> Self {
        let plugin = plugin.into();
        let skill = skill.into();
        let qualified_name = format!("{plugin}{QUALIFIER}{skill}");
        Self {
            plugin,
            skill,
            qualified_name,
            source_path,
        }
    }
}

// ── Install results ──────────────────────────────────────────────────────────

/// Outcome of copying one skill into a scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallResult {
    /// Qualified name of the installed skill.
    pub skill: String,
    /// Directory written: `<skills_dir>/<skill>`.
    pub target_path: PathBuf,
}
