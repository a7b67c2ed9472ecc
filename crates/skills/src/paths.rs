use std::path::{Path, PathBuf};

use augur_config::Scope;

use crate::error::{Context, Result};

/// Installed skills live at `<base>/.claude/skills`.
pub const SKILLS_SUBDIR: &str = ".claude/skills";

/// Base directories that scopes resolve against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeRoots {
    pub home: PathBuf,
    pub cwd: PathBuf,
}

impl ScopeRoots {
    pub fn new(home: impl Into<PathBuf>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            home: home.into(),
            cwd: cwd.into(),
        }
    }

    /// Home directory of the invoking user plus the process working directory.
    pub fn detect() -> Result<Self> {
        let base = directories::BaseDirs::new().context("could not determine home directory")?;
        let cwd = std::env::current_dir().context("could not determine working directory")?;
        Ok(Self::new(base.home_dir(), cwd))
    }

    /// Target root for installs in `scope`.
    pub fn skills_dir(&self, scope: Scope) -> PathBuf {
        let base = match scope {
            Scope::User => &self.home,
            Scope::Project => &self.cwd,
        };
        base.join(SKILLS_SUBDIR)
    }
}

/// Candidate locations for the skills tree shipped with the binary.
fn bundled_candidates(exe_dir: &Path) -> Vec<PathBuf> {
    vec![
        exe_dir.join("skills"),
        exe_dir.join("../skills"),
        exe_dir.join("../share/augur-skills/skills"),
    ]
}

/// Resolve the bundled skills root next to the running executable.
///
/// Falls back to the first candidate when none exist; discovery then reports
/// an empty registry.
pub fn default_bundled_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("could not locate executable")?;
    let exe_dir = exe.parent().unwrap_or_else(|| Path::new("."));
    Ok(resolve_bundled_dir(exe_dir))
}

fn resolve_bundled_dir(exe_dir: &Path) -> PathBuf {
    let candidates = bundled_candidates(exe_dir);
    candidates
        .iter()
        .find(|p| p.is_dir())
        .unwrap_or(&candidates[0])
        .clone()
}
