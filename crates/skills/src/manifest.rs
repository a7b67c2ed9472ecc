use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Manifest file name inside a scope's skills directory.
pub const MANIFEST_FILE: &str = ".augur-skills.json";

// ── Manifest contents ────────────────────────────────────────────────────────

/// Which plugin installed each skill directory in one scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallManifest {
    pub version: u32,
    #[serde(default)]
    pub skills: Vec<InstalledSkill>,
}

impl Default for InstallManifest {
    fn default() -> Self {
        Self {
            version: 1,
            skills: Vec::new(),
        }
    }
}

/// One installed skill directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstalledSkill {
    /// Directory name under the skills dir.
    pub name: String,
    pub plugin: String,
    pub skill: String,
    pub installed_at_ms: u64,
}

impl InstallManifest {
    /// Record an install, replacing any earlier record for the same directory.
    pub fn record(&mut self, entry: InstalledSkill) {
        self.remove(&entry.name);
        self.skills.push(entry);
    }

    pub fn remove(&mut self, name: &str) {
        self.skills.retain(|s| s.name != name);
    }

    pub fn find(&self, name: &str) -> Option<&InstalledSkill> {
        self.skills.iter().find(|s| s.name == name)
    }

    /// Whether directory `name` was installed from `plugin`.
    pub fn owned_by(&self, name: &str, plugin: &str) -> bool {
        self.find(name).is_some_and(|s| s.plugin == plugin)
    }
}

// ── Storage ──────────────────────────────────────────────────────────────────

/// Manifest persistence with atomic writes.
pub struct ManifestStore {
    path: PathBuf,
}

impl ManifestStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Manifest living in `skills_dir`.
    pub fn for_skills_dir(skills_dir: &Path) -> Self {
        Self::new(skills_dir.join(MANIFEST_FILE))
    }

    /// Load manifest from disk, returning a default if missing.
    pub async fn load(&self) -> Result<InstallManifest> {
        let data = match tokio::fs::read_to_string(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(InstallManifest::default());
            },
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&data)?)
    }

    /// Save manifest atomically via temp file + rename.
    pub async fn save(&self, manifest: &InstallManifest) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let tmp = self.path.with_extension("json.tmp");
        let data = serde_json::to_string_pretty(manifest)?;
        tokio::fs::write(&tmp, data).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn installed(name: &str, plugin: &str) -> InstalledSkill {
        InstalledSkill {
            name: name.into(),
            plugin: plugin.into(),
            skill: name.into(),
            installed_at_ms: 42,
        }
    }

    #[tokio::test]
    async fn test_load_missing_returns_default() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ManifestStore::for_skills_dir(tmp.path());
        let m = store.load().await.unwrap();
        assert_eq!(m.version, 1);
        assert!(m.skills.is_empty());
        assert_eq!(store.path(), tmp.path().join(MANIFEST_FILE));
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ManifestStore::for_skills_dir(&tmp.path().join("nested/skills"));

        let mut manifest = InstallManifest::default();
        manifest.record(installed("seo", "web-quality"));
        store.save(&manifest).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded, manifest);
        assert!(!store.path().with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn test_corrupt_manifest_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join(MANIFEST_FILE), "{not json").unwrap();
        assert!(ManifestStore::for_skills_dir(tmp.path()).load().await.is_err());
    }

    #[test]
    fn test_record_replaces_same_directory() {
        let mut m = InstallManifest::default();
        m.record(installed("review", "alpha"));
        m.record(installed("review", "beta"));
        assert_eq!(m.skills.len(), 1);
        assert!(m.owned_by("review", "beta"));
        assert!(!m.owned_by("review", "alpha"));
    }

    #[test]
    fn test_remove_and_owned_by() {
        let mut m = InstallManifest::default();
        m.record(installed("seo", "web-quality"));
        m.record(installed("changelog", "docs"));
        m.remove("seo");
        assert!(m.find("seo").is_none());
        assert!(m.owned_by("changelog", "docs"));
        assert!(!m.owned_by("missing", "docs"));
    }
}
