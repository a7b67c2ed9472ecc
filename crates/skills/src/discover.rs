use std::path::{Path, PathBuf};

use {async_trait::async_trait, tracing::warn};

use crate::{
    error::{Error, Result},
    types::{SKILL_MD, SkillEntry},
};

/// Produces the list of installable skills.
#[async_trait]
pub trait SkillDiscoverer: Send + Sync {
    /// Scan the source and return every skill found, in enumeration order.
    async fn discover(&self) -> Result<Vec<SkillEntry>>;
}

/// Scans a bundled tree laid out as `<root>/<plugin>/<skill>/SKILL.md`.
pub struct FsSkillDiscoverer {
    root: PathBuf,
}

impl FsSkillDiscoverer {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl SkillDiscoverer for FsSkillDiscoverer {
    async fn discover(&self) -> Result<Vec<SkillEntry>> {
        let mut entries = Vec::new();

        let mut plugins = match tokio::fs::read_dir(&self.root).await {
            Ok(rd) => rd,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(entries),
            Err(e) => return Err(Error::registry_unreadable(&self.root, e)),
        };

        while let Some(plugin) = plugins
            .next_entry()
            .await
            .map_err(|e| Error::registry_unreadable(&self.root, e))?
        {
            let plugin_dir = plugin.path();
            if !is_dir(&plugin_dir).await {
                continue;
            }
            let plugin_name = plugin.file_name().to_string_lossy().into_owned();
            if let Err(e) = scan_plugin(&plugin_dir, &plugin_name, &mut entries).await {
                warn!(?plugin_dir, %e, "skipping unreadable plugin directory");
            }
        }

        Ok(entries)
    }
}

/// Collect every `<plugin_dir>/<skill>/SKILL.md` into `entries`.
async fn scan_plugin(
    plugin_dir: &Path,
    plugin_name: &str,
    entries: &mut Vec<SkillEntry>,
) -> std::io::Result<()> {
    let mut skills = tokio::fs::read_dir(plugin_dir).await?;
    while let Some(skill) = skills.next_entry().await? {
        let skill_dir = skill.path();
        if !is_dir(&skill_dir).await {
            continue;
        }
        if !is_file(&skill_dir.join(SKILL_MD)).await {
            tracing::debug!(?skill_dir, "no SKILL.md, skipping");
            continue;
        }
        let skill_name = skill.file_name().to_string_lossy().into_owned();
        entries.push(SkillEntry::new(plugin_name, skill_name, skill_dir));
    }
    Ok(())
}

pub(crate) async fn is_dir(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .is_ok_and(|m| m.is_dir())
}

pub(crate) async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .is_ok_and(|m| m.is_file())
}
