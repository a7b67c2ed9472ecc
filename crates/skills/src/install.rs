use std::path::Path;

use tracing::{debug, info, warn};

use crate::{
    discover::{is_dir, is_file},
    error::{Error, Result},
    manifest::{InstallManifest, InstalledSkill, ManifestStore},
    parse,
    types::{InstallResult, SKILL_MD, SkillEntry},
};

/// Copy each entry into `skills_dir/<skill>`, in order.
///
/// An existing destination is replaced wholesale, so a reinstall leaves
/// exactly the source's files behind. Skills with the same directory name
/// from different plugins overwrite each other. The first filesystem error
/// stops the batch; skills already copied stay installed.
pub async fn install_skills(entries: &[SkillEntry], skills_dir: &Path) -> Result<Vec<InstallResult>> {
    let mut results = Vec::with_capacity(entries.len());
    if entries.is_empty() {
        return Ok(results);
    }

    tokio::fs::create_dir_all(skills_dir).await?;

    let store = ManifestStore::for_skills_dir(skills_dir);
    let mut manifest = store.load().await.unwrap_or_else(|e| {
        warn!(path = %store.path().display(), %e, "install manifest unreadable, starting a new one");
        InstallManifest::default()
    });

    for entry in entries {
        let target_path = skills_dir.join(&entry.skill);
        replace_dir(&entry.source_path, &target_path).await?;

        manifest.record(InstalledSkill {
            name: entry.skill.clone(),
            plugin: entry.plugin.clone(),
            skill: entry.skill.clone(),
            installed_at_ms: now_ms(),
        });
        store.save(&manifest).await?;

        info!(skill = %entry.qualified_name, target = %target_path.display(), "installed skill");
        results.push(InstallResult {
            skill: entry.qualified_name.clone(),
            target_path,
        });
    }

    Ok(results)
}

/// Remove every installed skill in `skills_dir` attributable to `plugin`.
///
/// A directory qualifies when it holds a SKILL.md and any of these hold:
/// the file text contains `plugin: <plugin>`, the directory name starts with
/// `plugin`, or the install manifest records it as coming from `plugin`.
/// Returns the removed directory names. A missing `skills_dir` yields nothing.
pub async fn uninstall_plugin(plugin: &str, skills_dir: &Path) -> Result<Vec<String>> {
    let mut removed = Vec::new();
    if plugin.is_empty() {
        warn!("refusing to uninstall with an empty plugin name");
        return Ok(removed);
    }
    if !is_dir(skills_dir).await {
        return Ok(removed);
    }

    let store = ManifestStore::for_skills_dir(skills_dir);
    let mut manifest = match store.load().await {
        Ok(m) => Some(m),
        Err(e) => {
            warn!(path = %store.path().display(), %e, "ignoring unreadable install manifest");
            None
        },
    };

    let outcome = remove_owned(plugin, skills_dir, manifest.as_mut(), &mut removed).await;

    // Records for directories already deleted must go even when the scan
    // stopped early.
    if let Some(m) = manifest
        && !removed.is_empty()
    {
        store.save(&m).await?;
    }

    outcome.map(|()| removed)
}

async fn remove_owned(
    plugin: &str,
    skills_dir: &Path,
    mut manifest: Option<&mut InstallManifest>,
    removed: &mut Vec<String>,
) -> Result<()> {
    let mut dirs = tokio::fs::read_dir(skills_dir).await?;
    while let Some(dir) = dirs.next_entry().await? {
        let dir_path = dir.path();
        if !is_dir(&dir_path).await {
            continue;
        }
        let skill_md = dir_path.join(SKILL_MD);
        if !is_file(&skill_md).await {
            debug!(?dir_path, "no SKILL.md, leaving in place");
            continue;
        }

        let name = dir.file_name().to_string_lossy().into_owned();
        let recorded = manifest.as_deref().is_some_and(|m| m.owned_by(&name, plugin));
        let owned = recorded
            || name.starts_with(plugin)
            || read_lossy(&skill_md)
                .await
                .is_some_and(|content| parse::references_plugin(&content, plugin));
        if !owned {
            continue;
        }

        tokio::fs::remove_dir_all(&dir_path).await?;
        info!(%plugin, skill = %name, "uninstalled skill");
        if let Some(m) = manifest.as_deref_mut() {
            m.remove(&name);
        }
        removed.push(name);
    }
    Ok(())
}

/// SKILL.md text with invalid UTF-8 replaced. An unreadable file is logged
/// and treated as carrying no plugin reference.
async fn read_lossy(path: &Path) -> Option<String> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) => {
            warn!(path = %path.display(), %e, "cannot read SKILL.md");
            None
        },
    }
}

/// Replace `dst` with a recursive copy of `src`.
async fn replace_dir(src: &Path, dst: &Path) -> Result<()> {
    match tokio::fs::symlink_metadata(dst).await {
        Ok(meta) => {
            let same = match (tokio::fs::canonicalize(src).await, tokio::fs::canonicalize(dst).await) {
                (Ok(a), Ok(b)) => a == b,
                _ => false,
            };
            if same {
                return Err(Error::message(format!(
                    "refusing to install {} onto itself",
                    src.display()
                )));
            }
            if meta.is_dir() {
                tokio::fs::remove_dir_all(dst).await?;
            } else {
                tokio::fs::remove_file(dst).await?;
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {},
        Err(e) => return Err(e.into()),
    }
    copy_dir_recursive(src, dst).await
}

pub(crate) async fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<()> {
    tokio::fs::create_dir_all(dst).await?;
    let mut entries = tokio::fs::read_dir(src).await?;
    while let Some(entry) = entries.next_entry().await? {
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());
        if is_dir(&src_path).await {
            Box::pin(copy_dir_recursive(&src_path, &dst_path)).await?;
        } else {
            tokio::fs::copy(&src_path, &dst_path).await?;
        }
    }
    Ok(())
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
        .try_into()
        .unwrap_or(u64::MAX)
}
