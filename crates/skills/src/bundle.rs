//! Assemble the bundled skills tree from plugin sources.
//!
//! Plugin sources look like `plugins/<plugin>/skills/<skill>/SKILL.md`; the
//! bundle flattens them to `<bundle_root>/<plugin>/<skill>/SKILL.md`, the
//! layout the registry discovers.

use std::path::Path;

use tracing::info;

use crate::{
    discover::is_dir,
    error::{Context, Error, Result},
    install::copy_dir_recursive,
};

/// What [`prepare_bundle`] copied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BundleReport {
    /// Plugins copied, in enumeration order.
    pub plugins: Vec<String>,
    /// Skill directories copied across all plugins.
    pub skills: usize,
}

/// Recreate `bundle_root` from every `plugins_dir/<plugin>/skills/` directory.
///
/// `bundle_root` is wiped first. Plugins without a `skills/` directory are
/// skipped; a missing `plugins_dir` produces an empty bundle. A
/// `bundle_root` that contains or sits inside `plugins_dir` is refused.
pub async fn prepare_bundle(plugins_dir: &Path, bundle_root: &Path) -> Result<BundleReport> {
    if overlaps(plugins_dir, bundle_root).await {
        return Err(Error::message(format!(
            "refusing to bundle into {}: it overlaps the plugin sources in {}",
            bundle_root.display(),
            plugins_dir.display()
        )));
    }

    match tokio::fs::remove_dir_all(bundle_root).await {
        Ok(()) => {},
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {},
        Err(e) => {
            return Err(e).with_context(|| format!("failed to clear {}", bundle_root.display()));
        },
    }
    tokio::fs::create_dir_all(bundle_root).await?;

    let mut report = BundleReport::default();
    if !is_dir(plugins_dir).await {
        return Ok(report);
    }

    let mut plugins = tokio::fs::read_dir(plugins_dir).await?;
    while let Some(plugin) = plugins.next_entry().await? {
        let skills_src = plugin.path().join("skills");
        if !is_dir(&skills_src).await {
            continue;
        }
        let name = plugin.file_name().to_string_lossy().into_owned();
        let dest = bundle_root.join(&name);
        copy_dir_recursive(&skills_src, &dest).await?;

        let copied = count_dirs(&dest).await?;
        info!(plugin = %name, skills = copied, "bundled plugin skills");
        report.skills += copied;
        report.plugins.push(name);
    }

    Ok(report)
}

/// Whether either existing directory contains the other.
async fn overlaps(plugins_dir: &Path, bundle_root: &Path) -> bool {
    match (
        tokio::fs::canonicalize(plugins_dir).await,
        tokio::fs::canonicalize(bundle_root).await,
    ) {
        (Ok(plugins), Ok(bundle)) => plugins.starts_with(&bundle) || bundle.starts_with(&plugins),
        _ => false,
    }
}

async fn count_dirs(dir: &Path) -> Result<usize> {
    let mut count = 0;
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        if is_dir(&entry.path()).await {
            count += 1;
        }
    }
    Ok(count)
}
