//! `list`, `install`, `uninstall`, `validate`, and `bundle`.

use std::path::Path;

use {
    augur_config::Scope,
    augur_skills::{
        bundle, discover::FsSkillDiscoverer, install, paths::ScopeRoots, registry::Registry,
        validate,
    },
    colored::Colorize,
};

use crate::output;

const EMPTY_REGISTRY: &str = "No skills available yet. Plugins will be added in future releases.";

async fn load_registry(skills_dir: &Path) -> anyhow::Result<Registry> {
    let discoverer = FsSkillDiscoverer::new(skills_dir);
    Ok(Registry::from_discoverer(&discoverer).await?)
}

pub async fn handle_list(skills_dir: &Path) -> anyhow::Result<()> {
    let registry = load_registry(skills_dir).await?;
    if registry.is_empty() {
        output::info(EMPTY_REGISTRY);
        return Ok(());
    }

    println!("{}", "\nAvailable Skills:\n".bold());
    let groups = registry.by_plugin();
    for (plugin, skills) in &groups {
        println!("  {}", plugin.cyan());
        for entry in skills {
            println!("    - {}", entry.qualified_name);
        }
        println!();
    }
    println!(
        "{}",
        format!(
            "{} skill(s) across {} plugin(s)\n",
            registry.len(),
            groups.len()
        )
        .dimmed()
    );
    Ok(())
}

pub async fn handle_install(skills_dir: &Path, query: &str, scope: Scope) -> anyhow::Result<()> {
    let registry = load_registry(skills_dir).await?;
    if registry.is_empty() {
        output::warn(EMPTY_REGISTRY);
        return Ok(());
    }

    let matched = registry.select(query);
    if matched.is_empty() {
        output::error(format!("No skills found matching \"{query}\"."));
        output::info("Run 'augur-skills list' to see available skills.");
        return Ok(());
    }

    let target = ScopeRoots::detect()?.skills_dir(scope);
    let results = install::install_skills(&matched, &target).await?;
    for result in &results {
        output::success(format!(
            "Installed {} -> {}",
            result.skill,
            result.target_path.display()
        ));
    }
    output::info(format!(
        "{} skill(s) installed (scope: {scope}).",
        results.len()
    ));
    Ok(())
}

pub async fn handle_uninstall(plugin: &str, scope: Scope) -> anyhow::Result<()> {
    let target = ScopeRoots::detect()?.skills_dir(scope);
    let removed = install::uninstall_plugin(plugin, &target).await?;
    if removed.is_empty() {
        output::warn(format!(
            "No installed skills found for plugin \"{plugin}\" (scope: {scope})."
        ));
        return Ok(());
    }

    for name in &removed {
        output::success(format!("Uninstalled {name}"));
    }
    output::info(format!(
        "{} skill(s) uninstalled (scope: {scope}).",
        removed.len()
    ));
    Ok(())
}

/// Returns `false` when any SKILL.md has errors.
pub fn handle_validate(plugins_dir: &Path) -> anyhow::Result<bool> {
    let report = validate::validate_tree(plugins_dir)?;
    if report.files_checked == 0 {
        output::info("No SKILL.md files found. Skipping validation.");
        return Ok(true);
    }

    for diag in &report.diagnostics {
        let line = format!("{} - {}", diag.path.display(), diag.message);
        match diag.severity {
            validate::Severity::Error => output::error(line),
            validate::Severity::Warning => output::warn(line),
        }
    }

    let errors = report.count(validate::Severity::Error);
    if errors > 0 {
        output::error(format!("{errors} validation error(s) found."));
        return Ok(false);
    }
    output::success(format!(
        "Validated {} SKILL.md file(s). All OK.",
        report.files_checked
    ));
    Ok(true)
}

pub async fn handle_bundle(plugins_dir: &Path, out: &Path) -> anyhow::Result<()> {
    let report = bundle::prepare_bundle(plugins_dir, out).await?;
    if report.plugins.is_empty() {
        output::info(format!("No skills to copy. {} is empty.", out.display()));
        return Ok(());
    }
    for plugin in &report.plugins {
        output::success(format!(
            "Copied {plugin}/skills/ -> {}",
            out.join(plugin).display()
        ));
    }
    output::info(format!("{} skill(s) bundled.", report.skills));
    Ok(())
}
