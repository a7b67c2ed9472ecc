use crate::{discover::SkillDiscoverer, error::Result, select, types::SkillEntry};

/// Snapshot of the bundled skills at one point in time. Never persisted.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: Vec<SkillEntry>,
}

impl Registry {
    pub fn new(entries: Vec<SkillEntry>) -> Self {
        Self { entries }
    }

    /// Populate the snapshot from a discoverer.
    pub async fn from_discoverer(discoverer: &dyn SkillDiscoverer) -> Result<Self> {
        let entries = discoverer.discover().await?;
        tracing::debug!(count = entries.len(), "registry snapshot taken");
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[SkillEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries named by a plugin or `plugin:skill` query.
    pub fn select(&self, query: &str) -> Vec<SkillEntry> {
        select::filter(&self.entries, query)
    }

    /// Group entries by plugin, plugins in first-seen order.
    pub fn by_plugin(&self) -> Vec<(&str, Vec<&SkillEntry>)> {
        let mut groups: Vec<(&str, Vec<&SkillEntry>)> = Vec::new();
        for entry in &self.entries {
            match groups.iter_mut().find(|(plugin, _)| *plugin == entry.plugin) {
                Some((_, skills)) => skills.push(entry),
                None => groups.push((entry.plugin.as_str(), vec![entry])),
            }
        }
        groups
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {
        super::*,
        async_trait::async_trait,
        std::path::PathBuf,
    };

    struct FixedDiscoverer(Vec<SkillEntry>);

    #[async_trait]
    impl SkillDiscoverer for FixedDiscoverer {
        async fn discover(&self) -> Result<Vec<SkillEntry>> {
            Ok(self.0.clone())
        }
    }

    fn entry(plugin: &str, skill: &str) -> SkillEntry {
        SkillEntry::new(plugin, skill, PathBuf::from(format!("/b/{plugin}/{skill}")))
    }

    #[tokio::test]
    async fn test_registry_from_discoverer() {
        let discoverer = FixedDiscoverer(vec![entry("a", "one"), entry("b", "two")]);
        let registry = Registry::from_discoverer(&discoverer).await.unwrap();
        assert_eq!(registry.len(), 2);
        assert!(!registry.is_empty());
        assert_eq!(registry.select("b").len(), 1);
        assert_eq!(registry.select("a:one")[0].skill, "one");
    }

    #[test]
    fn test_by_plugin_groups_in_first_seen_order() {
        let registry = Registry::new(vec![
            entry("web-quality", "seo"),
            entry("docs", "changelog"),
            entry("web-quality", "accessibility"),
        ]);
        let groups = registry.by_plugin();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "web-quality");
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].0, "docs");
    }

    #[test]
    fn test_empty_registry() {
        let registry = Registry::default();
        assert!(registry.is_empty());
        assert!(registry.by_plugin().is_empty());
    }
}
