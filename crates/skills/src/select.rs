//! Narrow a registry snapshot to what a user query names.

use crate::types::{QUALIFIER, SkillEntry};

/// A parsed install query: a whole plugin, or one `plugin:skill`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkillQuery {
    Plugin(String),
    Qualified(String),
}

impl SkillQuery {
    pub fn parse(raw: &str) -> Self {
        if raw.contains(QUALIFIER) {
            Self::Qualified(raw.to_string())
        } else {
            Self::Plugin(raw.to_string())
        }
    }

    /// Exact, case-sensitive match.
    pub fn matches(&self, entry: &SkillEntry) -> bool {
        match self {
            Self::Plugin(name) => entry.plugin == *name,
            Self::Qualified(name) => entry.qualified_name == *name,
        }
    }
}

/// Entries matching `query`, in input order. Empty when nothing matches.
pub fn filter(entries: &[SkillEntry], query: &str) -> Vec<SkillEntry> {
    let query = SkillQuery::parse(query);
    entries.iter().filter(|e| query.matches(e)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use {super::*, std::path::PathBuf};

    fn entry(plugin: &str, skill: &str) -> SkillEntry {
        SkillEntry::new(plugin, skill, PathBuf::from(format!("/b/{plugin}/{skill}")))
    }

    fn sample() -> Vec<SkillEntry> {
        vec![
            entry("web-quality", "accessibility"),
            entry("docs", "changelog"),
            entry("web-quality", "seo"),
        ]
    }

    #[test]
    fn plugin_query_keeps_order() {
        let matched = filter(&sample(), "web-quality");
        let names: Vec<_> = matched.iter().map(|e| e.qualified_name.as_str()).collect();
        assert_eq!(names, ["web-quality:accessibility", "web-quality:seo"]);
    }

    #[test]
    fn qualified_query_returns_single_entry() {
        let matched = filter(&sample(), "web-quality:seo");
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].qualified_name, "web-quality:seo");
    }

    #[test]
    fn no_partial_or_case_insensitive_matching() {
        let entries = sample();
        assert!(filter(&entries, "web").is_empty());
        assert!(filter(&entries, "Web-Quality").is_empty());
        assert!(filter(&entries, "web-quality:se").is_empty());
        assert!(filter(&entries, "seo").is_empty());
    }

    #[test]
    fn parse_distinguishes_on_separator() {
        assert_eq!(SkillQuery::parse("docs"), SkillQuery::Plugin("docs".into()));
        assert_eq!(
            SkillQuery::parse("docs:changelog"),
            SkillQuery::Qualified("docs:changelog".into())
        );
    }
}
