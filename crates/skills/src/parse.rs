use serde::Deserialize;

use crate::error::{Error, Result};

/// Fields of SKILL.md frontmatter this tool looks at. Everything else is
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SkillFrontmatter {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub version: Option<String>,
    #[serde(default)]
    pub plugin: Option<String>,
}

/// Parse the frontmatter block of a SKILL.md file.
pub fn parse_frontmatter(content: &str) -> Result<SkillFrontmatter> {
    let (frontmatter, _body) = split_frontmatter(content)?;
    if frontmatter.is_empty() {
        return Ok(SkillFrontmatter::default());
    }
    serde_yaml::from_str(&frontmatter).map_err(|e| Error::invalid_frontmatter(e.to_string()))
}

/// Like [`parse_frontmatter`], but falls back to plain `key: value` lines
/// when the block is not valid YAML.
///
/// Skill descriptions often contain an unquoted colon (`Use when: ...`),
/// which YAML rejects. Each line is split at its first `:`; everything after
/// it, surrounding quotes aside, is the value.
pub fn parse_frontmatter_lenient(content: &str) -> Result<SkillFrontmatter> {
    let (frontmatter, _body) = split_frontmatter(content)?;
    if frontmatter.is_empty() {
        return Ok(SkillFrontmatter::default());
    }
    match serde_yaml::from_str(&frontmatter) {
        Ok(fm) => Ok(fm),
        Err(e) => {
            tracing::debug!(error = %e, "frontmatter is not YAML, reading key: value lines");
            Ok(frontmatter_from_lines(&frontmatter))
        },
    }
}

fn frontmatter_from_lines(frontmatter: &str) -> SkillFrontmatter {
    let mut fm = SkillFrontmatter::default();
    for line in frontmatter.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = unquote(value.trim()).to_string();
        let slot = match key.trim() {
            "name" => &mut fm.name,
            "description" => &mut fm.description,
            "version" => &mut fm.version,
            "plugin" => &mut fm.plugin,
            _ => continue,
        };
        *slot = Some(value);
    }
    fm
}

fn unquote(value: &str) -> &str {
    ['"', '\'']
        .iter()
        .find_map(|q| value.strip_prefix(*q).and_then(|v| v.strip_suffix(*q)))
        .unwrap_or(value)
}

/// Whether the file text carries a `plugin: <name>` reference.
///
/// Plain substring check over the whole file, not a parsed lookup.
pub fn references_plugin(content: &str, plugin: &str) -> bool {
    content.contains(&format!("plugin: {plugin}"))
}

/// Split SKILL.md content at `---` delimiters into (frontmatter, body).
pub fn split_frontmatter(content: &str) -> Result<(String, String)> {
    let trimmed = content.trim_start();
    let Some(after_open) = trimmed.strip_prefix("---") else {
        return Err(Error::invalid_frontmatter(
            "SKILL.md must start with frontmatter delimited by ---",
        ));
    };

    let close_pos = after_open.find("\n---").ok_or_else(|| {
        Error::invalid_frontmatter("SKILL.md missing closing --- for frontmatter")
    })?;

    let frontmatter = after_open[..close_pos].trim().to_string();
    let body = after_open[close_pos + 4..].trim().to_string();
    Ok((frontmatter, body))
}

/// Accept `version: 2` (a YAML number) as well as `version: "2.0.0"`.
fn scalar_as_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_yaml::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_yaml::Value::String(s)) => Some(s),
        Some(serde_yaml::Value::Number(n)) => Some(n.to_string()),
        Some(serde_yaml::Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frontmatter_fields() {
        let content = "---\nname: seo\ndescription: Audit SEO\nversion: 1.2.0\nplugin: web-quality\nextra: ignored\n---\n# SEO\n";
        let fm = parse_frontmatter(content).unwrap();
        assert_eq!(fm.name.as_deref(), Some("seo"));
        assert_eq!(fm.description.as_deref(), Some("Audit SEO"));
        assert_eq!(fm.version.as_deref(), Some("1.2.0"));
        assert_eq!(fm.plugin.as_deref(), Some("web-quality"));
    }

    #[test]
    fn test_numeric_version_is_stringified() {
        let fm = parse_frontmatter("---\nname: a\nversion: 2\n---\n").unwrap();
        assert_eq!(fm.version.as_deref(), Some("2"));
    }

    #[test]
    fn test_missing_frontmatter() {
        assert!(matches!(
            parse_frontmatter("# Just markdown"),
            Err(Error::InvalidFrontmatter { .. })
        ));
    }

    #[test]
    fn test_missing_closing_delimiter() {
        assert!(parse_frontmatter("---\nname: test\nno closing\n").is_err());
    }

    #[test]
    fn test_split_returns_body() {
        let (fm, body) = split_frontmatter("---\nname: x\n---\n\nBody text.\n").unwrap();
        assert_eq!(fm, "name: x");
        assert_eq!(body, "Body text.");
    }

    #[test]
    fn test_lenient_accepts_colon_in_value() {
        let content = "---\nname: audit\ndescription: Use when: auditing pages\nversion: '1.0.0'\nnotes\n---\n";
        assert!(parse_frontmatter(content).is_err());

        let fm = parse_frontmatter_lenient(content).unwrap();
        assert_eq!(fm.name.as_deref(), Some("audit"));
        assert_eq!(fm.description.as_deref(), Some("Use when: auditing pages"));
        assert_eq!(fm.version.as_deref(), Some("1.0.0"));
        assert_eq!(fm.plugin, None);
    }

    #[test]
    fn test_lenient_prefers_yaml_when_valid() {
        let fm = parse_frontmatter_lenient("---\nname: a\ndescription: \"x: y\"\nversion: 2\n---\n").unwrap();
        assert_eq!(fm.description.as_deref(), Some("x: y"));
        assert_eq!(fm.version.as_deref(), Some("2"));
    }

    #[test]
    fn test_references_plugin() {
        let content = "---\nname: some-skill\nplugin: web-quality\n---";
        assert!(references_plugin(content, "web-quality"));
        assert!(!references_plugin(content, "different"));
        assert!(!references_plugin("---\nplugin: different\n---", "myplugin"));
    }
}
