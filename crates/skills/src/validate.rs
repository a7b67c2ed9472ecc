//! Frontmatter checks over a plugin source tree before it is bundled.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use walkdir::WalkDir;

use crate::{
    error::{Error, Result},
    parse::{self, SkillFrontmatter},
    types::SKILL_MD,
};

/// Frontmatter fields every SKILL.md must set.
pub const REQUIRED_FIELDS: &[&str] = &["name", "description", "version"];

/// Severity level for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// A problem found in one SKILL.md.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub path: PathBuf,
    pub message: String,
}

/// Result of validating a tree.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub files_checked: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationReport {
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }
}

/// Check every SKILL.md under `root`. A missing root checks zero files.
pub fn validate_tree(root: &Path) -> Result<ValidationReport> {
    let mut report = ValidationReport::default();
    if !root.is_dir() {
        return Ok(report);
    }

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() || entry.file_name() != SKILL_MD {
            continue;
        }
        report.files_checked += 1;
        let bytes = std::fs::read(entry.path())?;
        match String::from_utf8(bytes) {
            Ok(content) => report
                .diagnostics
                .extend(check_skill_md(&content, entry.path())),
            Err(e) => report.diagnostics.push(Diagnostic {
                severity: Severity::Error,
                path: entry.path().to_path_buf(),
                message: format!("not valid UTF-8: {}", e.utf8_error()),
            }),
        }
    }

    tracing::debug!(
        files = report.files_checked,
        errors = report.count(Severity::Error),
        "validated skills"
    );
    Ok(report)
}

/// Diagnostics for one SKILL.md's text.
pub fn check_skill_md(content: &str, path: &Path) -> Vec<Diagnostic> {
    let error = |message: String| Diagnostic {
        severity: Severity::Error,
        path: path.to_path_buf(),
        message,
    };

    let frontmatter = match parse::parse_frontmatter_lenient(content) {
        Ok(fm) => fm,
        Err(Error::InvalidFrontmatter { reason }) if !content.trim_start().starts_with("---") => {
            return vec![error(format!("missing frontmatter ({reason})"))];
        },
        Err(e) => return vec![error(e.to_string())],
    };

    let mut diagnostics: Vec<Diagnostic> = REQUIRED_FIELDS
        .iter()
        .filter(|field| field_value(&frontmatter, field).is_none_or(|v| v.trim().is_empty()))
        .map(|field| error(format!("missing required field: {field}")))
        .collect();

    if let (Some(name), Some(dir)) = (
        frontmatter.name.as_deref(),
        path.parent().and_then(|p| p.file_name()),
    ) && dir != name
    {
        diagnostics.push(Diagnostic {
            severity: Severity::Warning,
            path: path.to_path_buf(),
            message: format!(
                "name '{name}' differs from directory '{}'",
                dir.to_string_lossy()
            ),
        });
    }

    diagnostics
}

fn field_value<'a>(fm: &'a SkillFrontmatter, field: &str) -> Option<&'a str> {
    match field {
        "name" => fm.name.as_deref(),
        "description" => fm.description.as_deref(),
        "version" => fm.version.as_deref(),
        "plugin" => fm.plugin.as_deref(),
        _ => None,
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn test_valid_tree_has_no_errors() {
        let tmp = tempfile::tempdir().unwrap();
        write(
            tmp.path(),
            "web-quality/skills/seo/SKILL.md",
            "---\nname: seo\ndescription: SEO audit\nversion: 1.0.0\n---\nbody",
        );

        let report = validate_tree(tmp.path()).unwrap();
        assert_eq!(report.files_checked, 1);
        assert!(!report.has_errors());
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn test_reports_missing_fields_and_frontmatter() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "p/skills/a/SKILL.md", "---\nname: a\n---\nbody");
        write(tmp.path(), "p/skills/b/SKILL.md", "# no frontmatter");
        write(tmp.path(), "p/skills/b/README.md", "ignored");

        let report = validate_tree(tmp.path()).unwrap();
        assert_eq!(report.files_checked, 2);
        assert!(report.has_errors());
        assert_eq!(report.count(Severity::Error), 3);
        let messages: Vec<_> = report.diagnostics.iter().map(|d| d.message.as_str()).collect();
        assert!(messages.contains(&"missing required field: description"));
        assert!(messages.contains(&"missing required field: version"));
        assert!(messages.iter().any(|m| m.starts_with("missing frontmatter")));
    }

    #[test]
    fn test_empty_field_counts_as_missing() {
        let diags = check_skill_md(
            "---\nname: x\ndescription: \"\"\nversion: 1\n---\n",
            Path::new("/p/x/SKILL.md"),
        );
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].message, "missing required field: description");
    }

    #[test]
    fn test_name_mismatch_is_warning() {
        let diags = check_skill_md(
            "---\nname: other\ndescription: d\nversion: 1\n---\n",
            Path::new("/p/skills/mine/SKILL.md"),
        );
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].severity, Severity::Warning);
    }

    #[test]
    fn test_colon_inside_value_is_accepted() {
        let diags = check_skill_md(
            "---\nname: x\ndescription: Use when: auditing pages\nversion: 1.0.0\n---\n",
            Path::new("/p/skills/x/SKILL.md"),
        );
        assert!(diags.is_empty(), "{diags:?}");
    }

    #[test]
    fn test_non_utf8_file_is_reported_and_walk_continues() {
        let tmp = tempfile::tempdir().unwrap();
        let bad = tmp.path().join("p/skills/a/SKILL.md");
        std::fs::create_dir_all(bad.parent().unwrap()).unwrap();
        std::fs::write(&bad, b"---\nname: caf\xe9\n---\n").unwrap();
        write(
            tmp.path(),
            "p/skills/b/SKILL.md",
            "---\nname: b\ndescription: d\nversion: 1\n---\n",
        );

        let report = validate_tree(tmp.path()).unwrap();
        assert_eq!(report.files_checked, 2);
        assert_eq!(report.count(Severity::Error), 1);
        assert_eq!(report.diagnostics[0].path, bad);
        assert!(report.diagnostics[0].message.starts_with("not valid UTF-8"));
    }

    #[test]
    fn test_missing_root_checks_nothing() {
        let report = validate_tree(Path::new("/nonexistent/plugins")).unwrap();
        assert_eq!(report.files_checked, 0);
        assert!(!report.has_errors());
    }
}
