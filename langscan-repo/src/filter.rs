//! File exclusion policy
//!
//! Decides which files are skipped before classification: well-known
//! metadata/lockfiles, anything that looks like configuration, vendored or
//! generated path segments, and caller-supplied glob patterns. The
//! heuristics are intentionally coarse; skewing percentages with vendored or
//! config content is worse than the occasional false positive.

use glob::Pattern;
use langscan_core::{ErrorContext, LangscanError, LangscanResult};

/// Non-source filenames that are never counted, matched case-insensitively
/// against the basename.
static IGNORED_FILES: &[&str] = &[
    "package.json",
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    ".gitignore",
];

/// Caller-supplied glob exclusion patterns, compiled once.
#[derive(Debug, Clone, Default)]
pub struct ExcludePatterns {
    raw: Vec<String>,
    compiled: Vec<Pattern>,
}

impl ExcludePatterns {
    /// Compile a pattern list. An invalid glob fails the whole set, before
    /// any scanning starts.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> LangscanResult<Self> {
        let mut raw = Vec::with_capacity(patterns.len());
        let mut compiled = Vec::with_capacity(patterns.len());

        for pattern in patterns {
            let pattern = pattern.as_ref().trim();
            if pattern.is_empty() {
                continue;
            }
            match Pattern::new(pattern) {
                Ok(p) => {
                    raw.push(pattern.to_string());
                    compiled.push(p);
                }
                Err(e) => {
                    return Err(LangscanError::Validation {
                        message: format!("Invalid glob pattern '{}': {}", pattern, e),
                        field: Some("exclude".to_string()),
                        context: ErrorContext::new("exclude_patterns")
                            .with_operation("compile")
                            .with_suggestion("Use glob syntax like '*.md' or 'src/**/*.js'"),
                    });
                }
            }
        }

        Ok(Self { raw, compiled })
    }

    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.raw
    }

    /// Whether any pattern matches the full path or the basename alone, so
    /// `*.md` catches files in subdirectories too.
    pub fn matches(&self, path: &str, basename: &str) -> bool {
        self.compiled
            .iter()
            .any(|p| p.matches(path) || p.matches(basename))
    }
}

/// Whether a file is excluded from the report.
///
/// `path` is `/`-separated and relative to the scan root.
pub fn should_exclude(path: &str, patterns: &ExcludePatterns) -> bool {
    let basename = path.rsplit('/').next().unwrap_or(path);
    let basename_lower = basename.to_lowercase();

    if IGNORED_FILES.contains(&basename_lower.as_str()) {
        return true;
    }

    // Coarse on purpose: a file named myconfigdata.js is dropped too
    if basename_lower.contains("config") {
        return true;
    }

    if excluded_by_path(path) {
        return true;
    }

    patterns.matches(path, basename)
}

/// Path-level blacklist: hidden entries, dependency dirs, build output,
/// test trees.
fn excluded_by_path(path: &str) -> bool {
    path.starts_with('.')
        || path.contains("node_modules")
        || path.contains("dist")
        || path.contains("/test/")
        || path.contains("tests/")
}
