//! Core data type definitions
//!
//! The normalized report shape shared by every entry mode (remote repository,
//! local directory, account-wide) plus the persisted snapshot format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single file observed in a repository tree or on disk.
///
/// Ephemeral: produced by the walker or the remote fetcher and consumed once
/// by the detector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    /// Path relative to the repository or directory root, `/`-separated
    pub path: String,
    /// File size in bytes
    pub size: u64,
    /// Extension including the leading dot (empty when the file has none)
    pub extension: String,
}

impl FileRecord {
    pub fn new(path: impl Into<String>, size: u64) -> Self {
        let path = path.into();
        let extension = extension_of(&path);
        Self {
            path,
            size,
            extension,
        }
    }

    /// Final path component
    pub fn basename(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

/// Extension of a `/`-separated path, including the leading dot.
///
/// Dotfiles like `.gitignore` have no extension, matching the usual
/// basename/extension split.
pub fn extension_of(path: &str) -> String {
    let basename = path.rsplit('/').next().unwrap_or(path);
    match basename.rfind('.') {
        Some(idx) if idx > 0 => basename[idx..].to_string(),
        _ => String::new(),
    }
}

/// Per-language tally inside a report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageStat {
    pub files: u64,
    pub bytes: u64,
    /// Share of `languageBytes`, two-decimal fixed string. Only present on
    /// primary languages in a finalized report; never stored during
    /// accumulation.
    #[serde(rename = "bytesPercent", skip_serializing_if = "Option::is_none")]
    pub bytes_percent: Option<String>,
}

/// Report totals.
///
/// `total_bytes` always equals `language_bytes + other_bytes`; secondary
/// ("other") bytes count toward the total but not the percentage denominator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub total_files: u64,
    pub language_bytes: u64,
    pub other_bytes: u64,
    pub total_bytes: u64,
}

/// The normalized language-breakdown report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Report {
    /// Detected front-end frameworks, unique, in detection order
    pub frameworks: Vec<String>,
    /// Percentage-eligible languages
    pub languages: BTreeMap<String, LanguageStat>,
    /// Counted but excluded from the percentage denominator
    pub other: BTreeMap<String, LanguageStat>,
    pub totals: Totals,
    /// Repositories dropped from an account-wide merge because their fetch or
    /// scan failed. Zero for single-repository and local reports.
    #[serde(rename = "skippedRepos", default)]
    pub skipped_repos: u64,
}

/// Point-in-time listing of a remote repository, persisted to the snapshot
/// cache and keyed by `(owner, repo)`.
///
/// Reused verbatim while the repository's `pushed_at` is unchanged; any push
/// invalidates the whole snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoSnapshot {
    pub owner: String,
    pub repo: String,
    /// Last-push timestamp as reported by the hosting API, compared for
    /// exact equality only
    pub pushed_at: String,
    pub scanned_at: DateTime<Utc>,
    pub files: Vec<FileRecord>,
    /// Parsed manifest (`package.json`), `{"invalid": true}` when present but
    /// unparseable, `None` when absent
    pub manifest: Option<serde_json::Value>,
}

impl RepoSnapshot {
    /// The sole cache-invalidation rule: a snapshot is fresh only when the
    /// live push timestamp matches the stored one exactly.
    pub fn is_fresh(&self, pushed_at: &str) -> bool {
        self.pushed_at == pushed_at
    }
}
