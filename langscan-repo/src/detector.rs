//! Language inventory aggregation and framework detection
//!
//! Turns a flat file inventory into a report: byte and file tallies per
//! language, byte-share percentages, and front-end framework indicators read
//! from extensions and the package manifest.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

use langscan_core::{FileRecord, LangscanResult, LanguageStat, Report, Totals};
use tracing::{debug, warn};

use crate::filter::{should_exclude, ExcludePatterns};
use crate::lang::{classify, Classification};
use crate::walker::walk_directory;

/// A front-end framework and the signals that reveal it.
struct FrameworkIndicator {
    name: &'static str,
    /// Manifest dependency names, runtime or dev
    packages: &'static [&'static str],
    /// File extensions unique enough to imply the framework
    extensions: &'static [&'static str],
}

static FRAMEWORK_INDICATORS: LazyLock<Vec<FrameworkIndicator>> = LazyLock::new(|| {
    vec![
        FrameworkIndicator {
            name: "React",
            packages: &["react"],
            extensions: &[".jsx", ".tsx"],
        },
        FrameworkIndicator {
            name: "Next.js",
            packages: &["next"],
            extensions: &[],
        },
        FrameworkIndicator {
            name: "Tailwind CSS",
            packages: &["tailwindcss"],
            extensions: &[],
        },
        FrameworkIndicator {
            name: "Vue",
            packages: &["vue"],
            extensions: &[".vue"],
        },
        FrameworkIndicator {
            name: "Vite",
            packages: &["vite"],
            extensions: &[],
        },
        FrameworkIndicator {
            name: "Svelte",
            packages: &["svelte"],
            extensions: &[".svelte"],
        },
    ]
});

/// Collect dependency names from a package manifest, merging runtime and dev
/// dependencies. A manifest carrying the invalid sentinel yields nothing.
fn manifest_dependencies(manifest: &serde_json::Value) -> Vec<String> {
    if manifest.get("invalid").and_then(|v| v.as_bool()) == Some(true) {
        return Vec::new();
    }

    let mut deps = Vec::new();
    for key in ["dependencies", "devDependencies"] {
        if let Some(map) = manifest.get(key).and_then(|v| v.as_object()) {
            deps.extend(map.keys().cloned());
        }
    }
    deps
}

/// Detect frameworks from file extensions and manifest dependencies.
fn detect_frameworks(
    extensions: &std::collections::BTreeSet<String>,
    manifest: Option<&serde_json::Value>,
) -> Vec<String> {
    let deps = manifest.map(manifest_dependencies).unwrap_or_default();

    let mut found = Vec::new();
    for indicator in FRAMEWORK_INDICATORS.iter() {
        let by_package = indicator
            .packages
            .iter()
            .any(|p| deps.iter().any(|d| d == p));
        let by_extension = indicator
            .extensions
            .iter()
            .any(|e| extensions.contains(*e));

        if by_package || by_extension {
            found.push(indicator.name.to_string());
        }
    }
    found
}

/// Recompute percentage strings for the languages mapping.
///
/// Each percentage is the language's share of bytes across primary languages
/// only; secondary categories never dilute it. An empty languages mapping
/// leaves nothing to annotate.
fn apply_percentages(languages: &mut BTreeMap<String, LanguageStat>, language_bytes: u64) {
    for stat in languages.values_mut() {
        let percent = if language_bytes == 0 {
            "0.00".to_string()
        } else {
            format!("{:.2}", stat.bytes as f64 / language_bytes as f64 * 100.0)
        };
        stat.bytes_percent = Some(percent);
    }
}

/// Aggregate a file inventory into a report.
///
/// Excluded files contribute nothing at all. Unclassified files count toward
/// `totalFiles` but carry no bytes into any bucket.
pub fn aggregate(
    files: &[FileRecord],
    manifest: Option<&serde_json::Value>,
    patterns: &ExcludePatterns,
) -> Report {
    let mut languages: BTreeMap<String, LanguageStat> = BTreeMap::new();
    let mut other: BTreeMap<String, LanguageStat> = BTreeMap::new();
    let mut extensions = std::collections::BTreeSet::new();
    let mut totals = Totals::default();

    for file in files {
        if should_exclude(&file.path, patterns) {
            continue;
        }

        totals.total_files += 1;
        if !file.extension.is_empty() {
            extensions.insert(file.extension.to_lowercase());
        }

        match classify(file.basename(), &file.extension) {
            Some(Classification::Language(name)) => {
                let stat = languages.entry(name.to_string()).or_default();
                stat.files += 1;
                stat.bytes += file.size;
                totals.language_bytes += file.size;
            }
            Some(Classification::Other(name)) => {
                let stat = other.entry(name.to_string()).or_default();
                stat.files += 1;
                stat.bytes += file.size;
                totals.other_bytes += file.size;
            }
            None => {}
        }
    }

    totals.total_bytes = totals.language_bytes + totals.other_bytes;
    apply_percentages(&mut languages, totals.language_bytes);

    let frameworks = detect_frameworks(&extensions, manifest);

    debug!(
        "Aggregated {} files into {} languages and {} other categories",
        totals.total_files,
        languages.len(),
        other.len()
    );

    Report {
        frameworks,
        languages,
        other,
        totals,
        skipped_repos: 0,
    }
}

/// Merge a report into an accumulator, summing stats and unioning frameworks.
///
/// Percentages are recomputed over the merged primary-language byte total, so
/// merging is associative and a language's bytes never shrink.
pub fn merge_reports(accumulator: &mut Report, report: Report) {
    for (name, stat) in report.languages {
        let entry = accumulator.languages.entry(name).or_default();
        entry.files += stat.files;
        entry.bytes += stat.bytes;
    }
    for (name, stat) in report.other {
        let entry = accumulator.other.entry(name).or_default();
        entry.files += stat.files;
        entry.bytes += stat.bytes;
    }

    for framework in report.frameworks {
        if !accumulator.frameworks.contains(&framework) {
            accumulator.frameworks.push(framework);
        }
    }

    accumulator.totals.total_files += report.totals.total_files;
    accumulator.totals.language_bytes += report.totals.language_bytes;
    accumulator.totals.other_bytes += report.totals.other_bytes;
    accumulator.totals.total_bytes =
        accumulator.totals.language_bytes + accumulator.totals.other_bytes;
    accumulator.skipped_repos += report.skipped_repos;

    apply_percentages(&mut accumulator.languages, accumulator.totals.language_bytes);
}

/// Scan a local directory into a report.
///
/// A `package.json` at the directory root feeds framework detection; a
/// malformed one is ignored with a warning.
pub fn scan_directory(root: &Path, patterns: &ExcludePatterns) -> LangscanResult<Report> {
    let files = walk_directory(root)?;

    let manifest_path = root.join("package.json");
    let manifest = if manifest_path.is_file() {
        match std::fs::read_to_string(&manifest_path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(value) => Some(value),
                Err(e) => {
                    warn!("Ignoring malformed package.json: {}", e);
                    None
                }
            },
            Err(e) => {
                warn!("Failed to read package.json: {}", e);
                None
            }
        }
    } else {
        None
    };

    Ok(aggregate(&files, manifest.as_ref(), patterns))
}
