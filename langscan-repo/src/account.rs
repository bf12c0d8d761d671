//! Account-wide aggregation
//!
//! Scans every public repository of an account with bounded fan-out, merging
//! the per-repository reports into one. A repository that fails or runs past
//! its time budget is skipped and surfaced through `skippedRepos` rather than
//! failing the whole aggregation.

use std::sync::Arc;

use langscan_core::{
    process_concurrently, with_timeout, LangscanConfig, LangscanResult, Report,
};
use tracing::{info, warn};

use crate::detector::{aggregate, merge_reports};
use crate::fetcher::{parse_repo_url, RepoFetcher};
use crate::filter::ExcludePatterns;

/// Aggregates language inventories across all repositories of an account.
pub struct AccountAggregator {
    fetcher: Arc<RepoFetcher>,
    max_concurrent_repos: usize,
    repo_timeout_ms: u64,
}

impl AccountAggregator {
    pub fn new(fetcher: RepoFetcher, config: &LangscanConfig) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            max_concurrent_repos: config.max_concurrent_repos,
            repo_timeout_ms: config.repo_timeout_secs * 1_000,
        }
    }

    /// Scan every repository of `username` and merge the results.
    ///
    /// A listing failure aborts the aggregation; per-repository failures only
    /// increment the skipped count.
    pub async fn aggregate_account(
        &self,
        username: &str,
        patterns: &ExcludePatterns,
    ) -> LangscanResult<Report> {
        let urls = self.fetcher.client().list_account_repos(username).await?;
        info!("Account {} lists {} repositories", username, urls.len());

        let mut targets = Vec::with_capacity(urls.len());
        let mut skipped = 0u64;
        for url in urls {
            match parse_repo_url(&url) {
                Ok(target) => targets.push(target),
                Err(e) => {
                    warn!("Skipping unparseable repository URL {}: {}", url, e);
                    skipped += 1;
                }
            }
        }

        let fetcher = Arc::clone(&self.fetcher);
        let patterns = patterns.clone();
        let timeout_ms = self.repo_timeout_ms;

        let results = process_concurrently(
            targets,
            self.max_concurrent_repos,
            move |(owner, repo)| {
                let fetcher = Arc::clone(&fetcher);
                let patterns = patterns.clone();
                async move {
                    let label = format!("{}/{}", owner, repo);
                    let snapshot =
                        with_timeout(fetcher.fetch(&owner, &repo), timeout_ms, &label).await??;
                    Ok(aggregate(
                        &snapshot.files,
                        snapshot.manifest.as_ref(),
                        &patterns,
                    ))
                }
            },
        )
        .await;

        let mut combined = Report::default();
        for result in results {
            match result {
                Ok(report) => merge_reports(&mut combined, report),
                Err(e) => {
                    warn!("Skipping repository after failure: {}", e);
                    skipped += 1;
                }
            }
        }

        combined.skipped_repos += skipped;
        if skipped > 0 {
            info!("Skipped {} repositories for account {}", skipped, username);
        }

        Ok(combined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{HostingApiClient, RepositoryMetadata, TreeEntry};
    use crate::cache::SnapshotCache;
    use async_trait::async_trait;
    use langscan_core::LangscanError;

    /// Serves two healthy repositories and one that always errors.
    struct AccountClient;

    #[async_trait]
    impl HostingApiClient for AccountClient {
        async fn get_repository_metadata(
            &self,
            _owner: &str,
            repo: &str,
        ) -> LangscanResult<RepositoryMetadata> {
            if repo == "broken" {
                return Err(LangscanError::Api {
                    status: 500,
                    message: "server error".to_string(),
                    context: langscan_core::ErrorContext::new("test"),
                });
            }
            Ok(RepositoryMetadata {
                name: repo.to_string(),
                default_branch: "main".to_string(),
                pushed_at: "2024-05-01T12:00:00Z".to_string(),
                private: false,
            })
        }

        async fn get_file_tree(
            &self,
            _owner: &str,
            repo: &str,
            _branch: &str,
        ) -> LangscanResult<Vec<TreeEntry>> {
            let (path, size) = match repo {
                "alpha" => ("src/main.js", 1000),
                _ => ("lib/core.py", 3000),
            };
            Ok(vec![TreeEntry {
                path: path.to_string(),
                size: Some(size),
                url: None,
            }])
        }

        async fn get_blob_content(&self, _url: &str) -> LangscanResult<String> {
            Ok("{}".to_string())
        }

        async fn list_account_repos(&self, _username: &str) -> LangscanResult<Vec<String>> {
            Ok(vec![
                "https://github.com/octo/alpha".to_string(),
                "https://github.com/octo/beta".to_string(),
                "https://github.com/octo/broken".to_string(),
            ])
        }

        async fn get_token_owner(&self) -> LangscanResult<Option<String>> {
            Ok(Some("octo".to_string()))
        }
    }

    #[tokio::test]
    async fn test_account_aggregation_skips_failing_repos() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher =
            RepoFetcher::with_client(Box::new(AccountClient), SnapshotCache::new(dir.path()));
        let aggregator = AccountAggregator::new(fetcher, &LangscanConfig::default());

        let patterns = ExcludePatterns::new::<&str>(&[]).unwrap();
        let report = aggregator.aggregate_account("octo", &patterns).await.unwrap();

        assert_eq!(report.skipped_repos, 1);
        assert_eq!(report.totals.total_files, 2);
        assert_eq!(report.totals.language_bytes, 4000);
        assert_eq!(
            report.languages["JavaScript"].bytes_percent.as_deref(),
            Some("25.00")
        );
        assert_eq!(
            report.languages["Python"].bytes_percent.as_deref(),
            Some("75.00")
        );
    }

    #[tokio::test]
    async fn test_account_with_no_repositories() {
        struct EmptyClient;

        #[async_trait]
        impl HostingApiClient for EmptyClient {
            async fn get_repository_metadata(
                &self,
                _owner: &str,
                _repo: &str,
            ) -> LangscanResult<RepositoryMetadata> {
                unreachable!()
            }

            async fn get_file_tree(
                &self,
                _owner: &str,
                _repo: &str,
                _branch: &str,
            ) -> LangscanResult<Vec<TreeEntry>> {
                unreachable!()
            }

            async fn get_blob_content(&self, _url: &str) -> LangscanResult<String> {
                unreachable!()
            }

            async fn list_account_repos(&self, _username: &str) -> LangscanResult<Vec<String>> {
                Ok(vec![])
            }

            async fn get_token_owner(&self) -> LangscanResult<Option<String>> {
                Ok(None)
            }
        }

        let dir = tempfile::tempdir().unwrap();
        let fetcher =
            RepoFetcher::with_client(Box::new(EmptyClient), SnapshotCache::new(dir.path()));
        let aggregator = AccountAggregator::new(fetcher, &LangscanConfig::default());

        let patterns = ExcludePatterns::new::<&str>(&[]).unwrap();
        let report = aggregator.aggregate_account("ghost", &patterns).await.unwrap();

        assert_eq!(report.skipped_repos, 0);
        assert_eq!(report.totals.total_files, 0);
        assert!(report.languages.is_empty());
    }
}
