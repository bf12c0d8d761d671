//! Remote repository snapshot fetching
//!
//! Resolves a repository URL to its file inventory through the hosting API,
//! shielded by a push-time-keyed snapshot cache so unchanged repositories
//! never hit the tree endpoint twice.

use chrono::Utc;
use langscan_core::{validation_error, FileRecord, LangscanConfig, LangscanResult, RepoSnapshot};
use serde_json::json;
use tracing::{debug, info, warn};
use url::Url;

use crate::api::{ApiClientConfig, GitHubApiClient, HostingApiClient};
use crate::cache::SnapshotCache;

/// Parse a GitHub repository URL into its owner and repository name.
pub fn parse_repo_url(repo_url: &str) -> LangscanResult<(String, String)> {
    let parsed = Url::parse(repo_url)
        .map_err(|_| validation_error!(format!("Invalid repository URL: {}", repo_url), "url", "url_parser"))?;

    match parsed.host_str() {
        Some("github.com") | Some("www.github.com") => {}
        _ => {
            return Err(validation_error!(
                format!("Unsupported repository host: {}", repo_url),
                "url",
                "url_parser"
            ));
        }
    }

    let mut segments = parsed
        .path_segments()
        .ok_or_else(|| validation_error!(format!("Invalid repository URL: {}", repo_url), "url", "url_parser"))?
        .filter(|s| !s.is_empty());

    let owner = segments
        .next()
        .ok_or_else(|| validation_error!(format!("Missing owner in URL: {}", repo_url), "url", "url_parser"))?
        .to_string();
    let repo = segments
        .next()
        .ok_or_else(|| {
            validation_error!(format!("Missing repository name in URL: {}", repo_url), "url", "url_parser")
        })?
        .trim_end_matches(".git")
        .to_string();

    if owner.is_empty() || repo.is_empty() {
        return Err(validation_error!(
            format!("Invalid repository URL: {}", repo_url),
            "url",
            "url_parser"
        ));
    }

    Ok((owner, repo))
}

/// Fetches repository snapshots, consulting the cache first.
pub struct RepoFetcher {
    client: Box<dyn HostingApiClient>,
    cache: SnapshotCache,
}

impl RepoFetcher {
    /// Create a fetcher backed by the GitHub API.
    pub fn new(config: &LangscanConfig, access_token: Option<String>) -> LangscanResult<Self> {
        let api_config = ApiClientConfig::github(access_token)
            .with_base_url(&config.api_base_url)
            .with_timeout(config.request_timeout_secs)
            .with_page_size(config.page_size);

        Ok(Self {
            client: Box::new(GitHubApiClient::new(api_config)?),
            cache: SnapshotCache::new(&config.cache_dir),
        })
    }

    /// Create a fetcher with an explicit client, used by tests.
    pub fn with_client(client: Box<dyn HostingApiClient>, cache: SnapshotCache) -> Self {
        Self { client, cache }
    }

    /// Access the underlying API client.
    pub fn client(&self) -> &dyn HostingApiClient {
        self.client.as_ref()
    }

    /// Fetch a snapshot of the repository's file inventory.
    ///
    /// A cached snapshot is reused as long as the repository's last-push
    /// timestamp has not moved. Otherwise the full tree is re-fetched and the
    /// cache entry replaced.
    pub async fn fetch(&self, owner: &str, repo: &str) -> LangscanResult<RepoSnapshot> {
        let metadata = self.client.get_repository_metadata(owner, repo).await?;

        if let Some(cached) = self.cache.read(owner, repo) {
            if cached.is_fresh(&metadata.pushed_at) {
                info!("Using cached snapshot for {}/{}", owner, repo);
                return Ok(cached);
            }
            debug!(
                "Cache stale for {}/{}: pushed {} vs cached {}",
                owner, repo, metadata.pushed_at, cached.pushed_at
            );
        }

        info!("Fetching fresh snapshot for {}/{}", owner, repo);

        let tree = self
            .client
            .get_file_tree(owner, repo, &metadata.default_branch)
            .await?;

        let mut files = Vec::with_capacity(tree.len());
        let mut manifest_url = None;

        for entry in tree {
            if entry.path == "package.json" {
                manifest_url = entry.url.clone();
            }
            files.push(FileRecord::new(entry.path, entry.size.unwrap_or(0)));
        }

        let manifest = match manifest_url {
            Some(url) => Some(self.fetch_manifest(&url).await),
            None => None,
        };

        let snapshot = RepoSnapshot {
            owner: owner.to_string(),
            repo: repo.to_string(),
            pushed_at: metadata.pushed_at,
            scanned_at: Utc::now(),
            files,
            manifest,
        };

        if let Err(e) = self.cache.write(&snapshot) {
            warn!("Failed to write cache for {}/{}: {}", owner, repo, e);
        }

        Ok(snapshot)
    }

    /// Fetch and parse the repository's package manifest. Any failure, from
    /// the network down to malformed JSON, degrades to the invalid sentinel
    /// so framework detection is skipped rather than the whole scan aborted.
    async fn fetch_manifest(&self, url: &str) -> serde_json::Value {
        match self.client.get_blob_content(url).await {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(value) => value,
                Err(e) => {
                    warn!("Manifest is not valid JSON: {}", e);
                    json!({ "invalid": true })
                }
            },
            Err(e) => {
                warn!("Failed to fetch manifest: {}", e);
                json!({ "invalid": true })
            }
        }
    }
}
