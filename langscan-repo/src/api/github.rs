//! GitHub API client implementation

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use langscan_core::{ErrorContext, LangscanError, LangscanResult};
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::{
    create_http_client, handle_response_error, ApiClientConfig, HostingApiClient,
    RepositoryMetadata, TreeEntry,
};

/// GitHub API client
pub struct GitHubApiClient {
    client: reqwest::Client,
    config: ApiClientConfig,
}

/// GitHub repository response
#[derive(Debug, Deserialize)]
struct GitHubRepository {
    name: String,
    default_branch: String,
    pushed_at: String,
    #[serde(default)]
    private: bool,
}

/// GitHub tree response
#[derive(Debug, Deserialize)]
struct GitHubTreeResponse {
    tree: Vec<GitHubTreeItem>,
    truncated: Option<bool>,
}

/// GitHub tree item
#[derive(Debug, Deserialize)]
struct GitHubTreeItem {
    path: String,
    #[serde(rename = "type")]
    item_type: String,
    size: Option<u64>,
    url: Option<String>,
}

/// GitHub blob response
#[derive(Debug, Deserialize)]
struct GitHubBlobResponse {
    content: String,
    encoding: String,
}

/// GitHub repository list item
#[derive(Debug, Deserialize)]
struct GitHubRepoListItem {
    html_url: String,
}

/// GitHub authenticated-user response
#[derive(Debug, Deserialize)]
struct GitHubUser {
    login: String,
}

impl GitHubApiClient {
    /// Create a new GitHub API client
    pub fn new(config: ApiClientConfig) -> LangscanResult<Self> {
        let client = create_http_client(&config)?;

        debug!("Created GitHub API client for {}", config.base_url);

        Ok(Self { client, config })
    }

    /// Create authorization headers
    fn create_auth_headers(&self) -> reqwest::header::HeaderMap {
        let mut headers = reqwest::header::HeaderMap::new();

        if let Some(ref token) = self.config.access_token {
            if let Ok(auth_value) =
                reqwest::header::HeaderValue::from_str(&format!("Bearer {}", token))
            {
                headers.insert(reqwest::header::AUTHORIZATION, auth_value);
            }
        }

        // GitHub API version
        if let Ok(accept_value) =
            reqwest::header::HeaderValue::from_str("application/vnd.github.v3+json")
        {
            headers.insert(reqwest::header::ACCEPT, accept_value);
        }

        headers
    }

    /// Make a GET request to the GitHub API
    async fn get_request(&self, endpoint: &str) -> LangscanResult<reqwest::Response> {
        let url = if endpoint.starts_with("http") {
            endpoint.to_string()
        } else {
            format!(
                "{}/{}",
                self.config.base_url.trim_end_matches('/'),
                endpoint.trim_start_matches('/')
            )
        };

        debug!("Making GitHub API request to: {}", url);

        let response = self
            .client
            .get(&url)
            .headers(self.create_auth_headers())
            .send()
            .await
            .map_err(|e| LangscanError::Network {
                message: format!("Failed to make request to GitHub API: {}", e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("github_api_client").with_operation("get_request"),
            })?;

        if !response.status().is_success() {
            return Err(handle_response_error(response, "github_api_request").await);
        }

        Ok(response)
    }
}

/// Decode base64 content from the GitHub API, tolerating embedded newlines.
pub(crate) fn decode_base64_content(content: &str) -> LangscanResult<String> {
    let cleaned_content = content.replace(['\n', '\r', ' '], "");

    let decoded_bytes = BASE64
        .decode(&cleaned_content)
        .map_err(|e| LangscanError::Repository {
            message: format!("Failed to decode base64 content: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("github_api_client")
                .with_operation("decode_base64_content"),
        })?;

    String::from_utf8(decoded_bytes).map_err(|e| LangscanError::Repository {
        message: format!("Content is not valid UTF-8: {}", e),
        source: Some(Box::new(e)),
        context: ErrorContext::new("github_api_client").with_operation("decode_base64_content"),
    })
}

#[async_trait]
impl HostingApiClient for GitHubApiClient {
    async fn get_repository_metadata(
        &self,
        owner: &str,
        repo: &str,
    ) -> LangscanResult<RepositoryMetadata> {
        debug!("Fetching GitHub repository metadata for {}/{}", owner, repo);

        let endpoint = format!("repos/{}/{}", owner, repo);
        let response = self.get_request(&endpoint).await?;

        let github_repo: GitHubRepository =
            response.json().await.map_err(|e| LangscanError::Repository {
                message: format!("Failed to parse repository metadata: {}", e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("github_api_client")
                    .with_operation("get_repository_metadata"),
            })?;

        Ok(RepositoryMetadata {
            name: github_repo.name,
            default_branch: github_repo.default_branch,
            pushed_at: github_repo.pushed_at,
            private: github_repo.private,
        })
    }

    async fn get_file_tree(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> LangscanResult<Vec<TreeEntry>> {
        info!(
            "Fetching GitHub file tree for {}/{} (branch: {})",
            owner, repo, branch
        );

        let endpoint = format!("repos/{}/{}/git/trees/{}?recursive=1", owner, repo, branch);
        let response = self.get_request(&endpoint).await?;

        let tree_response: GitHubTreeResponse =
            response.json().await.map_err(|e| LangscanError::Repository {
                message: format!("Failed to parse file tree: {}", e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("github_api_client").with_operation("get_file_tree"),
            })?;

        if tree_response.truncated.unwrap_or(false) {
            warn!("GitHub file tree was truncated for {}/{}", owner, repo);
        }

        let entries: Vec<TreeEntry> = tree_response
            .tree
            .into_iter()
            .filter(|item| item.item_type == "blob")
            .map(|item| TreeEntry {
                path: item.path,
                size: item.size,
                url: item.url,
            })
            .collect();

        debug!(
            "Retrieved {} blobs from GitHub repository {}/{}",
            entries.len(),
            owner,
            repo
        );
        Ok(entries)
    }

    async fn get_blob_content(&self, url: &str) -> LangscanResult<String> {
        debug!("Fetching GitHub blob content from {}", url);

        let response = self.get_request(url).await?;

        let blob_response: GitHubBlobResponse =
            response.json().await.map_err(|e| LangscanError::Repository {
                message: format!("Failed to parse blob response: {}", e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("github_api_client").with_operation("get_blob_content"),
            })?;

        if blob_response.encoding != "base64" {
            return Err(LangscanError::Repository {
                message: format!("Unexpected blob encoding: {}", blob_response.encoding),
                source: None,
                context: ErrorContext::new("github_api_client")
                    .with_operation("get_blob_content")
                    .with_suggestion("Expected base64 encoding from GitHub API"),
            });
        }

        decode_base64_content(&blob_response.content)
    }

    async fn list_account_repos(&self, username: &str) -> LangscanResult<Vec<String>> {
        info!("Listing GitHub repositories for account {}", username);

        let per_page = self.config.page_size;
        let mut page = 1usize;
        let mut urls = Vec::new();

        loop {
            let endpoint = format!(
                "users/{}/repos?per_page={}&page={}",
                username, per_page, page
            );
            let response = self.get_request(&endpoint).await?;

            let repos: Vec<GitHubRepoListItem> =
                response.json().await.map_err(|e| LangscanError::Repository {
                    message: format!("Failed to parse repository listing: {}", e),
                    source: Some(Box::new(e)),
                    context: ErrorContext::new("github_api_client")
                        .with_operation("list_account_repos"),
                })?;

            let page_len = repos.len();
            urls.extend(repos.into_iter().map(|r| r.html_url));

            // A short page is the last page
            if page_len < per_page {
                break;
            }
            page += 1;
        }

        debug!("Account {} has {} repositories", username, urls.len());
        Ok(urls)
    }

    async fn get_token_owner(&self) -> LangscanResult<Option<String>> {
        if self.config.access_token.is_none() {
            return Ok(None);
        }

        let user: GitHubUser = self
            .get_request("user")
            .await?
            .json()
            .await
            .map_err(|e| LangscanError::Repository {
                message: format!("Failed to parse user response: {}", e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("github_api_client").with_operation("get_token_owner"),
            })?;

        Ok(Some(user.login))
    }
}
