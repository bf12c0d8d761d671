//! API client for the repository hosting provider
//!
//! Gives direct access to repository metadata, file trees, and blob content
//! without cloning, plus paginated account repository listings.

use async_trait::async_trait;
use langscan_core::{ErrorContext, LangscanError, LangscanResult};
use serde::{Deserialize, Serialize};

pub mod github;

#[cfg(test)]
mod tests;

pub use github::GitHubApiClient;

/// A blob entry from the repository tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeEntry {
    /// Path relative to repository root
    pub path: String,
    /// Size in bytes, absent for some entry kinds
    pub size: Option<u64>,
    /// API URL for fetching this blob's content
    pub url: Option<String>,
}

/// Repository metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryMetadata {
    pub name: String,
    pub default_branch: String,
    /// Last-push timestamp, compared verbatim against cached snapshots
    pub pushed_at: String,
    pub private: bool,
}

/// Configuration for API clients
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Access token for authentication
    pub access_token: Option<String>,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string
    pub user_agent: String,
    /// Page size for listing requests
    pub page_size: usize,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            access_token: None,
            timeout_seconds: 30,
            user_agent: "langscan/0.1".to_string(),
            page_size: 100,
        }
    }
}

impl ApiClientConfig {
    /// Create a new configuration for GitHub
    pub fn github(access_token: Option<String>) -> Self {
        Self {
            base_url: "https://api.github.com".to_string(),
            access_token,
            ..Default::default()
        }
    }

    /// Override the API base URL
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Set listing page size
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }
}

/// Trait for hosting API clients
#[async_trait]
pub trait HostingApiClient: Send + Sync {
    /// Get repository metadata
    async fn get_repository_metadata(
        &self,
        owner: &str,
        repo: &str,
    ) -> LangscanResult<RepositoryMetadata>;

    /// Get the complete recursive file tree for a branch, blobs only
    async fn get_file_tree(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> LangscanResult<Vec<TreeEntry>>;

    /// Fetch and decode a blob's content by its API URL
    async fn get_blob_content(&self, url: &str) -> LangscanResult<String>;

    /// List all repositories of an account as HTML URLs, walking pagination
    async fn list_account_repos(&self, username: &str) -> LangscanResult<Vec<String>>;

    /// Resolve the login of the token's owner, if authenticated
    async fn get_token_owner(&self) -> LangscanResult<Option<String>>;
}

/// Helper function to create HTTP client with common configuration
pub(crate) fn create_http_client(config: &ApiClientConfig) -> LangscanResult<reqwest::Client> {
    let mut headers = reqwest::header::HeaderMap::new();

    headers.insert(
        reqwest::header::USER_AGENT,
        reqwest::header::HeaderValue::from_str(&config.user_agent).map_err(|e| {
            LangscanError::Network {
                message: format!("Invalid user agent: {}", e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("http_client").with_operation("create_client"),
            }
        })?,
    );

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(config.timeout_seconds))
        .default_headers(headers)
        .build()
        .map_err(|e| LangscanError::Network {
            message: format!("Failed to create HTTP client: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("http_client").with_operation("create_client"),
        })?;

    Ok(client)
}

/// Map an error HTTP response to the error taxonomy: 404 becomes a distinct
/// not-found signal, everything else carries the provider status and message.
pub(crate) async fn handle_response_error(
    response: reqwest::Response,
    context: &str,
) -> LangscanError {
    let status = response.status();
    let url = response.url().clone();

    let error_body = response.text().await.unwrap_or_default();
    let message = if error_body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string()
    } else {
        error_body
    };

    if status == reqwest::StatusCode::NOT_FOUND {
        return LangscanError::NotFound {
            resource: url.path().trim_start_matches('/').to_string(),
            context: ErrorContext::new("api_client")
                .with_operation(context)
                .with_suggestion("Is the repository public?")
                .with_suggestion("Check the owner and repository name"),
        };
    }

    LangscanError::Api {
        status: status.as_u16(),
        message,
        context: ErrorContext::new("api_client")
            .with_operation(context)
            .with_suggestion(match status.as_u16() {
                401 => "Check your access token",
                403 => "Check repository permissions or rate limits",
                _ => "Check network connectivity and API status",
            }),
    }
}
