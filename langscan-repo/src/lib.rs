//! Langscan Repository - repository inventory module
//!
//! Responsible for walking local directories, fetching remote repository
//! trees, classifying files by language, and aggregating the results into
//! reports.

pub mod account;
pub mod api;
pub mod cache;
pub mod detector;
pub mod fetcher;
pub mod filter;
pub mod lang;
pub mod walker;

pub use account::AccountAggregator;
pub use api::{ApiClientConfig, GitHubApiClient, HostingApiClient};
pub use cache::SnapshotCache;
pub use detector::{aggregate, merge_reports, scan_directory};
pub use fetcher::{parse_repo_url, RepoFetcher};
pub use filter::{should_exclude, ExcludePatterns};
pub use lang::{classify, Classification};
pub use walker::walk_directory;
