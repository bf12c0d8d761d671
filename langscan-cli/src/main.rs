//! Langscan CLI - command-line interface for language inventory
//!
//! Scans a GitHub repository, a local directory, or a whole GitHub account
//! and prints the language breakdown as a console table, Markdown, or JSON.

use clap::{Parser, ValueEnum};
use console::style;
use langscan_core::{
    init_logging, log_operation_start, log_operation_success, validation_error, ErrorContext,
    LangscanConfig, LangscanError, LangscanResult, LoggingConfig,
};
use langscan_repo::{
    aggregate, parse_repo_url, scan_directory, AccountAggregator, ExcludePatterns, RepoFetcher,
};
use std::path::PathBuf;
use tracing::info;

mod render;

#[derive(Parser)]
#[command(name = "langscan")]
#[command(about = "Language usage inventory for codebases and GitHub repositories")]
#[command(version = "0.1.0")]
struct Cli {
    /// GitHub repository URL to scan
    #[arg(short, long)]
    url: Option<String>,

    /// Local project directory to scan
    #[arg(short, long)]
    directory: Option<PathBuf>,

    /// GitHub username to aggregate, or "me" for the token owner
    #[arg(short, long)]
    profile: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Console)]
    output: OutputFormat,

    /// Comma-separated glob patterns to exclude (e.g. *.md,*.json)
    #[arg(long, value_delimiter = ',')]
    exclude: Vec<String>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Console,
    Markdown,
    Json,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        eprintln!("{} {}", style("error:").red().bold(), error);
        if let Some(context) = error.context() {
            for suggestion in &context.recovery_suggestions {
                eprintln!("  {} {}", style("hint:").yellow(), suggestion);
            }
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> LangscanResult<()> {
    let mut logging_config = LoggingConfig::default();
    if cli.verbose {
        logging_config.level = "debug".to_string();
    }

    init_logging(&logging_config).map_err(|e| LangscanError::Config {
        message: format!("Failed to initialize logging: {}", e),
        source: Some(e),
        context: ErrorContext::new("cli")
            .with_operation("init_logging")
            .with_suggestion("Check logging configuration"),
    })?;

    info!("Starting langscan v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(cli.config.as_ref())?;
    config.validate()?;

    let selected_modes = [
        cli.url.is_some(),
        cli.directory.is_some(),
        cli.profile.is_some(),
    ]
    .iter()
    .filter(|&&s| s)
    .count();
    if selected_modes != 1 {
        return Err(validation_error!(
            "Provide exactly one of --url, --directory, or --profile",
            "mode",
            "cli"
        ));
    }

    let patterns = ExcludePatterns::new(&cli.exclude)?;

    let report = if let Some(url) = cli.url {
        log_operation_start("scan_repository", &url);
        let report = scan_repository(&url, &config, &patterns).await?;
        log_operation_success("scan_repository", &url);
        report
    } else if let Some(directory) = cli.directory {
        let target = directory.display().to_string();
        log_operation_start("scan_directory", &target);
        let report = scan_directory(&directory, &patterns)?;
        log_operation_success("scan_directory", &target);
        report
    } else {
        // selected_modes == 1, so profile must be set here
        let profile = cli.profile.unwrap_or_default();
        log_operation_start("scan_account", &profile);
        let report = scan_account(&profile, &config, &patterns).await?;
        log_operation_success("scan_account", &profile);
        report
    };

    let rendered = match cli.output {
        OutputFormat::Console => render::render_console(&report),
        OutputFormat::Markdown => render::render_markdown(&report),
        OutputFormat::Json => render::render_json(&report)?,
    };
    println!("{}", rendered);

    Ok(())
}

fn load_config(config_path: Option<&PathBuf>) -> LangscanResult<LangscanConfig> {
    if let Some(path) = config_path {
        info!("Loading configuration from {:?}", path);
        return LangscanConfig::from_file(path);
    }

    let default_paths = [
        dirs::config_dir().map(|d| d.join("langscan").join("config.toml")),
        dirs::home_dir().map(|d| d.join(".langscan").join("config.toml")),
        Some(PathBuf::from("langscan.toml")),
    ];

    for path in default_paths.iter().flatten() {
        if path.exists() {
            info!("Loading configuration from {:?}", path);
            return LangscanConfig::from_file(path);
        }
    }

    info!("No configuration file found, using defaults");
    Ok(LangscanConfig::default())
}

async fn scan_repository(
    url: &str,
    config: &LangscanConfig,
    patterns: &ExcludePatterns,
) -> LangscanResult<langscan_core::Report> {
    let (owner, repo) = parse_repo_url(url)?;

    let token = LangscanConfig::access_token_from_env();
    let fetcher = RepoFetcher::new(config, token)?;

    let snapshot = fetcher.fetch(&owner, &repo).await?;
    Ok(aggregate(&snapshot.files, snapshot.manifest.as_ref(), patterns))
}

async fn scan_account(
    profile: &str,
    config: &LangscanConfig,
    patterns: &ExcludePatterns,
) -> LangscanResult<langscan_core::Report> {
    let token = LangscanConfig::access_token_from_env();
    let fetcher = RepoFetcher::new(config, token)?;

    let username = if profile == "me" {
        fetcher.client().get_token_owner().await?.ok_or_else(|| {
            validation_error!(
                "Profile \"me\" requires a GITHUB_TOKEN with an identifiable owner",
                "profile",
                "cli"
            )
        })?
    } else {
        profile.to_string()
    };

    let aggregator = AccountAggregator::new(fetcher, config);
    aggregator.aggregate_account(&username, patterns).await
}
