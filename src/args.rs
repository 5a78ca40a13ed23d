use clap::{Parser, Subcommand};
use jobclip::ClipperConfig;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "jobclip")]
#[command(about = "Clips job postings from the active browser page into a tracking dashboard")]
#[command(version)]
pub struct Args {
    /// Path to a JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the dashboard API base URL
    #[arg(long)]
    pub api_url: Option<String>,

    /// Override the WebDriver URL
    #[arg(long)]
    pub webdriver_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scrape the active page and print the record as JSON
    Capture,
    /// Scrape the active page and submit it to the dashboard
    Save,
    /// Relay the dashboard session credential into local storage
    Connect,
    /// Forget the stored session credential
    Logout,
}

/// Build the effective configuration from file plus CLI overrides
pub fn resolve_config(args: &Args) -> Result<ClipperConfig, jobclip::config::ConfigError> {
    let mut config = match &args.config {
        Some(path) => ClipperConfig::from_file(path)?,
        None => ClipperConfig::default(),
    };

    if let Some(api_url) = &args.api_url {
        config.api_base_url = api_url.clone();
    }
    if let Some(webdriver_url) = &args.webdriver_url {
        config.webdriver_url = webdriver_url.clone();
    }

    Ok(config)
}
