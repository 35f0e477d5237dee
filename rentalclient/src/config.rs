use anyhow::{Context, Result};
use clap::Parser;
use std::{
    fs::File,
    path::{Path, PathBuf},
    time::Duration,
};

/// Terminal front-end for the DVD rental store API
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct ClientConfig {
    /// Base URL of the rental API
    #[arg(short, long, default_value = "http://localhost:5000")]
    pub api_url: String,

    // The terminal belongs to the TUI, so logs go to a file
    #[arg(short, long, default_value = "rentalclient.log")]
    pub log_file: PathBuf,

    /// Request timeout in seconds; requests never time out when unset
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Rows per page of the customer list
    #[arg(long, default_value_t = 40, value_parser = clap::value_parser!(u64).range(1..))]
    pub per_page: u64,
}

impl ClientConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }

    pub fn per_page(&self) -> usize {
        self.per_page as usize
    }
}

// Set RUST_LOG if not already set
pub fn init_logging(log_file: &Path) -> Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }

    let file = File::create(log_file)
        .with_context(|| format!("Unable to create log file {}", log_file.display()))?;

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClientConfig::parse_from(["rentalclient"]);

        assert_eq!(config.api_url, "http://localhost:5000");
        assert_eq!(config.log_file, PathBuf::from("rentalclient.log"));
        assert_eq!(config.timeout(), None);
        assert_eq!(config.per_page(), 40);
    }

    #[test]
    fn overrides() {
        let config = ClientConfig::parse_from([
            "rentalclient",
            "--api-url",
            "http://rental.local:8080/api",
            "--timeout",
            "5",
            "--per-page",
            "25",
        ]);

        assert_eq!(config.api_url, "http://rental.local:8080/api");
        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.per_page(), 25);
    }

    #[test]
    fn zero_per_page_is_rejected() {
        assert!(ClientConfig::try_parse_from(["rentalclient", "--per-page", "0"]).is_err());
    }
}
