//! Configuration and CLI argument handling

use clap::Parser;

/// CLI argument parsing structure
#[derive(Parser)]
#[command(name = "tokenwatch")]
#[command(about = "A countdown-reconciliation daemon for broker token expiry")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20570")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Base URL of the platform backend that owns token state
    #[arg(short, long, default_value = "http://127.0.0.1:8000")]
    pub backend_url: String,

    /// Background poll interval in seconds
    #[arg(long, default_value = "10")]
    pub poll_interval: u64,

    /// Connection name to monitor (repeatable)
    #[arg(short, long = "connection", default_value = "truedata")]
    pub connections: Vec<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
