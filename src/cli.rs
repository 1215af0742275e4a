//! Command-line argument parsing for Loupe.

use clap::Parser;
use std::path::PathBuf;

/// A lightweight web viewer for SQLite databases.
#[derive(Parser, Debug)]
#[command(name = "loupe")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the SQLite database file to serve
    #[arg(value_name = "DATABASE")]
    pub database: PathBuf,

    /// Address to bind the HTTP server to
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// HTTP server port
    #[arg(short = 'p', long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Config file path
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Maximum rows returned when browsing a table
    #[arg(long, value_name = "N")]
    pub max_rows: Option<u32>,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the config file path to use.
    ///
    /// Uses the --config argument if provided, otherwise the default path.
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(crate::config::Config::default_path)
    }
}
