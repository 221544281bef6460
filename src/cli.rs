use std::net::SocketAddr;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::metadata::{PKG_DESCRIPTION, PKG_NAME, PKG_VERSION};
use crate::storage::{DEFAULT_VIEWER, StoreConfig};
use crate::types::{DEFAULT_AUTHOR, SortOption};

#[derive(Parser, Debug, Clone)]
#[command(name = PKG_NAME)]
#[command(version = PKG_VERSION)]
#[command(about = PKG_DESCRIPTION, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Start the MCP server
    Serve(ServeArguments),
    /// Open the interactive idea lab in the terminal
    Lab(StoreArguments),
    /// Print the ranked idea feed and exit
    Feed(FeedArguments),
    /// Print version information
    Version,
}

#[derive(Args, Debug, Clone)]
pub struct StoreArguments {
    /// Viewer id that votes are recorded under
    #[arg(long, env = "IDEALAB_VIEWER", default_value = DEFAULT_VIEWER)]
    pub viewer: String,

    /// Author name for submitted ideas that do not name one
    #[arg(long, env = "IDEALAB_AUTHOR", default_value = DEFAULT_AUTHOR)]
    pub author: String,

    /// Start with an empty collection instead of the mock catalogue
    #[arg(long, env = "IDEALAB_NO_SEED", default_value_t = false)]
    pub no_seed: bool,
}

impl StoreArguments {
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            viewer_id: self.viewer.clone(),
            default_author: self.author.clone(),
            seed: !self.no_seed,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.viewer.trim().is_empty() {
            return Err("IDEALAB_VIEWER cannot be empty".to_string());
        }
        if self.author.trim().is_empty() {
            return Err("IDEALAB_AUTHOR cannot be empty".to_string());
        }
        Ok(())
    }
}

#[derive(Args, Debug, Clone)]
pub struct ServeArguments {
    #[command(flatten)]
    pub store: StoreArguments,

    /// Enable stdio transport
    #[arg(long, env = "IDEALAB_ENABLE_STDIO", default_value_t = true, action = ArgAction::Set)]
    pub enable_stdio: bool,

    /// Enable streamable HTTP transport
    #[arg(long, env = "IDEALAB_ENABLE_HTTP", default_value_t = false, action = ArgAction::Set)]
    pub enable_http: bool,

    /// HTTP bind address (streamable HTTP)
    #[arg(long, env = "IDEALAB_HTTP_ADDR", default_value = "127.0.0.1:8080")]
    pub http_addr: String,
}

impl ServeArguments {
    pub fn default_settings() -> Self {
        Self {
            store: StoreArguments {
                viewer: DEFAULT_VIEWER.to_string(),
                author: DEFAULT_AUTHOR.to_string(),
                no_seed: false,
            },
            enable_stdio: true,
            enable_http: false,
            http_addr: "127.0.0.1:8080".to_string(),
        }
    }

    /// Validate CLI/environment-derived arguments.
    pub fn validate(&self) -> Result<(), String> {
        self.store.validate()?;
        if !self.enable_stdio && !self.enable_http {
            return Err("Enable at least one transport (stdio or http)".to_string());
        }
        if self.enable_http {
            self.http_addr
                .parse::<SocketAddr>()
                .map_err(|e| format!("Invalid IDEALAB_HTTP_ADDR '{}': {e}", self.http_addr))?;
        }
        Ok(())
    }
}

#[derive(Args, Debug, Clone)]
pub struct FeedArguments {
    #[command(flatten)]
    pub store: StoreArguments,

    /// Only show ideas in this category
    #[arg(long)]
    pub category: Option<String>,

    /// Case-insensitive match on title, tagline or tags
    #[arg(long)]
    pub search: Option<String>,

    /// popular, newest or discussed
    #[arg(long, default_value = "popular", value_parser = parse_sort)]
    pub sort: SortOption,

    /// Print JSON instead of text
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

fn parse_sort(value: &str) -> Result<SortOption, String> {
    value.parse().map_err(|e: crate::error::StoreError| e.to_string())
}
