use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// API token; takes precedence over NOTION_TOKEN and the config file
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Config file to use instead of ~/.config/blocksync/config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Serve JSON-RPC requests over stdin/stdout (default)
    Serve,
    /// Upload a markdown file as a new page
    Upload {
        file: PathBuf,
        #[arg(long)]
        database_id: Option<String>,
        #[arg(long)]
        page_id: Option<String>,
    },
    /// Download a page to a markdown file
    Download { page_id: String, output: PathBuf },
    /// Download every page of a database into a directory
    DownloadDatabase {
        database_id: String,
        output_dir: PathBuf,
    },
    /// Write a config file with default settings
    InitConfig {
        #[arg(long)]
        force: bool,
    },
}
