mod cli;
mod notion;
mod rpc;
mod server;
mod tools;

use anyhow::{Context, Result, bail};
use blocksync_config::Config;
use blocksync_engine::{PageParent, SyncOptions, SyncService};
use clap::Parser;
use cli::{Cli, Command};
use notion::NotionClient;
use server::McpServer;
use std::path::Path;
use std::time::Duration;
use std::{io, process};

fn main() {
    // stdout carries the protocol, so logs go to stderr
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    if let Err(e) = run(Cli::parse()) {
        log::error!("{e:#}");
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    log::debug!("Config path: {}", config_path.display());

    match cli.command.unwrap_or(Command::Serve) {
        Command::InitConfig { force } => init_config(&config_path, force),
        Command::Serve => {
            let service = connect(&config_path, cli.token.as_deref())?;
            log::info!("blocksync {} serving on stdio", env!("CARGO_PKG_VERSION"));
            McpServer::new(service)
                .run(io::stdin().lock(), io::stdout().lock())
                .context("stdio channel failed")
        }
        Command::Upload {
            file,
            database_id,
            page_id,
        } => {
            let service = connect(&config_path, cli.token.as_deref())?;
            let parent = PageParent::from_ids(database_id, page_id)?;
            let page_id = service.upload_markdown(&file, &parent)?;
            println!("{page_id}");
            Ok(())
        }
        Command::Download { page_id, output } => {
            let service = connect(&config_path, cli.token.as_deref())?;
            let written = service.download_page(&page_id, &output)?;
            println!("{}", written.display());
            Ok(())
        }
        Command::DownloadDatabase {
            database_id,
            output_dir,
        } => {
            let service = connect(&config_path, cli.token.as_deref())?;
            for path in service.download_database(&database_id, &output_dir)? {
                println!("{}", path.display());
            }
            Ok(())
        }
    }
}

/// Loads the config, resolves the token and builds a service on the HTTP client.
fn connect(config_path: &Path, token_flag: Option<&str>) -> Result<SyncService<NotionClient>> {
    let config = match Config::load_from_path(config_path)? {
        Some(config) => {
            log::info!("Loaded config from {}", config_path.display());
            config
        }
        None => {
            log::debug!("No config file, using defaults");
            Config::default()
        }
    };
    let token = config.resolve_token(token_flag)?;
    let client = NotionClient::new(&token, &config);
    Ok(SyncService::new(client, sync_options(&config)))
}

fn sync_options(config: &Config) -> SyncOptions {
    SyncOptions {
        max_blocks_per_request: config.max_blocks_per_request,
        max_total_blocks: config.max_total_blocks,
        rate_limit_delay: Duration::from_millis(config.rate_limit_delay_ms),
        workspace_root: config.workspace_root(),
        ..SyncOptions::default()
    }
}

fn init_config(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Config file already exists at {} (use --force to overwrite)",
            config_path.display()
        );
    }
    Config::default().save_to_path(config_path)?;
    println!("Wrote {}", config_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn sync_options_follow_config() {
        let config = Config {
            max_blocks_per_request: 10,
            rate_limit_delay_ms: 0,
            workspace_root: Some(PathBuf::from("/srv/notes")),
            ..Config::default()
        };
        let options = sync_options(&config);
        assert_eq!(options.max_blocks_per_request, 10);
        assert_eq!(options.max_total_blocks, 1000);
        assert_eq!(options.rate_limit_delay, Duration::ZERO);
        assert_eq!(options.workspace_root, PathBuf::from("/srv/notes"));
    }

    #[test]
    fn init_config_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        init_config(&path, false).unwrap();
        assert!(Config::load_from_path(&path).unwrap().is_some());
        assert!(init_config(&path, false).is_err());
        init_config(&path, true).unwrap();
    }
}
