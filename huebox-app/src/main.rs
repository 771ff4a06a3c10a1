#![warn(unused_qualifications)]

pub mod args;
pub mod clipboard;
pub mod commands;
pub mod config;
pub mod files;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{
    Error,
    WrapErr,
    bail,
};
use dotenvy::dotenv;
use huebox_core::{
    FileStore,
    Picker,
};
use tracing_subscriber::EnvFilter;

use crate::{
    args::{
        Args,
        Command,
    },
    clipboard::SystemClipboard,
    config::AppConfig,
    files::{
        AppFiles,
        format_path,
    },
};

fn main() -> Result<(), Error> {
    let _ = dotenv();
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match args.command {
        Command::Picker(command) => {
            let app_files = AppFiles::open()?;
            let config: AppConfig = if args.ignore_config {
                AppConfig::default()
            }
            else {
                app_files.read_config_or_create()?
            };

            let store_dir = args
                .data_dir
                .or_else(|| config.storage.data_dir.clone())
                .unwrap_or_else(|| app_files.store_dir());
            let storage = FileStore::open(&store_dir)
                .wrap_err_with(|| format!("Could not open store: {}", format_path(&store_dir)))?;
            tracing::debug!(path = %store_dir.display(), "Opened store");

            let mut picker = Picker::open(storage)
                .wrap_err("Could not load saved palette")?
                .with_notice_duration(config.clipboard.notice_duration());

            commands::run(
                command,
                &mut picker,
                &mut SystemClipboard::from_config(&config.clipboard),
                &config,
                &mut std::io::stdout().lock(),
            )?;
        }
        Command::DumpDefaultConfig { output, format } => {
            dump_default_config(output, &format)?;
        }
    }

    Ok(())
}

fn dump_default_config(output: Option<PathBuf>, format: &str) -> Result<(), Error> {
    let config = AppConfig::default();
    let config = match format {
        "toml" => toml::to_string_pretty(&config)?,
        "json" => serde_json::to_string_pretty(&config)?,
        _ => bail!("Invalid format: {format}"),
    };

    if let Some(output) = &output {
        std::fs::write(output, &config)?;
    }
    else {
        println!("{config}");
    }

    Ok(())
}
