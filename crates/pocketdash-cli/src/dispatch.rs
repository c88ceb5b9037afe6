use std::path::Path;
use std::time::Duration;

use pocketdash_client::commands;
use pocketdash_client::commands::show::ShowOptions;
use pocketdash_client::commands::watch::WatchOptions;
use pocketdash_client::{ClientResult, SuccessEnvelope};

use crate::cli::{Cli, Commands};

pub fn dispatch(cli: &Cli) -> ClientResult<SuccessEnvelope> {
    match &cli.command {
        Commands::Show { source, .. } => commands::show::run_with_options(ShowOptions {
            url: source.url.clone(),
            file: source.file.clone(),
            now: source.now.clone(),
            config_path: source.config.as_deref().map(Path::new),
            ..ShowOptions::default()
        }),
        Commands::Config { config, .. } => commands::config::run(config.as_deref().map(Path::new)),
        Commands::Watch {
            source,
            interval_secs,
            count,
            ..
        } => commands::watch::run_with_options(WatchOptions {
            url: source.url.clone(),
            file: source.file.clone(),
            now: source.now.clone(),
            config_path: source.config.as_deref().map(Path::new),
            interval: Duration::from_secs(*interval_secs),
            count: *count,
            stdin_override: None,
        }),
    }
}
