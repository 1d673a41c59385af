mod config;
mod index;
mod live;
mod output;
mod service;
mod utils;
mod watcher;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use config::Config;
use service::QueryService;

#[derive(Parser)]
#[command(name = "lexi")]
#[command(about = "Live word index over watched directories with prefix search and tail")]
struct Cli {
    /// Directories to start watching immediately
    dirs: Vec<PathBuf>,

    /// Seconds between directory poll cycles
    #[arg(long)]
    poll_secs: Option<u64>,

    /// Tracked-file table capacity per watcher
    #[arg(long)]
    max_files: Option<usize>,

    /// Cap on concurrently running watchers
    #[arg(long)]
    max_watchers: Option<usize>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load();
    if let Some(secs) = cli.poll_secs {
        config.poll_interval_secs = secs;
    }
    if let Some(count) = cli.max_files {
        config.max_tracked_files = count;
    }
    if let Some(count) = cli.max_watchers {
        config.max_watchers = count;
    }
    if cli.no_color {
        config.color = false;
    }

    let mut service = QueryService::new(config);
    for dir in cli.dirs {
        service.watch(dir)?;
    }
    service.run()
}
