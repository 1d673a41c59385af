//! Query service: the single control loop driving the index.
//!
//! Reads whitespace-delimited command tokens from stdin, one at a time:
//!
//! - `stop` shuts the whole process down
//! - `add-directory:<path>` (literal prefix, no separator) spawns a watcher
//! - anything else is a search prefix: it is queried synchronously and then
//!   stays armed as the live-stream prefix until the next command
//!
//! End-of-input is recoverable: live streaming is disarmed and the loop keeps
//! waiting for further input.

use anyhow::{Context, Result};
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::index::PrefixIndex;
use crate::live::LiveMatchChannel;
use crate::output;
use crate::watcher::DirectoryWatcher;

/// Terminates the process.
pub const STOP_COMMAND: &str = "stop";

/// Literal command prefix, immediately followed by the directory path.
pub const ADD_DIRECTORY_PREFIX: &str = "add-directory:";

/// Pause after end-of-input before polling for more, so a closed stdin pipe
/// does not busy-spin.
const EOF_BACKOFF_MS: u64 = 200;

/// A parsed command token.
#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Stop,
    AddDirectory(&'a str),
    Query(&'a str),
}

fn parse_command(token: &str) -> Command<'_> {
    if token == STOP_COMMAND {
        Command::Stop
    } else if let Some(path) = token.strip_prefix(ADD_DIRECTORY_PREFIX) {
        Command::AddDirectory(path)
    } else {
        Command::Query(token)
    }
}

pub struct QueryService {
    index: Arc<PrefixIndex>,
    live: Arc<LiveMatchChannel>,
    config: Config,
    watchers_spawned: usize,
}

impl QueryService {
    pub fn new(config: Config) -> Self {
        Self {
            index: Arc::new(PrefixIndex::new()),
            live: Arc::new(LiveMatchChannel::new()),
            config,
            watchers_spawned: 0,
        }
    }

    /// The shared index, for callers that want to inspect it directly.
    #[allow(dead_code)]
    pub fn index(&self) -> Arc<PrefixIndex> {
        Arc::clone(&self.index)
    }

    /// Spawn a watcher thread for `dir`, fire-and-forget, up to the
    /// configured cap. Beyond the cap the request is rejected with a
    /// diagnostic. Watcher startup is not acknowledged; a bad path surfaces
    /// later as that watcher's own exit diagnostic.
    pub fn watch(&mut self, dir: PathBuf) -> Result<()> {
        if self.watchers_spawned >= self.config.max_watchers {
            output::print_watcher_cap(self.config.max_watchers, &dir, self.config.color)?;
            return Ok(());
        }

        let watcher = DirectoryWatcher::new(
            dir.clone(),
            Arc::clone(&self.index),
            Arc::clone(&self.live),
            &self.config,
        );
        std::thread::Builder::new()
            .name(format!("lexi-watch-{}", self.watchers_spawned))
            .spawn(move || watcher.run())
            .with_context(|| format!("spawning watcher for {}", dir.display()))?;
        self.watchers_spawned += 1;
        Ok(())
    }

    /// Run the control loop over stdin until `stop`.
    pub fn run(&mut self) -> Result<()> {
        let stdin = io::stdin();
        let mut line = String::new();
        loop {
            line.clear();
            let n = stdin
                .lock()
                .read_line(&mut line)
                .context("reading command input")?;
            if n == 0 {
                // End-of-input: disarm live streaming, keep waiting.
                self.live.disarm();
                std::thread::sleep(Duration::from_millis(EOF_BACKOFF_MS));
                continue;
            }
            for token in line.split_whitespace() {
                if !self.handle_token(token)? {
                    return Ok(());
                }
            }
        }
    }

    /// Dispatch one command token. Returns false when the service should
    /// terminate.
    fn handle_token(&mut self, token: &str) -> Result<bool> {
        match parse_command(token) {
            Command::Stop => {
                output::print_shutdown(self.index.word_count(), self.config.color)?;
                Ok(false)
            }
            Command::AddDirectory(path) => {
                self.watch(PathBuf::from(path))?;
                Ok(true)
            }
            Command::Query(prefix) => {
                // Re-arm before querying: the prefix stays live until the
                // next command supersedes it.
                self.live.disarm();
                self.live.arm(prefix);

                output::print_search_header(prefix, self.config.color)?;
                let results = self.index.query_by_prefix(prefix);
                if results.is_empty() {
                    output::print_no_match(prefix, self.config.color)?;
                } else {
                    output::print_query_results(&results, self.config.color)?;
                }
                Ok(true)
            }
        }
    }
}
