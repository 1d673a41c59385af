//! Directory watcher: polls one directory and feeds discovered words into the
//! shared index.
//!
//! One watcher runs per watched directory, on its own OS thread, from spawn
//! until process exit (there is no cancellation path). Each poll cycle lists
//! the directory (non-recursive), compares every plain file's modification
//! time against a private tracked-file table, and fully re-parses any file
//! that is new or changed. Insertion is idempotent, so re-parsing a modified
//! file repeats work but never corrupts the index.
//!
//! All file and directory errors are handled here and surface only as console
//! diagnostics; nothing propagates to the index or the query service. The one
//! watcher-fatal condition is the watched directory itself becoming
//! unreadable, which ends that watcher's loop and nothing else.

use std::fs::{self, File};
use std::io::{self, ErrorKind, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use crate::config::Config;
use crate::index::PrefixIndex;
use crate::live::LiveMatchChannel;
use crate::output;
use crate::utils::tokenizer::ChunkTokenizer;

/// Bytes read from a file per chunk during parsing.
const READ_CHUNK_SIZE: usize = 8192;

/// One file this watcher has seen, with the modification time it was last
/// parsed at. Private to the watcher; never shared across threads.
#[derive(Debug)]
struct ScannedFileRecord {
    path: PathBuf,
    mod_time: SystemTime,
}

/// Polls a single directory for new and modified files.
pub struct DirectoryWatcher {
    dir: PathBuf,
    index: Arc<PrefixIndex>,
    live: Arc<LiveMatchChannel>,
    poll_interval: Duration,
    capacity: usize,
    color: bool,
    records: Vec<ScannedFileRecord>,
}

impl DirectoryWatcher {
    pub fn new(
        dir: PathBuf,
        index: Arc<PrefixIndex>,
        live: Arc<LiveMatchChannel>,
        config: &Config,
    ) -> Self {
        Self {
            dir,
            index,
            live,
            poll_interval: config.poll_interval(),
            capacity: config.max_tracked_files,
            color: config.color,
            records: Vec::new(),
        }
    }

    /// Poll until the directory becomes unreadable. Never returns otherwise.
    pub fn run(mut self) {
        loop {
            if let Err(err) = self.scan_cycle() {
                let _ = output::print_watcher_exiting(&self.dir, &err, self.color);
                return;
            }
            std::thread::sleep(self.poll_interval);
        }
    }

    /// One pass over the directory. Errs only if the directory listing itself
    /// fails; per-file problems are reported and skipped.
    pub fn scan_cycle(&mut self) -> io::Result<()> {
        for entry in fs::read_dir(&self.dir)? {
            let Ok(entry) = entry else {
                continue;
            };
            let Ok(meta) = entry.metadata() else {
                continue;
            };
            if meta.is_dir() {
                continue;
            }
            let Ok(mod_time) = meta.modified() else {
                continue;
            };

            let path = entry.path();
            let size = meta.len();
            let color = self.color;

            if let Some(i) = self.records.iter().position(|r| r.path == path) {
                if self.records[i].mod_time != mod_time {
                    let _ = output::print_file_modified(&path, size, color);
                    // The recorded mtime stays stale until a parse succeeds,
                    // so an unreadable file is retried on later cycles.
                    if self.parse_file(&path) {
                        self.records[i].mod_time = mod_time;
                    }
                }
            } else if self.records.len() < self.capacity {
                // Track only after a successful parse; a file whose open
                // fails must stay unknown so later cycles retry it.
                if self.parse_file(&path) {
                    self.records.push(ScannedFileRecord {
                        path: path.clone(),
                        mod_time,
                    });
                    let _ = output::print_file_added(&path, size, color);
                }
            } else {
                // Full table: the file can never be tracked, so it is re-read
                // in full on every cycle. Idempotent inserts keep that safe.
                let _ = output::print_capacity_exceeded(&self.dir, self.capacity, color);
                self.parse_file(&path);
            }
        }
        Ok(())
    }

    /// Read the whole file in fixed-size chunks and ingest every accepted
    /// word. Newly inserted words matching the active prefix are streamed.
    /// Returns false if the file could not be opened or fully read, so the
    /// caller leaves it due for a retry.
    fn parse_file(&self, path: &Path) -> bool {
        let mut file = match File::open(path) {
            Ok(file) => file,
            Err(err) => {
                let _ = output::print_file_unreadable(path, &err, self.color);
                return false;
            }
        };

        let mut tokenizer = ChunkTokenizer::new();
        let mut buf = [0u8; READ_CHUNK_SIZE];
        let mut emit = |word: String| {
            if self.index.insert(&word) && self.live.matches(&word) {
                let _ = output::print_live_match(&word, self.color);
            }
        };

        loop {
            match file.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => tokenizer.push_chunk(&buf[..n], &mut emit),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => {
                    // Words ingested so far stay; idempotent inserts make the
                    // retry re-read safe.
                    let _ = output::print_file_unreadable(path, &err, self.color);
                    return false;
                }
            }
        }
        tokenizer.finish(&mut emit);
        true
    }

    #[cfg(test)]
    fn tracked_files(&self) -> usize {
        self.records.len()
    }

    #[cfg(test)]
    fn mark_stale(&mut self, path: &Path) {
        if let Some(rec) = self.records.iter_mut().find(|r| r.path == path) {
            rec.mod_time = SystemTime::UNIX_EPOCH;
        }
    }
}
