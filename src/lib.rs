//! # lexi - live word index
//!
//! lexi maintains a live, queryable index of the words appearing in a set of
//! watched directories. Directories are polled for new and modified files,
//! file contents are tokenized into lowercase alphabetic words, and every
//! word lands in a concurrent prefix index. Queries return all stored
//! completions of a prefix, and the most recent query stays armed as a live
//! tail: newly ingested matching words stream to the console as they are
//! discovered.
//!
//! ## Architecture
//!
//! - [`index`] - the sharded concurrent trie (one lock per first letter)
//! - [`watcher`] - per-directory polling threads feeding the index
//! - [`live`] - shared active-prefix state for the live tail
//! - [`service`] - the stdin command loop (queries, `add-directory:`, `stop`)
//! - [`output`] - termcolor console output
//! - [`config`] - layered runtime configuration
//! - [`utils`] - tokenization
//!
//! ## Quick Start
//!
//! ```
//! use lexi::index::PrefixIndex;
//!
//! let index = PrefixIndex::new();
//! index.insert("dog");
//! index.insert("door");
//!
//! let words = index.query_by_prefix("do");
//! assert_eq!(words.len(), 2);
//! ```
//!
//! ## Concurrency
//!
//! The trie is the only synchronized structure: 26 independent mutexes, one
//! per first letter, so inserts and queries under different letters never
//! block each other while operations sharing a letter fully serialize. The
//! live-tail state is deliberately best-effort; watchers may act on a prefix
//! that is one update stale.

pub mod config;
pub mod index;
pub mod live;
pub mod output;
pub mod service;
pub mod utils;
pub mod watcher;
