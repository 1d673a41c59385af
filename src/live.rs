//! Live match channel: the shared "active prefix" consulted after inserts.
//!
//! The query service arms the channel with the most recent search prefix;
//! every watcher asks it, after a successful insert, whether the new word
//! should be streamed to the console immediately. The channel is deliberately
//! best-effort: a watcher may observe a prefix that is one update stale, and
//! no snapshot atomicity is provided across the enabled check and the prefix
//! read. It is a tail-follow convenience, not a consistency boundary.

use std::sync::PoisonError;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Default)]
pub struct LiveMatchChannel {
    enabled: AtomicBool,
    prefix: RwLock<String>,
}

impl LiveMatchChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the active prefix and enable streaming. Query-service side only.
    pub fn arm(&self, prefix: &str) {
        let mut active = self
            .prefix
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        active.clear();
        active.push_str(prefix);
        drop(active);
        self.enabled.store(true, Ordering::Release);
    }

    /// Disable streaming and clear the active prefix.
    pub fn disarm(&self) {
        self.enabled.store(false, Ordering::Release);
        self.prefix
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Should this freshly inserted word be streamed right now?
    ///
    /// An empty active prefix never matches, so a disarm observed halfway
    /// (flag still set, prefix already cleared) stays silent.
    pub fn matches(&self, word: &str) -> bool {
        if !self.enabled.load(Ordering::Acquire) {
            return false;
        }
        let active = self.prefix.read().unwrap_or_else(PoisonError::into_inner);
        !active.is_empty() && word.starts_with(active.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disarmed_never_matches() {
        let live = LiveMatchChannel::new();
        assert!(!live.matches("dog"));
    }

    #[test]
    fn test_armed_prefix_matching() {
        let live = LiveMatchChannel::new();
        live.arm("do");
        assert!(live.matches("dog"));
        assert!(live.matches("do"));
        assert!(!live.matches("cat"));
        assert!(!live.matches("d"));
    }

    #[test]
    fn test_rearm_replaces_prefix() {
        let live = LiveMatchChannel::new();
        live.arm("do");
        live.arm("ca");
        assert!(!live.matches("dog"));
        assert!(live.matches("cat"));
    }

    #[test]
    fn test_disarm_clears_prefix() {
        let live = LiveMatchChannel::new();
        live.arm("do");
        live.disarm();
        assert!(!live.matches("dog"));
        live.arm("do");
        assert!(live.matches("dog"));
    }
}
