//! Concurrent prefix index over lowercase alphabetic words.
//!
//! The index is a trie sharded by first letter: 26 independent subtrees, each
//! behind its own mutex. Operations on words starting with different letters
//! never contend; operations sharing a first letter fully serialize. A shard
//! lock is taken before any node under that letter is touched and held until
//! every consequent state change (terminal flag, subword counters) is done,
//! so each insert or query is atomic with respect to its shard.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Number of letters in the alphabet, and the fanout of every trie node.
pub const ALPHABET: usize = 26;

/// Maximum stored word length in bytes.
pub const MAX_WORD_LEN: usize = 63;

/// A single trie node. The letter itself is implicit in the child slot the
/// node occupies, so only the per-node bookkeeping is stored.
#[derive(Debug)]
struct TrieNode {
    /// This node completes a stored word.
    terminal: bool,
    /// Number of terminal nodes strictly beneath this node.
    subwords: usize,
    /// Children indexed by letter (0 = 'a').
    children: [Option<Box<TrieNode>>; ALPHABET],
}

impl TrieNode {
    fn new() -> Self {
        Self {
            terminal: false,
            subwords: 0,
            children: [const { None }; ALPHABET],
        }
    }

    fn child(&self, idx: usize) -> Option<&TrieNode> {
        self.children[idx].as_deref()
    }

    /// Walk `rest` from this node without creating anything. Returns the
    /// final node if the whole path exists.
    fn descend(&self, rest: &[u8]) -> Option<&TrieNode> {
        let mut node = self;
        for &b in rest {
            node = node.child(letter_index(b)?)?;
        }
        Some(node)
    }
}

impl Default for TrieNode {
    fn default() -> Self {
        Self::new()
    }
}

/// Concurrent prefix index.
///
/// The 26 first-level nodes exist eagerly for the life of the index; deeper
/// nodes are created on first insert. There is no removal.
pub struct PrefixIndex {
    /// One subtree per first letter. The shard root *is* the node for that
    /// letter (a one-letter word is terminal on the shard root itself).
    shards: [Mutex<TrieNode>; ALPHABET],
    /// Total words ever successfully inserted, across all shards.
    words: AtomicUsize,
}

impl PrefixIndex {
    pub fn new() -> Self {
        Self {
            shards: std::array::from_fn(|_| Mutex::new(TrieNode::new())),
            words: AtomicUsize::new(0),
        }
    }

    /// Insert a word, returning true iff it was not already present.
    ///
    /// Words outside the domain (empty, longer than [`MAX_WORD_LEN`], or
    /// containing anything but lowercase ASCII letters) are rejected without
    /// touching any shard. The caller-side tokenizer normally guarantees the
    /// domain already.
    pub fn insert(&self, word: &str) -> bool {
        let Some((first, rest)) = split_word(word) else {
            return false;
        };
        let mut root = self.lock_shard(first);

        // Presence check first: an existing word must not disturb counters.
        if root.descend(rest).is_some_and(|n| n.terminal) {
            return false;
        }

        // New word. Re-walk creating missing nodes; every node strictly above
        // the terminal gains one subword.
        let mut node = &mut *root;
        for &b in rest {
            node.subwords += 1;
            let idx = (b - b'a') as usize;
            node = node.children[idx].get_or_insert_default().as_mut();
        }
        node.terminal = true;
        self.words.fetch_add(1, Ordering::Relaxed);
        true
    }

    /// Collect every stored word starting with `prefix`, children visited in
    /// ascending letter order. An out-of-domain or unmatched prefix yields an
    /// empty result.
    pub fn query_by_prefix(&self, prefix: &str) -> Vec<String> {
        let Some((first, rest)) = split_word(prefix) else {
            return Vec::new();
        };
        let root = self.lock_shard(first);

        let Some(node) = root.descend(rest) else {
            return Vec::new();
        };
        if node.subwords == 0 && !node.terminal {
            return Vec::new();
        }

        let mut results = Vec::with_capacity(node.subwords + usize::from(node.terminal));
        let mut path = prefix.to_string();
        if node.terminal {
            results.push(path.clone());
        }

        // Iterative DFS; each frame remembers the next child slot to try.
        let mut stack: Vec<(&TrieNode, usize)> = vec![(node, 0)];
        while let Some(&(top, next)) = stack.last() {
            let found = (next..ALPHABET).find_map(|i| top.child(i).map(|c| (i, c)));
            match found {
                Some((i, child)) => {
                    let last = stack.len() - 1;
                    stack[last].1 = i + 1;
                    path.push((b'a' + i as u8) as char);
                    if child.terminal {
                        results.push(path.clone());
                    }
                    stack.push((child, 0));
                }
                None => {
                    stack.pop();
                    path.pop();
                }
            }
        }

        results
    }

    /// True iff the exact word is stored.
    #[allow(dead_code)]
    pub fn contains(&self, word: &str) -> bool {
        let Some((first, rest)) = split_word(word) else {
            return false;
        };
        let root = self.lock_shard(first);
        root.descend(rest).is_some_and(|n| n.terminal)
    }

    /// Total number of distinct words ever inserted. This is the root-level
    /// counter: it advances exactly once per successful insert.
    pub fn word_count(&self) -> usize {
        self.words.load(Ordering::Relaxed)
    }

    fn lock_shard(&self, first: usize) -> MutexGuard<'_, TrieNode> {
        // A poisoned shard is still structurally valid: all mutation happens
        // under the guard and never leaves counters half-applied on panic-free
        // paths, so recover the guard rather than abandon the shard.
        self.shards[first]
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for PrefixIndex {
    fn default() -> Self {
        Self::new()
    }
}

fn letter_index(b: u8) -> Option<usize> {
    b.is_ascii_lowercase().then(|| (b - b'a') as usize)
}

/// Validate the word domain and split off the first letter's shard index.
fn split_word(word: &str) -> Option<(usize, &[u8])> {
    let bytes = word.as_bytes();
    if bytes.is_empty() || bytes.len() > MAX_WORD_LEN {
        return None;
    }
    if !bytes.iter().all(u8::is_ascii_lowercase) {
        return None;
    }
    Some((letter_index(bytes[0])?, &bytes[1..]))
}
