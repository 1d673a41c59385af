//! In-memory word index.
//!
//! The only index structure is the sharded trie in [`trie`]; everything else
//! in the crate feeds it or reads from it.

pub mod trie;

pub use trie::{ALPHABET, MAX_WORD_LEN, PrefixIndex};
