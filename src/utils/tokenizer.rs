//! Whitespace tokenizer with a letters-only filter.
//!
//! File content is split on ASCII whitespace. Each token is truncated to the
//! index's maximum word length *before* validation (matching how overlong
//! tokens are handled on ingest: only the leading bytes are ever examined),
//! then lowercased; a single non-letter byte anywhere in the examined range
//! rejects the whole token. So `"Hello"` becomes `"hello"`, while `"co-op"`
//! and `"Data123"` produce nothing.

use crate::index::MAX_WORD_LEN;

/// Normalize one raw token into an indexable word, or reject it.
pub fn normalize_token(token: &[u8]) -> Option<String> {
    let token = &token[..token.len().min(MAX_WORD_LEN)];
    if token.is_empty() {
        return None;
    }

    let mut word = String::with_capacity(token.len());
    for &b in token {
        if b.is_ascii_alphabetic() {
            word.push(b.to_ascii_lowercase() as char);
        } else {
            return None;
        }
    }
    Some(word)
}

/// Streaming tokenizer over fixed-size byte chunks.
///
/// Files are read in chunks, so a token may straddle a chunk boundary; the
/// partial tail of each chunk is carried into the next. Only the first
/// [`MAX_WORD_LEN`] bytes of a token are retained; the rest of an overlong
/// token is discarded without ending it, so truncation never splits one token
/// into two.
#[derive(Debug, Default)]
pub struct ChunkTokenizer {
    carry: Vec<u8>,
    in_token: bool,
}

impl ChunkTokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk, invoking `emit` for every accepted word it completes.
    pub fn push_chunk(&mut self, chunk: &[u8], emit: &mut dyn FnMut(String)) {
        for &b in chunk {
            if b.is_ascii_whitespace() {
                self.flush(emit);
            } else {
                self.in_token = true;
                if self.carry.len() < MAX_WORD_LEN {
                    self.carry.push(b);
                }
            }
        }
    }

    /// Signal end of input, flushing any trailing token.
    pub fn finish(&mut self, emit: &mut dyn FnMut(String)) {
        self.flush(emit);
    }

    fn flush(&mut self, emit: &mut dyn FnMut(String)) {
        if self.in_token {
            if let Some(word) = normalize_token(&self.carry) {
                emit(word);
            }
        }
        self.carry.clear();
        self.in_token = false;
    }
}
