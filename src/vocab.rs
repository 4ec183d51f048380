//! Streaming vocabulary accumulation for the external trainer.
//!
//! The trainer's stock vocabulary step wants a fully materialized (or
//! twice-iterable) sentence collection. For graphs whose walk corpus does not
//! fit in memory twice, `StreamingVocabulary` performs the same accounting in
//! a single pass over the walks; the raw walk sequence is then re-streamed,
//! not re-stored, for the training pass itself.

use crate::graph::NodeLabel;
use std::cmp::Reverse;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy)]
struct TokenStats {
    count: u64,
    // rank of the walk token that introduced this label, for a deterministic
    // tie-break in finalize()
    first_seen: u64,
}

/// Incremental frequency accumulator over walk sequences.
///
/// `observe` is one-pass: it never needs random access to the corpus, so it
/// can be fed directly from a [`crate::WalkStream`].
#[derive(Debug, Clone, Default)]
pub struct StreamingVocabulary<L: NodeLabel> {
    counts: HashMap<L, TokenStats>,
    total_tokens: u64,
    walk_count: u64,
}

impl<L: NodeLabel> StreamingVocabulary<L> {
    pub fn new() -> Self {
        Self { counts: HashMap::new(), total_tokens: 0, walk_count: 0 }
    }

    /// Fold one walk into the running counts.
    pub fn observe(&mut self, walk: &[L]) {
        for label in walk {
            let next_rank = self.total_tokens;
            self.counts
                .entry(label.clone())
                .and_modify(|s| s.count += 1)
                .or_insert(TokenStats { count: 1, first_seen: next_rank });
            self.total_tokens += 1;
        }
        self.walk_count += 1;
    }

    /// Fold an entire walk sequence, one walk at a time.
    pub fn observe_all<I, W>(&mut self, walks: I)
    where
        I: IntoIterator<Item = W>,
        W: AsRef<[L]>,
    {
        for walk in walks {
            self.observe(walk.as_ref());
        }
    }

    /// Occurrence count for `label` so far (0 if never seen).
    pub fn count(&self, label: &L) -> u64 {
        self.counts.get(label).map_or(0, |s| s.count)
    }

    /// Distinct labels seen so far.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    pub fn total_tokens(&self) -> u64 {
        self.total_tokens
    }

    pub fn walk_count(&self) -> u64 {
        self.walk_count
    }

    /// Accept every label with `count >= min_count`, in descending-count
    /// order; ties break by first-seen order so the result is deterministic.
    pub fn finalize(self, min_count: u64) -> Vocabulary<L> {
        let mut entries: Vec<(L, TokenStats)> = self
            .counts
            .into_iter()
            .filter(|(_, s)| s.count >= min_count)
            .collect();
        entries.sort_by_key(|(_, s)| (Reverse(s.count), s.first_seen));
        Vocabulary {
            entries: entries.into_iter().map(|(l, s)| (l, s.count)).collect(),
        }
    }
}

/// The accepted vocabulary snapshot handed to the trainer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary<L: NodeLabel> {
    entries: Vec<(L, u64)>,
}

impl<L: NodeLabel> Vocabulary<L> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in descending-count order.
    pub fn iter(&self) -> impl Iterator<Item = (&L, u64)> {
        self.entries.iter().map(|(l, c)| (l, *c))
    }

    pub fn contains(&self, label: &L) -> bool {
        self.entries.iter().any(|(l, _)| l == label)
    }

    pub fn count(&self, label: &L) -> u64 {
        self.entries.iter().find(|(l, _)| l == label).map_or(0, |(_, c)| *c)
    }

    /// Entries in the trainer's token shape: string label + count.
    pub fn tokens(&self) -> impl Iterator<Item = (String, u64)> + '_ {
        self.entries.iter().map(|(l, c)| (l.to_string(), *c))
    }
}

/// Convert one walk to the trainer's token representation.
pub fn walk_tokens<L: NodeLabel>(walk: &[L]) -> Vec<String> {
    walk.iter().map(ToString::to_string).collect()
}
