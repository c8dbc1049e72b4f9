//! Longest-match substring trie
//!
//! A byte-indexed trie over a fixed vocabulary. Every vocabulary entry marks
//! its last node as a match and carries a value; values for entries that
//! share a key are merged through caller-supplied callbacks, which lets a
//! table accumulate composite values (for example several spellings folding
//! into one lexicon entry).
//!
//! # Example
//!
//! ```
//! use pattern_intent_core::trie::SubstringTrie;
//!
//! let trie: SubstringTrie<u32> = [("quatre", 4), ("quatre vingt", 80)].into_iter().collect();
//! let m = trie.find(b"quatre vingt douze", 0, 1).unwrap();
//! assert_eq!((m.start, m.len, *m.value), (0, 12, 80));
//! ```

use std::collections::BTreeMap;

/// A match returned by [`SubstringTrie::find`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrieMatch<'a, V> {
    /// Byte offset where the matched entry starts
    pub start: usize,
    /// Byte length of the matched entry
    pub len: usize,
    /// Value stored for the entry
    pub value: &'a V,
}

impl<V> TrieMatch<'_, V> {
    /// Byte offset one past the end of the match
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

#[derive(Debug, Clone)]
struct TrieNode<V> {
    edges: BTreeMap<u8, usize>,
    value: Option<V>,
}

impl<V> TrieNode<V> {
    fn empty() -> Self {
        Self {
            edges: BTreeMap::new(),
            value: None,
        }
    }
}

/// Substring matcher over a fixed vocabulary
#[derive(Debug, Clone)]
pub struct SubstringTrie<V> {
    nodes: Vec<TrieNode<V>>,
    entries: usize,
}

impl<V> Default for SubstringTrie<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> SubstringTrie<V> {
    /// Create an empty trie
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::empty()],
            entries: 0,
        }
    }

    /// Build a trie from `(key, item)` pairs.
    ///
    /// `create` turns the first item seen for a key into the stored value,
    /// `update` folds every later item for the same key into it.
    pub fn build_with<T, S, I, C, U>(entries: I, mut create: C, mut update: U) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: AsRef<str>,
        C: FnMut(T) -> V,
        U: FnMut(&mut V, T),
    {
        let mut trie = Self::new();
        for (key, item) in entries {
            trie.insert_with(key.as_ref(), item, &mut create, &mut update);
        }
        trie
    }

    /// Insert `key`, creating or merging its value. Empty keys are ignored.
    pub fn insert_with<T, C, U>(&mut self, key: &str, item: T, create: C, update: U)
    where
        C: FnOnce(T) -> V,
        U: FnOnce(&mut V, T),
    {
        if key.is_empty() {
            return;
        }

        let mut node = 0;
        for byte in key.bytes() {
            node = match self.nodes[node].edges.get(&byte) {
                Some(&next) => next,
                None => {
                    let next = self.nodes.len();
                    self.nodes.push(TrieNode::empty());
                    self.nodes[node].edges.insert(byte, next);
                    next
                }
            };
        }

        match self.nodes[node].value.as_mut() {
            Some(existing) => update(existing, item),
            None => {
                self.nodes[node].value = Some(create(item));
                self.entries += 1;
            }
        }
    }

    /// Insert `key` with `value`, replacing any previous value
    pub fn insert(&mut self, key: &str, value: V) {
        self.insert_with(key, value, |v| v, |slot, v| *slot = v);
    }

    /// Number of distinct vocabulary entries
    pub fn len(&self) -> usize {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    /// Find the earliest position in `[offset, offset + max_len)` where a
    /// vocabulary entry starts and return the longest entry starting there.
    ///
    /// `max_len == 1` anchors the search at `offset`. Returns `None` when no
    /// entry starts anywhere in the scanned window.
    pub fn find(&self, input: &[u8], offset: usize, max_len: usize) -> Option<TrieMatch<'_, V>> {
        let window_end = offset.saturating_add(max_len).min(input.len());
        (offset..window_end).find_map(|start| self.longest_from(input, start))
    }

    /// Every entry that starts exactly at `pos`, shortest first
    pub fn matches_at(&self, input: &[u8], pos: usize) -> Vec<TrieMatch<'_, V>> {
        let mut found = Vec::new();
        self.walk(input, pos, |len, value| {
            found.push(TrieMatch {
                start: pos,
                len,
                value,
            })
        });
        found
    }

    fn longest_from(&self, input: &[u8], start: usize) -> Option<TrieMatch<'_, V>> {
        let mut longest = None;
        self.walk(input, start, |len, value| {
            longest = Some(TrieMatch { start, len, value })
        });
        longest
    }

    /// Follow edges from the root along `input[start..]`, reporting every
    /// match boundary crossed until the path runs out of edges.
    fn walk<'a, F>(&'a self, input: &[u8], start: usize, mut on_match: F)
    where
        F: FnMut(usize, &'a V),
    {
        let mut node = 0;
        for (i, byte) in input.iter().enumerate().skip(start) {
            match self.nodes[node].edges.get(byte) {
                Some(&next) => node = next,
                None => break,
            }
            if let Some(value) = self.nodes[node].value.as_ref() {
                on_match(i + 1 - start, value);
            }
        }
    }

    #[cfg(test)]
    fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl<V, S: AsRef<str>> FromIterator<(S, V)> for SubstringTrie<V> {
    fn from_iter<I: IntoIterator<Item = (S, V)>>(iter: I) -> Self {
        Self::build_with(iter, |v| v, |slot, v| *slot = v)
    }
}
