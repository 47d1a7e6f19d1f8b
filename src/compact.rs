//! Compaction: collapsing chains of internal nodes.
//!
//! [`PathTrie::merge`] rewrites the tree in place so that every child edge leads straight to a
//! value-bearing node, keyed by the concatenation of the segments it replaces.
//! [`PathTrie::recursive_direct_children`] computes the same view for one level without touching
//! the tree.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use tracing::{debug, trace};

use crate::segment::Segmenter;
use crate::tree::PathTrie;

impl<V, S: Segmenter> PathTrie<V, S> {
    /// Splices the children of every internal child into `self`, bottom up, and drops the
    /// internal child. Values and the keys that reach them are unchanged; lookups follow the
    /// collapsed edges transparently, and later writes split them again where needed.
    pub fn merge(&mut self) {
        let Some(children) = self.children.as_mut() else {
            return;
        };

        // Spliced entries are already merged and never need another visit.
        let parts: Vec<String> = children.keys().cloned().collect();
        for part in parts {
            let Some(child) = children.get_mut(&part) else {
                continue;
            };
            child.merge();
            if child.value.is_some() {
                continue;
            }
            let Some(child) = children.remove(&part) else {
                continue;
            };
            for (c_part, grandchild) in child.children.into_iter().flatten() {
                let spliced = format!("{part}{c_part}");
                trace!(segment = %spliced, "splicing");
                match children.entry(spliced) {
                    Entry::Occupied(mut e) => e.get_mut().absorb(grandchild),
                    Entry::Vacant(e) => {
                        e.insert(grandchild);
                    }
                }
            }
        }

        if children.is_empty() {
            self.children = None;
        }
        self.refresh_span();
    }

    // Folds `other` into `self` when two subtrees land under the same key. A value already on
    // `self` is kept.
    fn absorb(&mut self, other: Self) {
        if self.value.is_none() {
            self.value = other.value;
        }
        let Some(other_children) = other.children else {
            return;
        };
        let children = self.children.get_or_insert_with(HashMap::new);
        for (part, child) in other_children {
            match children.entry(part) {
                Entry::Occupied(mut e) => e.get_mut().absorb(child),
                Entry::Vacant(e) => {
                    e.insert(child);
                }
            }
        }
        self.refresh_span();
    }

    /// Collapses every internal node in the tree. Equivalent to [`PathTrie::merge`], with a
    /// summary of the node count logged at `debug`.
    pub fn compact(&mut self) {
        let before = self.node_count();
        self.merge();
        debug!(before, after = self.node_count(), "compacted trie");
    }

    fn node_count(&self) -> usize {
        1 + self.children().map(|(_, c)| c.node_count()).sum::<usize>()
    }

    /// The nearest value-bearing descendant down each branch, keyed by the concatenated
    /// segments leading to it. Read only.
    pub fn recursive_direct_children(&self) -> HashMap<String, &Self> {
        let mut direct = HashMap::new();
        for (part, child) in self.children() {
            if child.value.is_some() {
                direct.insert(part.to_string(), child);
                continue;
            }
            for (c_part, c_child) in child.recursive_direct_children() {
                direct.insert(format!("{part}{c_part}"), c_child);
            }
        }
        direct
    }
}
