use std::collections::HashMap;

use tracing::{trace, warn};

use crate::segment::{segments, PathSegmenter, Segmenter, SegmenterKind};

/// A trie of string keys. Keys are cut into segments by the segmenter `S` and every segment
/// addresses one level of the tree.
///
/// Every node is itself a `PathTrie`: the root has no wrapper type, and any node reached
/// through [`PathTrie::get_node`] supports the same queries. Internal nodes carry no value and
/// exist only as branch points toward value-bearing descendants.
///
/// No child key is a leading run of segments of a sibling's key, so every key descends along
/// exactly one path.
pub struct PathTrie<V, S: Segmenter = PathSegmenter> {
    pub(crate) segmenter: S,
    pub(crate) value: Option<V>,
    // Allocated on first child.
    pub(crate) children: Option<HashMap<String, PathTrie<V, S>>>,
    // Upper bound on the number of segments in a child key. Only `merge` raises it above 1.
    pub(crate) span: usize,
}

/// Construction options. An absent segmenter falls back to `S::default()`.
#[derive(Clone, Debug)]
pub struct PathTrieConfig<S> {
    pub segmenter: Option<S>,
}

impl<S> Default for PathTrieConfig<S> {
    fn default() -> Self {
        Self { segmenter: None }
    }
}

impl PathTrieConfig<SegmenterKind> {
    /// Builds a config from a segmenter name (`path`, `rune`, `sep:<c>`). Names that don't parse
    /// fall back to the path segmenter.
    pub fn from_name(name: &str) -> Self {
        let segmenter = match name.parse::<SegmenterKind>() {
            Ok(kind) => kind,
            Err(e) => {
                warn!(error = %e, "falling back to path segmenter");
                SegmenterKind::Path
            }
        };
        Self {
            segmenter: Some(segmenter),
        }
    }
}

impl<V, S: Segmenter + Default> Default for PathTrie<V, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, S: Segmenter + Default> PathTrie<V, S> {
    pub fn new() -> Self {
        Self::with_segmenter(S::default())
    }

    pub fn with_config(config: Option<PathTrieConfig<S>>) -> Self {
        let segmenter = config.and_then(|c| c.segmenter).unwrap_or_default();
        Self::with_segmenter(segmenter)
    }
}

impl<V, S: Segmenter> PathTrie<V, S> {
    pub fn with_segmenter(segmenter: S) -> Self {
        Self {
            segmenter,
            value: None,
            children: None,
            span: 1,
        }
    }

    // Children share the root's segmenter.
    #[inline]
    fn new_child(segmenter: &S) -> Self {
        Self::with_segmenter(segmenter.clone())
    }

    pub fn segmenter(&self) -> &S {
        &self.segmenter
    }

    /// The value stored at this node, `None` for internal nodes.
    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    pub fn value_mut(&mut self) -> Option<&mut V> {
        self.value.as_mut()
    }

    pub fn is_internal(&self) -> bool {
        self.value.is_none()
    }

    pub fn num_children(&self) -> usize {
        self.children.as_ref().map_or(0, HashMap::len)
    }

    pub fn child(&self, part: &str) -> Option<&Self> {
        self.children.as_ref()?.get(part)
    }

    /// Direct children with the segment strings that key them. Unordered.
    pub fn children(&self) -> impl Iterator<Item = (&str, &Self)> {
        self.children
            .iter()
            .flat_map(|c| c.iter())
            .map(|(part, child)| (part.as_str(), child))
    }

    // Valueless leaves never survive a mutation.
    #[inline]
    pub(crate) fn is_prunable(&self) -> bool {
        self.value.is_none() && self.num_children() == 0
    }

    /// End of the run of segments from `start` that keys a child of this node, if any.
    ///
    /// Children of a merged node may be keyed by several segments; runs of up to `span`
    /// segments are tried, shortest first. Sibling keys never extend one another, so at most one
    /// run matches.
    pub(crate) fn child_end(&self, key: &str, start: usize) -> Option<usize> {
        let children = self.children.as_ref()?;
        let (mut part, mut next) = self.segmenter.segment(key, start);
        for _ in 0..self.span {
            if part.is_empty() {
                return None;
            }
            let end = next.unwrap_or(key.len());
            if children.contains_key(&key[start..end]) {
                return Some(end);
            }
            (part, next) = self.segmenter.segment(key, next?);
        }
        None
    }

    fn find(&self, key: &str) -> Option<&Self> {
        let mut node = self;
        let mut start = 0;
        while !self.segmenter.segment(key, start).0.is_empty() {
            let end = node.child_end(key, start)?;
            node = node.child(&key[start..end])?;
            start = end;
        }
        Some(node)
    }

    fn find_mut(&mut self, key: &str) -> Option<&mut Self> {
        let segmenter = self.segmenter.clone();
        let mut node = self;
        let mut start = 0;
        while !segmenter.segment(key, start).0.is_empty() {
            let end = node.child_end(key, start)?;
            node = node.children.as_mut()?.get_mut(&key[start..end])?;
            start = end;
        }
        Some(node)
    }

    /// Returns the value stored at `key`, or `None` if there is none (including when `key`
    /// addresses an internal node).
    pub fn get(&self, key: &str) -> Option<&V> {
        self.find(key)?.value.as_ref()
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.find_mut(key)?.value.as_mut()
    }

    /// Returns a clone of the value at `key`, or `V::default()` if absent.
    pub fn get_or_default(&self, key: &str) -> V
    where
        V: Default + Clone,
    {
        self.get(key).cloned().unwrap_or_default()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Returns the node addressed by `key`, value-bearing or internal. The empty key addresses
    /// `self`.
    pub fn get_node(&self, key: &str) -> Option<&Self> {
        self.find(key)
    }

    /// Stores `value` at `key`, creating any missing nodes along the way. Returns the value it
    /// replaced, if any.
    ///
    /// A key that ends or branches off inside a collapsed edge splits that edge at the point
    /// where the key leaves it.
    pub fn insert(&mut self, key: &str, value: V) -> Option<V> {
        let segmenter = self.segmenter.clone();
        let mut node = self;
        let mut start = 0;
        loop {
            let (part, next) = segmenter.segment(key, start);
            if part.is_empty() {
                break;
            }
            let end = match node.child_end(key, start) {
                Some(end) => end,
                None => {
                    if node.span > 1 {
                        node.split_edges(part);
                    }
                    next.unwrap_or(key.len())
                }
            };
            let part = &key[start..end];
            node = node
                .children
                .get_or_insert_with(HashMap::new)
                .entry(part.to_string())
                .or_insert_with(|| {
                    trace!(segment = part, "new node");
                    Self::new_child(&segmenter)
                });
            start = end;
        }
        node.value.replace(value)
    }

    // Moves every collapsed edge whose first segment is `head` under a new internal child keyed
    // by `head`.
    fn split_edges(&mut self, head: &str) {
        let Some(children) = self.children.as_mut() else {
            return;
        };
        let segmenter = &self.segmenter;
        let moved: Vec<String> = children
            .keys()
            .filter(|k| k.len() > head.len() && segmenter.segment(k.as_str(), 0).0 == head)
            .cloned()
            .collect();
        if moved.is_empty() {
            return;
        }

        let mut grouped = HashMap::new();
        for k in moved {
            if let Some(child) = children.remove(&k) {
                grouped.insert(k[head.len()..].to_string(), child);
            }
        }
        trace!(segment = head, edges = grouped.len(), "splitting collapsed edges");
        let mut branch = Self::new_child(segmenter);
        branch.children = Some(grouped);
        branch.refresh_span();
        children.insert(head.to_string(), branch);
        self.refresh_span();
    }

    // Recomputes `span` from the current child keys.
    pub(crate) fn refresh_span(&mut self) {
        let segmenter = &self.segmenter;
        self.span = self
            .children
            .iter()
            .flat_map(HashMap::keys)
            .map(|k| segments(segmenter, k).len())
            .max()
            .unwrap_or(1)
            .max(1);
    }

    /// Stores `value` at `key`. Returns true if no value was there before, false if one was
    /// replaced.
    pub fn put(&mut self, key: &str, value: V) -> bool {
        self.insert(key, value).is_none()
    }

    /// Removes and returns the value at `key`. Nodes left without a value or children are pruned
    /// all the way up to, but never including, `self`.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        self.remove_recurse(key, 0)
    }

    fn remove_recurse(&mut self, key: &str, start: usize) -> Option<V> {
        if self.segmenter.segment(key, start).0.is_empty() {
            return self.value.take();
        }
        let end = self.child_end(key, start)?;
        let part = &key[start..end];
        let children = self.children.as_mut()?;
        let child = children.get_mut(part)?;
        let removed = child.remove_recurse(key, end);
        if removed.is_some() && child.is_prunable() {
            trace!(segment = part, "pruning node");
            children.remove(part);
            if children.is_empty() {
                self.children = None;
                self.span = 1;
            }
        }
        removed
    }

    /// Returns true iff a value was removed.
    pub fn delete(&mut self, key: &str) -> bool {
        self.remove(key).is_some()
    }

    /// Number of stored values in this subtree.
    pub fn len(&self) -> usize {
        let own = usize::from(self.value.is_some());
        own + self.children().map(|(_, c)| c.len()).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none() && self.children().all(|(_, c)| c.is_empty())
    }

    pub fn print_tree(&self)
    where
        V: std::fmt::Debug,
    {
        eprintln!("[root] {:?}, {} #children", self.value, self.num_children());
        self.print_tree_recurse(1);
    }

    fn print_tree_recurse(&self, depth: usize)
    where
        V: std::fmt::Debug,
    {
        let indent = "  ".repeat(depth);
        for (part, child) in self.children() {
            eprintln!(
                "{}{:?} => {:?}, {} #children",
                indent,
                part,
                child.value,
                child.num_children()
            );
            child.print_tree_recurse(depth + 1);
        }
    }
}
