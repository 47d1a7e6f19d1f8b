//! Segmented-key tries.
//!
//! A [`PathTrie`](tree::PathTrie) stores values under string keys that a
//! [`Segmenter`](segment::Segmenter) cuts into segments, by default path components
//! (`"/a/b/c"` is `"/a"`, `"/b"`, `"/c"`). Besides point lookups it supports walks over the whole
//! tree or over the chain of ancestors of a key, and compaction of valueless chains.
//!
//! ```
//! use segtrie::tree::PathTrie;
//!
//! let mut trie = PathTrie::<u32>::new();
//! assert!(trie.put("/a/b", 1));
//! assert!(trie.put("/a", 3));
//! assert_eq!(trie.get("/a/b"), Some(&1));
//! assert_eq!(trie.get_or_default("/a/x"), 0);
//! ```
//!
//! Tries are not synchronized; share one across threads behind a lock.

pub use crate::error::{Error, Result};

pub mod compact;
pub mod error;
pub mod iter;
pub mod segment;
pub mod stats;
pub mod tree;
pub mod walk;

/// The capability set shared by trie implementations.
pub trait TrieTrait<ValueType> {
    fn get(&self, key: &str) -> Option<&ValueType>;
    fn put(&mut self, key: &str, value: ValueType) -> bool;
    fn delete(&mut self, key: &str) -> bool;
    fn walk<E, F>(&self, walker: F) -> std::result::Result<(), E>
    where
        F: FnMut(&str, &ValueType) -> std::result::Result<(), E>;
    fn walk_path<E, F>(&self, key: &str, walker: F) -> std::result::Result<(), E>
    where
        F: FnMut(&str, &ValueType) -> std::result::Result<(), E>;
}

impl<V, S: segment::Segmenter> TrieTrait<V> for tree::PathTrie<V, S> {
    fn get(&self, key: &str) -> Option<&V> {
        tree::PathTrie::get(self, key)
    }

    fn put(&mut self, key: &str, value: V) -> bool {
        tree::PathTrie::put(self, key, value)
    }

    fn delete(&mut self, key: &str) -> bool {
        tree::PathTrie::delete(self, key)
    }

    fn walk<E, F>(&self, walker: F) -> std::result::Result<(), E>
    where
        F: FnMut(&str, &V) -> std::result::Result<(), E>,
    {
        tree::PathTrie::walk(self, walker)
    }

    fn walk_path<E, F>(&self, key: &str, walker: F) -> std::result::Result<(), E>
    where
        F: FnMut(&str, &V) -> std::result::Result<(), E>,
    {
        tree::PathTrie::walk_path(self, key, walker)
    }
}
