use std::collections::hash_map;

use crate::segment::Segmenter;
use crate::tree::PathTrie;

type ChildIter<'a, V, S> = hash_map::Iter<'a, String, PathTrie<V, S>>;

/// Iterator over `(key, &value)` for every value-bearing node of a trie. Unordered.
pub struct Iter<'a, V, S: Segmenter> {
    root: Option<&'a PathTrie<V, S>>,
    // Each frame remembers how long `cur_key` was when it was pushed.
    node_iter_stack: Vec<(usize, ChildIter<'a, V, S>)>,
    cur_key: String,
}

impl<'a, V, S: Segmenter> Iter<'a, V, S> {
    pub(crate) fn new(root: &'a PathTrie<V, S>) -> Self {
        let node_iter_stack = root
            .children
            .as_ref()
            .map(|c| (0, c.iter()))
            .into_iter()
            .collect();
        Self {
            root: Some(root),
            node_iter_stack,
            cur_key: String::new(),
        }
    }
}

impl<'a, V, S: Segmenter> Iterator for Iter<'a, V, S> {
    type Item = (String, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(value) = self.root.take().and_then(|r| r.value.as_ref()) {
            return Some((String::new(), value));
        }

        // Grab the last iterator from the stack and pull the next child off of it, popping the
        // frame when it runs dry. Children with children of their own get a frame pushed.
        loop {
            let (prefix_len, last_iter) = self.node_iter_stack.last_mut()?;
            let prefix_len = *prefix_len;
            let Some((part, node)) = last_iter.next() else {
                self.node_iter_stack.pop();
                continue;
            };

            self.cur_key.truncate(prefix_len);
            self.cur_key.push_str(part);
            if let Some(children) = &node.children {
                self.node_iter_stack
                    .push((self.cur_key.len(), children.iter()));
            }
            if let Some(value) = &node.value {
                return Some((self.cur_key.clone(), value));
            }
        }
    }
}

impl<V, S: Segmenter> PathTrie<V, S> {
    pub fn iter(&self) -> Iter<'_, V, S> {
        Iter::new(self)
    }
}

impl<'a, V, S: Segmenter> IntoIterator for &'a PathTrie<V, S> {
    type Item = (String, &'a V);
    type IntoIter = Iter<'a, V, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashMap};

    use rand::{thread_rng, Rng};

    use crate::tree::PathTrie;

    #[test]
    fn test_iter_matches_walk() {
        let mut t = PathTrie::<u32>::new();
        let mut rng = thread_rng();
        for i in 0..500 {
            let key = format!("/{}/{}/{}", rng.gen_range(0..5), rng.gen_range(0..5), i % 7);
            t.put(&key, i);
        }
        t.put("", 1000);

        let iterated: BTreeMap<String, u32> = t.iter().map(|(k, v)| (k, *v)).collect();
        let mut walked = BTreeMap::new();
        t.walk(|k, v| -> Result<(), ()> {
            walked.insert(k.to_string(), *v);
            Ok(())
        })
        .unwrap();
        assert_eq!(iterated, walked);
        assert_eq!(iterated.len(), t.len());
        assert_eq!(iterated.get(""), Some(&1000));
    }

    #[test]
    fn test_iter_skips_internal() {
        let mut t = PathTrie::<&str>::new();
        t.put("/a/b/c", "c");
        t.put("/a/d", "d");
        let collected: HashMap<String, &str> = (&t).into_iter().map(|(k, v)| (k, *v)).collect();
        assert_eq!(collected.len(), 2);
        assert_eq!(collected["/a/b/c"], "c");
        assert_eq!(collected["/a/d"], "d");
    }

    #[test]
    fn test_iter_empty() {
        let t = PathTrie::<u8>::new();
        assert_eq!(t.iter().count(), 0);
    }
}
