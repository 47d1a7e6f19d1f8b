use crate::segment::Segmenter;
use crate::tree::PathTrie;

impl<V, S: Segmenter> PathTrie<V, S> {
    /// Calls `walker` with the full key and value of every value-bearing node, depth first with
    /// no ordering between siblings. The first error returned by `walker` aborts the walk and is
    /// handed back unchanged.
    pub fn walk<E, F>(&self, mut walker: F) -> Result<(), E>
    where
        F: FnMut(&str, &V) -> Result<(), E>,
    {
        let mut key = String::new();
        self.walk_recurse(&mut key, &mut walker)
    }

    fn walk_recurse<E, F>(&self, key: &mut String, walker: &mut F) -> Result<(), E>
    where
        F: FnMut(&str, &V) -> Result<(), E>,
    {
        if let Some(value) = &self.value {
            walker(key.as_str(), value)?;
        }
        for (part, child) in self.children() {
            // Pushed and popped as we descend.
            let len = key.len();
            key.push_str(part);
            let result = child.walk_recurse(key, walker);
            key.truncate(len);
            result?;
        }
        Ok(())
    }

    /// Calls `walker` for every value-bearing node on the path from `self` down to the node at
    /// `key`, in root-to-leaf order. `self`'s own value is reported under the empty key, the
    /// others under the prefix of `key` consumed to reach them.
    ///
    /// The first missing node ends the walk quietly; an error from `walker` ends it and is
    /// returned.
    pub fn walk_path<E, F>(&self, key: &str, mut walker: F) -> Result<(), E>
    where
        F: FnMut(&str, &V) -> Result<(), E>,
    {
        if let Some(value) = &self.value {
            walker("", value)?;
        }

        let mut node = self;
        let mut start = 0;
        while !self.segmenter.segment(key, start).0.is_empty() {
            let Some(end) = node.child_end(key, start) else {
                break;
            };
            let Some(child) = node.child(&key[start..end]) else {
                break;
            };
            node = child;
            start = end;
            if let Some(value) = &node.value {
                walker(&key[..end], value)?;
            }
        }
        Ok(())
    }
}
