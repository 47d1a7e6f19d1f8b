//! Statistics and introspection for path tries.
//!
//! Useful for checking how much structure a trie carries beyond its values, e.g. before and
//! after [`PathTrie::merge`](crate::tree::PathTrie::merge).

use std::collections::HashMap;

use crate::segment::Segmenter;
use crate::tree::PathTrie;

pub trait TreeStatsTrait {
    fn get_tree_stats(&self) -> TreeStats;
}

#[derive(Debug, Default)]
pub struct NodeStats {
    pub width: usize,
    pub total_nodes: usize,
    pub total_children: usize,
}

#[derive(Debug, Default)]
pub struct TreeStats {
    /// Nodes with children, grouped by their number of children.
    pub node_stats: HashMap<usize, NodeStats>,
    pub num_nodes: usize,
    pub num_leaves: usize,
    pub num_values: usize,
    pub num_inner_nodes: usize,
    pub max_height: usize,
}

fn update_tree_stats<V, S: Segmenter>(tree_stats: &mut TreeStats, node: &PathTrie<V, S>) {
    let width = node.num_children();
    tree_stats
        .node_stats
        .entry(width)
        .and_modify(|e| {
            e.total_nodes += 1;
            e.total_children += width;
        })
        .or_insert(NodeStats {
            width,
            total_nodes: 1,
            total_children: width,
        });
}

fn get_tree_stats_recurse<V, S: Segmenter>(
    node: &PathTrie<V, S>,
    tree_stats: &mut TreeStats,
    height: usize,
) {
    tree_stats.max_height = tree_stats.max_height.max(height);
    tree_stats.num_nodes += 1;
    if node.value().is_some() {
        tree_stats.num_values += 1;
    } else {
        tree_stats.num_inner_nodes += 1;
    }
    if node.num_children() == 0 {
        tree_stats.num_leaves += 1;
    } else {
        update_tree_stats(tree_stats, node);
    }
    for (_part, child) in node.children() {
        get_tree_stats_recurse(child, tree_stats, height + 1);
    }
}

impl<V, S: Segmenter> TreeStatsTrait for PathTrie<V, S> {
    fn get_tree_stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();
        get_tree_stats_recurse(self, &mut stats, 1);
        stats
    }
}
